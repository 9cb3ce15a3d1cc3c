//! libris 过程宏
//!
//! - `#[entity]`：为聚合追加 `id`/`version` 字段并实现 `Entity`
//! - `#[entity_id]`：为标识 newtype 提供派生与转换
//! - `#[value_object]`：为值对象合并标准派生集合
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;
mod value_object;

/// 实体宏
/// - 追加字段：`id: IdType`, `version: Version`（若缺失）并置于字段最前
/// - 自动实现 `::libris_domain::entity::Entity`
/// - 支持参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏
/// 用于 `struct AuthorNumber(String);` 形式的单字段 tuple struct。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
/// 参数：`#[value_object(debug = true|false, default = true|false)]`，均默认 true
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
