//! libris 领域层基础库（libris-domain）
//!
//! 图书馆管理系统中与框架无关的核心：
//! - 标识生成（`id_generator`）：可插拔的唯一 ID 生成器，基于 `codec` 中的 base65 编解码；
//! - 乐观并发（`versioned`）：统一的版本号校验与补丁应用协议；
//! - 聚合模型（`model`）：作者、图书、读者及其值对象与字段校验。
//!
//! 本 crate 不涉及存储与传输，仅定义领域规则与最小必要的错误类型，
//! 持久化与对外接口由上层（例如 `libris-application`）提供。
//!
//! 典型用法：
//! 1. 通过 `IdGeneratorKind` 在启动时选定唯一的生成器实现；
//! 2. 以生成的标识构造聚合（版本号为 0）；
//! 3. 以调用方观察到的版本号与稀疏补丁调用 `VersionedEntity::apply_patch`。
//!
pub mod codec;
pub mod entity;
pub mod error;
pub mod id_generator;
pub mod model;
pub mod patch;
pub mod value_object;
pub mod versioned;

// 允许在本 crate 内部通过 ::libris_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 内也能解析。
extern crate self as libris_domain;
