//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与版本（optimistic locking）能力。
//! 通常由 `#[entity]` 宏生成实现。
//!
use crate::error::DomainResult;
use crate::value_object::Version;
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display + Send + Sync;

    /// 获取实体标识（分配后不可变）
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> Version;

    /// 版本号加一并返回新版本。
    ///
    /// 需要 `private::Token`，而令牌只能由 `versioned` 中的变更协议构造，
    /// 因此本 crate 之外无法绕过协议推进版本。
    fn advance_version(&mut self, token: private::Token) -> DomainResult<Version>;
}

#[doc(hidden)]
pub mod private {
    /// 推进版本的凭证，字段仅本 crate 可见
    pub struct Token {
        pub(crate) _priv: (),
    }
}
