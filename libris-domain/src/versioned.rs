//! 乐观并发变更协议
//!
//! 所有可变聚合共用同一套流程：
//! 1. 比较调用方期望版本与当前版本，不一致即拒绝（不修改任何状态）；
//! 2. 校验补丁中所有已提供字段，任一失败即整体拒绝（全有或全无）；
//! 3. 应用全部已提供字段，版本号加一（空补丁除外）。
//!
//! 聚合只需提供字段校验（`validate_patch`）与落地（`commit_changes`）。
//! 版本检查只防止跨请求的陈旧写入；同一内存实例的并发写由 `&mut self` 的独占借用保证，
//! 与存储层的原子性则由仓储的比较交换负责。
//!
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::entity::private::Token;
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;

/// 支持补丁更新的版本化实体
pub trait VersionedEntity: Entity {
    /// 聚合类型名（日志与错误信息使用）
    const TYPE: &'static str;

    /// 稀疏补丁
    type Patch;

    /// 已通过校验、可直接落地的变更
    type Changes;

    /// 校验补丁中所有已提供字段，不修改自身
    fn validate_patch(&self, patch: Self::Patch) -> DomainResult<Self::Changes>;

    /// 落地已校验的变更，返回补丁中是否有已提供的字段。
    ///
    /// 已提供的字段即使与当前值相同也算一次变更。
    fn commit_changes(&mut self, changes: Self::Changes) -> bool;

    /// 以期望版本应用补丁，返回应用后的版本。
    ///
    /// - 版本不一致：`StaleVersion`
    /// - 字段校验失败：`InvalidField`
    ///
    /// 两种失败都不会修改聚合。只要有字段被提供（即使值未变）版本就加一；
    /// 所有字段都未提供的空补丁成功返回，版本保持不变。
    fn apply_patch(&mut self, expected: Version, patch: Self::Patch) -> DomainResult<Version> {
        let actual = self.version();
        if expected != actual {
            warn!(
                aggregate = Self::TYPE,
                id = %self.id(),
                %expected,
                %actual,
                "rejecting stale patch"
            );
            return Err(DomainError::StaleVersion { expected, actual });
        }

        let changes = self.validate_patch(patch)?;
        // 落地前确认计数器还能推进，保证失败时聚合不被修改
        actual.next()?;
        if !self.commit_changes(changes) {
            debug!(aggregate = Self::TYPE, id = %self.id(), version = %actual, "empty patch");
            return Ok(actual);
        }

        let version = self.advance_version(Token { _priv: () })?;
        debug!(aggregate = Self::TYPE, id = %self.id(), %version, "patch applied");
        Ok(version)
    }
}

/// 拥有可移除子资源（例如照片）的版本化实体
pub trait OptionalResource: VersionedEntity {
    type Resource;

    /// 取出子资源，不存在时返回 None
    fn take_resource(&mut self) -> Option<Self::Resource>;

    /// 以期望版本移除子资源，返回移除后的版本。
    ///
    /// 版本不一致返回 `Conflict`；子资源本就不存在时视为成功的空操作，版本不变。
    fn remove_optional_resource(&mut self, expected: Version) -> DomainResult<Version> {
        let actual = self.version();
        if expected != actual {
            warn!(
                aggregate = Self::TYPE,
                id = %self.id(),
                %expected,
                %actual,
                "rejecting stale resource removal"
            );
            return Err(DomainError::Conflict { expected, actual });
        }

        actual.next()?;
        if self.take_resource().is_none() {
            debug!(aggregate = Self::TYPE, id = %self.id(), "no resource to remove");
            return Ok(actual);
        }

        let version = self.advance_version(Token { _priv: () })?;
        debug!(aggregate = Self::TYPE, id = %self.id(), %version, "resource removed");
        Ok(version)
    }
}
