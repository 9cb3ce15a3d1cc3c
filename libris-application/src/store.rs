//! 聚合仓储
//!
//! `update` 以调用方计算写入时所依据的版本做比较交换：存储中的版本不等于该版本即拒绝，
//! 报告 `StaleVersion`。这是跨请求并发写的最终防线，领域层的版本检查只覆盖单个实例。
//!
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use libris_domain::entity::Entity;
use libris_domain::error::DomainError;
use libris_domain::value_object::Version;
use libris_domain::versioned::VersionedEntity;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

#[async_trait]
pub trait AggregateStore<A>: Send + Sync
where
    A: VersionedEntity,
{
    async fn load(&self, id: &A::Id) -> AppResult<Option<A>>;

    /// 保存新聚合；标识已存在时返回 `Conflict`
    async fn insert(&self, aggregate: &A) -> AppResult<()>;

    /// 以 `expected`（变更前读到的版本）为条件覆盖已存储的聚合
    async fn update(&self, aggregate: &A, expected: Version) -> AppResult<()>;
}

#[async_trait]
impl<A, T> AggregateStore<A> for Arc<T>
where
    A: VersionedEntity + 'static,
    T: AggregateStore<A> + ?Sized,
{
    async fn load(&self, id: &A::Id) -> AppResult<Option<A>> {
        (**self).load(id).await
    }

    async fn insert(&self, aggregate: &A) -> AppResult<()> {
        (**self).insert(aggregate).await
    }

    async fn update(&self, aggregate: &A, expected: Version) -> AppResult<()> {
        (**self).update(aggregate, expected).await
    }
}

/// 基于内存的仓储实现，按标识的字符串形式索引
pub struct InMemoryStore<A> {
    entries: DashMap<String, A>,
}

impl<A> Default for InMemoryStore<A> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<A> InMemoryStore<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl<A> AggregateStore<A> for InMemoryStore<A>
where
    A: VersionedEntity + Clone + 'static,
{
    async fn load(&self, id: &A::Id) -> AppResult<Option<A>> {
        Ok(self.entries.get(&id.to_string()).map(|a| a.value().clone()))
    }

    async fn insert(&self, aggregate: &A) -> AppResult<()> {
        let key = aggregate.id().to_string();
        match self.entries.entry(key) {
            Entry::Occupied(existing) => {
                warn!(aggregate = A::TYPE, id = %existing.key(), "duplicate identifier on insert");
                Err(DomainError::Conflict {
                    expected: Version::new(),
                    actual: existing.get().version(),
                }
                .into())
            }
            Entry::Vacant(slot) => {
                debug!(aggregate = A::TYPE, id = %slot.key(), "aggregate inserted");
                slot.insert(aggregate.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, aggregate: &A, expected: Version) -> AppResult<()> {
        let key = aggregate.id().to_string();
        // 持有分片写锁直到替换完成，比较与交换之间不会插入其他写入
        let Some(mut stored) = self.entries.get_mut(&key) else {
            return Err(AppError::AggregateNotFound {
                aggregate: A::TYPE,
                id: key,
            });
        };

        let actual = stored.version();
        if actual != expected {
            warn!(aggregate = A::TYPE, id = %key, %expected, %actual, "stale write rejected by store");
            return Err(DomainError::StaleVersion { expected, actual }.into());
        }

        *stored = aggregate.clone();
        debug!(aggregate = A::TYPE, id = %key, version = %aggregate.version(), "aggregate updated");
        Ok(())
    }
}
