//! 聚合服务
//!
//! 每个写操作都是“读取、执行领域协议、按读到的版本比较交换写回”三步。
//! 服务内部不做重试：版本冲突原样返回，由调用方重新读取后决定。
//!
use std::marker::PhantomData;

use libris_domain::entity::Entity;
use libris_domain::value_object::Version;
use libris_domain::versioned::{OptionalResource, VersionedEntity};
use tracing::{debug, instrument};

use crate::error::{AppError, AppResult};
use crate::store::AggregateStore;

pub struct AggregateService<A, S> {
    store: S,
    _marker: PhantomData<fn() -> A>,
}

impl<A, S> AggregateService<A, S>
where
    A: VersionedEntity,
    S: AggregateStore<A>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get(&self, id: &A::Id) -> AppResult<A> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| AppError::AggregateNotFound {
                aggregate: A::TYPE,
                id: id.to_string(),
            })
    }

    /// 保存由工厂创建的新聚合
    pub async fn create(&self, aggregate: A) -> AppResult<A> {
        self.store.insert(&aggregate).await?;
        debug!(aggregate = A::TYPE, id = %aggregate.id(), "aggregate created");
        Ok(aggregate)
    }

    /// 以期望版本应用补丁，结果按读到的版本写回
    #[instrument(skip_all, fields(aggregate = A::TYPE, id = %id, %expected))]
    pub async fn patch(&self, id: &A::Id, expected: Version, patch: A::Patch) -> AppResult<A> {
        let mut aggregate = self.get(id).await?;
        let loaded = aggregate.version();
        aggregate.apply_patch(expected, patch)?;
        self.store.update(&aggregate, loaded).await?;
        Ok(aggregate)
    }

    /// 以期望版本移除照片；照片本就不存在时版本不变
    #[instrument(skip_all, fields(aggregate = A::TYPE, id = %id, %expected))]
    pub async fn remove_photo(&self, id: &A::Id, expected: Version) -> AppResult<A>
    where
        A: OptionalResource,
    {
        let mut aggregate = self.get(id).await?;
        let loaded = aggregate.version();
        aggregate.remove_optional_resource(expected)?;
        self.store.update(&aggregate, loaded).await?;
        Ok(aggregate)
    }
}
