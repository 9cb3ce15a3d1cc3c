//! libris 应用层
//!
//! 在领域层之上提供：
//! - 配置加载（`config`）：启动时选定唯一的标识生成器；
//! - 聚合工厂（`factory`）：从生成器取得标识并构造聚合；
//! - 仓储抽象（`store`）：按存储版本做比较交换的写入，附带内存实现；
//! - 聚合服务（`service`）：读取、创建、补丁更新与照片移除的完整流程。
//!
pub mod config;
pub mod error;
pub mod factory;
pub mod service;
pub mod store;

pub use config::LibrisConfig;
pub use error::{AppError, AppResult};
pub use factory::{AuthorFactory, BookFactory, ReaderFactory};
pub use service::AggregateService;
pub use store::{AggregateStore, InMemoryStore};
