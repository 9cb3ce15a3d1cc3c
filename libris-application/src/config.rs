//! 应用配置
//!
//! 只有一项：标识生成器的实现（`LIBRIS_ID_GENERATOR`），取值 `base65` 或 `timestamphex`，
//! 缺省为 `timestamphex`。开发环境下会先读取 `.env`。
//!
use std::sync::Arc;

use libris_domain::id_generator::{IdGenerator, IdGeneratorKind};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const ID_GENERATOR_VAR: &str = "LIBRIS_ID_GENERATOR";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibrisConfig {
    pub id_generator: IdGeneratorKind,
}

impl LibrisConfig {
    /// 从进程环境变量加载（存在 `.env` 时一并加载）
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let id_generator = match lookup(ID_GENERATOR_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<IdGeneratorKind>()
                .map_err(|err| AppError::Config(format!("{ID_GENERATOR_VAR}: {err}")))?,
            _ => IdGeneratorKind::default(),
        };
        debug!(generator = %id_generator, "configuration loaded");
        Ok(Self { id_generator })
    }

    /// 构建本进程唯一的标识生成器
    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        self.id_generator.build()
    }
}
