//! 标识生成（id_generator）
//!
//! 聚合在创建时通过 `IdGenerator` 取得不透明的字符串标识。提供两种实现：
//! - `RandomBase65`：128 位安全随机数的 base65 编码；
//! - `TimestampHex`：毫秒时间戳加 24 位随机后缀。
//!
//! 每个进程只启用一种实现：启动时由 `IdGeneratorKind` 选定并以
//! `Arc<dyn IdGenerator>` 注入，运行期间不再切换。
//!
mod random_base65;
mod timestamp_hex;

pub mod random;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DomainError, DomainResult};

pub use random::{RandomSource, SecureRandom};
pub use random_base65::{RANDOM_BITS, RandomBase65};
pub use timestamp_hex::{SUFFIX_BITS, TimestampHex};

/// 唯一标识生成器
pub trait IdGenerator: Send + Sync {
    /// 生成新的标识；熵源不可用时返回 `EntropyUnavailable`
    fn generate_id(&self) -> DomainResult<String>;
}

impl<T> IdGenerator for Arc<T>
where
    T: IdGenerator + ?Sized,
{
    fn generate_id(&self) -> DomainResult<String> {
        (**self).generate_id()
    }
}

impl<T> IdGenerator for Box<T>
where
    T: IdGenerator + ?Sized,
{
    fn generate_id(&self) -> DomainResult<String> {
        (**self).generate_id()
    }
}

/// 生成器实现选择（名称与部署配置保持一致：`base65` / `timestamphex`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdGeneratorKind {
    Base65,
    #[default]
    TimestampHex,
}

impl IdGeneratorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base65 => "base65",
            Self::TimestampHex => "timestamphex",
        }
    }

    /// 以操作系统 CSPRNG 构建生成器
    pub fn build(self) -> Arc<dyn IdGenerator> {
        self.build_with(SecureRandom)
    }

    /// 以指定随机源构建生成器
    pub fn build_with<R>(self, source: R) -> Arc<dyn IdGenerator>
    where
        R: RandomSource + 'static,
    {
        info!(generator = self.as_str(), "id generator selected");
        match self {
            Self::Base65 => Arc::new(RandomBase65::with_source(source)),
            Self::TimestampHex => Arc::new(TimestampHex::with_source(source)),
        }
    }
}

impl fmt::Display for IdGeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdGeneratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base65" => Ok(Self::Base65),
            "timestamphex" | "timestamp-hex" | "timestamp_hex" => Ok(Self::TimestampHex),
            other => Err(DomainError::Parse {
                reason: format!(
                    "unknown id generator '{other}', expected 'base65' or 'timestamphex'"
                ),
            }),
        }
    }
}
