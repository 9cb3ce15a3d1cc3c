use chrono::Utc;
use num_traits::ToPrimitive;
use tracing::trace;

use super::IdGenerator;
use super::random::{RandomSource, SecureRandom};
use crate::error::DomainResult;

/// 随机后缀位数（6 个十六进制字符）
pub const SUFFIX_BITS: usize = 24;

/// `<毫秒时间戳>-<6 位小写十六进制随机后缀>`。
///
/// 唯一性依赖同一毫秒内 2^24 后缀空间不重复，属于可接受的概率性风险。
#[derive(Debug, Clone, Default)]
pub struct TimestampHex<R = SecureRandom> {
    source: R,
}

impl TimestampHex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RandomSource> TimestampHex<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> IdGenerator for TimestampHex<R> {
    fn generate_id(&self) -> DomainResult<String> {
        let millis = Utc::now().timestamp_millis();
        // random_bits(24) 必然落在 u32 范围内
        let suffix = self
            .source
            .random_bits(SUFFIX_BITS)?
            .to_u32()
            .unwrap_or_default();
        let id = format_id(millis, suffix);
        trace!(%id, "generated timestamp-hex id");
        Ok(id)
    }
}

fn format_id(millis: i64, suffix: u32) -> String {
    format!("{millis}-{suffix:06x}")
}
