//! 安全随机源
//!
//! 生成器通过 `RandomSource` 注入熵源；默认实现 `SecureRandom` 直接读取操作系统 CSPRNG，
//! 无内部状态，可在任意线程并发调用。熵源失败时返回 `EntropyUnavailable`，
//! 不会退化为弱随机数。
//!
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;

use crate::error::{DomainError, DomainResult};

/// 密码学强度的随机源
pub trait RandomSource: Send + Sync {
    /// 以随机字节填满 `dest`
    fn fill_bytes(&self, dest: &mut [u8]) -> DomainResult<()>;

    /// 返回 `[0, 2^bits)` 内均匀分布的无符号整数
    fn random_bits(&self, bits: usize) -> DomainResult<BigUint> {
        if bits == 0 {
            return Ok(BigUint::zero());
        }

        let mut bytes = vec![0u8; bits.div_ceil(8)];
        self.fill_bytes(&mut bytes)?;

        // 屏蔽最高字节中超出 bits 的部分
        let excess = bytes.len() * 8 - bits;
        bytes[0] &= u8::MAX >> excess;

        Ok(BigUint::from_bytes_be(&bytes))
    }
}

impl<T> RandomSource for Arc<T>
where
    T: RandomSource + ?Sized,
{
    fn fill_bytes(&self, dest: &mut [u8]) -> DomainResult<()> {
        (**self).fill_bytes(dest)
    }
}

/// 操作系统 CSPRNG（`OsRng`）
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> DomainResult<()> {
        OsRng.try_fill_bytes(dest).map_err(|err| {
            warn!(error = %err, "operating system entropy source failed");
            DomainError::EntropyUnavailable {
                reason: err.to_string(),
            }
        })
    }
}
