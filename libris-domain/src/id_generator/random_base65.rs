use tracing::trace;

use super::IdGenerator;
use super::random::{RandomSource, SecureRandom};
use crate::codec::base65;
use crate::error::DomainResult;

/// 每个标识抽取的随机位数
pub const RANDOM_BITS: usize = 128;

/// 128 位随机整数的 base65 编码。
///
/// 输出长度随随机值大小变化（1 至 22 个字符），调用方不应假设定长。
#[derive(Debug, Clone, Default)]
pub struct RandomBase65<R = SecureRandom> {
    source: R,
}

impl RandomBase65 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RandomSource> RandomBase65<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> IdGenerator for RandomBase65<R> {
    fn generate_id(&self) -> DomainResult<String> {
        let value = self.source.random_bits(RANDOM_BITS)?;
        let id = base65::encode_biguint(&value);
        trace!(%id, "generated base65 id");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, ErrorKind};

    struct Constant(u8);
    impl RandomSource for Constant {
        fn fill_bytes(&self, dest: &mut [u8]) -> DomainResult<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn encodes_the_random_draw() {
        let generator = RandomBase65::with_source(Constant(0));
        assert_eq!(generator.generate_id().unwrap(), "A");

        let generator = RandomBase65::with_source(Constant(0xff));
        let id = generator.generate_id().unwrap();
        assert_eq!(id, base65::encode(&u128::MAX.to_be_bytes()));
        assert_eq!(id.len(), 22);
    }

    #[test]
    fn output_decodes_to_at_most_128_bits() {
        let generator = RandomBase65::new();
        for _ in 0..256 {
            let id = generator.generate_id().unwrap();
            assert!(!id.is_empty());
            assert!(id.len() <= 22);
            assert!(base65::decode(&id).unwrap().len() <= 16);
        }
    }

    #[test]
    fn entropy_failure_is_fatal() {
        struct Broken;
        impl RandomSource for Broken {
            fn fill_bytes(&self, _dest: &mut [u8]) -> DomainResult<()> {
                Err(DomainError::EntropyUnavailable {
                    reason: "no entropy".into(),
                })
            }
        }

        let err = RandomBase65::with_source(Broken).generate_id().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
    }
}
