//! Base65 编解码
//!
//! 将字节序列视为无符号大端整数，以 65 为基数渲染到固定字母表。
//! 字母表的字符与顺序属于对外契约：已生成的标识依赖它才能互相解码。
//!
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{DomainError, DomainResult};

/// 字母表：A–Z、a–z、0–9，随后是 `+`、`-`、`?`
pub const ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-?";

/// 基数
pub const RADIX: u32 = ALPHABET.len() as u32;

const INVALID: u8 = u8::MAX;

// ASCII -> 字母表下标，非字母表字符为 INVALID
const REVERSE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// 编码字节序列（无符号大端整数）。
///
/// 空输入与全零输入均表示 0，编码为单个字符 `"A"`。
///
/// ```
/// use libris_domain::codec::base65;
///
/// assert_eq!(base65::encode(&[]), "A");
/// assert_eq!(base65::encode(&[0x01, 0x00]), "D9");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    encode_biguint(&BigUint::from_bytes_be(bytes))
}

/// 编码任意精度整数，最高位在前
pub fn encode_biguint(value: &BigUint) -> String {
    // to_radix_be 对 0 返回 [0]，恰好对应字母表首字符
    value
        .to_radix_be(RADIX)
        .into_iter()
        .map(|digit| ALPHABET[digit as usize] as char)
        .collect()
}

/// 解码为最小长度的大端字节序列。
///
/// 值为 0 时返回空序列；任何不在字母表中的字符返回 `InvalidEncoding`。
pub fn decode(encoded: &str) -> DomainResult<Vec<u8>> {
    let value = decode_biguint(encoded)?;
    if value.is_zero() {
        return Ok(Vec::new());
    }
    Ok(value.to_bytes_be())
}

/// 解码为任意精度整数
pub fn decode_biguint(encoded: &str) -> DomainResult<BigUint> {
    let digits = encoded
        .chars()
        .enumerate()
        .map(|(position, character)| digit_of(character, position))
        .collect::<DomainResult<Vec<u8>>>()?;

    if digits.is_empty() {
        return Ok(BigUint::zero());
    }

    // 每个 digit 均小于 RADIX，from_radix_be 不会失败
    Ok(BigUint::from_radix_be(&digits, RADIX).unwrap_or_default())
}

fn digit_of(character: char, position: usize) -> DomainResult<u8> {
    let digit = if character.is_ascii() {
        REVERSE[character as usize]
    } else {
        INVALID
    };
    if digit == INVALID {
        return Err(DomainError::InvalidEncoding {
            character,
            position,
        });
    }
    Ok(digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn alphabet_has_65_distinct_symbols() {
        let mut seen = std::collections::HashSet::new();
        assert!(ALPHABET.iter().all(|b| seen.insert(*b)));
        assert_eq!(RADIX, 65);
        assert_eq!(ALPHABET[0], b'A');
        assert_eq!(ALPHABET[26], b'a');
        assert_eq!(ALPHABET[52], b'0');
        assert_eq!(&ALPHABET[62..], b"+-?");
    }

    #[test]
    fn zero_encodes_to_first_symbol() {
        assert_eq!(encode(&[]), "A");
        assert_eq!(encode(&[0]), "A");
        assert_eq!(encode(&[0, 0, 0, 0]), "A");
        assert_eq!(encode_biguint(&BigUint::zero()), "A");
    }

    #[test]
    fn single_digit_values() {
        assert_eq!(encode(&[1]), "B");
        assert_eq!(encode(&[25]), "Z");
        assert_eq!(encode(&[26]), "a");
        assert_eq!(encode(&[64]), "?");
        // 65 = 1 * 65 + 0
        assert_eq!(encode(&[65]), "BA");
    }

    #[test]
    fn leading_zero_bytes_do_not_change_encoding() {
        assert_eq!(encode(&[0, 0, 1, 0]), encode(&[1, 0]));
    }

    #[test]
    fn two_byte_value_256() {
        // 256 = 3 * 65 + 61 -> "D" + "9"
        let encoded = encode(&[0x01, 0x00]);
        assert_eq!(encoded, "D9");
        let decoded = decode(&encoded).unwrap();
        assert_eq!(BigUint::from_bytes_be(&decoded), BigUint::from(256u32));
        assert_eq!(decoded, vec![0x01, 0x00]);
    }

    #[test]
    fn decode_strips_to_minimal_bytes() {
        assert_eq!(decode("A").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("AAAB").unwrap(), vec![1]);
        // 0x80 在有符号表示下需要额外的 0 字节，这里不应出现
        assert_eq!(decode(&encode(&[0x80])).unwrap(), vec![0x80]);
        assert_eq!(decode(&encode(&[0xff, 0xff])).unwrap(), vec![0xff, 0xff]);
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        for input in ["AB=C", "A B", "_", "Aé", "AB/"] {
            let err = decode(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEncoding, "input {input:?}");
        }

        match decode("AB=C").unwrap_err() {
            DomainError::InvalidEncoding {
                character,
                position,
            } => {
                assert_eq!(character, '=');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn max_u128_round_trips() {
        let bytes = u128::MAX.to_be_bytes();
        let encoded = encode(&bytes);
        assert_eq!(encoded.len(), 22);
        assert_eq!(decode(&encoded).unwrap(), bytes.to_vec());
    }

    #[test]
    fn codec_is_unbounded() {
        let bytes = vec![0xab; 1024];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }
}
