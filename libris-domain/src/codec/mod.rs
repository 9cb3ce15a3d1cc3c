//! 编解码（codec）
//!
//! 目前仅包含 `base65`：任意精度无符号整数与 65 字符字母表之间的可逆映射，
//! 供 `RandomBase65` 标识生成器使用。
//!
pub mod base65;
