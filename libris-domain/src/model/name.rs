use libris_macros::value_object;

use super::check_text;
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 人名（作者、读者）：非空白，最多 150 个字符
#[value_object(default = false, validate = true)]
pub struct Name(String);

impl Name {
    pub const MAX_CHARS: usize = 150;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let name = Self(value.into());
        name.validate()?;
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Name {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        check_text("name", "Name", &self.0, Self::MAX_CHARS)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
