use libris_macros::value_object;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// 照片引用（存储路径或 URI），文件本身由外部存储负责
#[value_object(default = false, validate = true)]
pub struct Photo(String);

impl Photo {
    pub const MAX_CHARS: usize = 255;

    pub fn new(uri: impl Into<String>) -> DomainResult<Self> {
        let photo = Self(uri.into());
        photo.validate()?;
        Ok(photo)
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Photo {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_field("photo", "Photo path cannot be blank"));
        }
        if self.0.chars().any(char::is_control) {
            return Err(DomainError::invalid_field(
                "photo",
                "Photo path contains control characters",
            ));
        }
        if self.0.chars().count() > Self::MAX_CHARS {
            return Err(DomainError::invalid_field(
                "photo",
                format!("Photo path has a maximum of {} characters", Self::MAX_CHARS),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_paths() {
        assert_eq!(Photo::new("authors/a-1.jpg").unwrap().uri(), "authors/a-1.jpg");
        assert!(Photo::new(" ").is_err());
        assert!(Photo::new("\0invalid").is_err());
        assert!(Photo::new("x".repeat(256)).is_err());
    }
}
