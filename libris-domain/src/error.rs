//! 领域层统一错误定义
//!
//! 覆盖编码、熵源、字段校验与版本冲突四类核心错误，
//! 调用方通过 `DomainError::kind` 以编程方式区分，而非解析错误信息。
//!
use crate::value_object::Version;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 编码 ---
    #[error("invalid base65 character {character:?} at position {position}")]
    InvalidEncoding { character: char, position: usize },

    // --- 熵源 ---
    #[error("entropy unavailable: {reason}")]
    EntropyUnavailable { reason: String },

    // --- 字段校验 ---
    #[error("invalid field: field={field}, reason={reason}")]
    InvalidField { field: &'static str, reason: String },

    // --- 乐观并发 ---
    #[error("object was already modified by another user: expected={expected}, actual={actual}")]
    StaleVersion { expected: Version, actual: Version },
    #[error("provided version does not match latest version: expected={expected}, actual={actual}")]
    Conflict { expected: Version, actual: Version },
    #[error("version counter exhausted at {actual}")]
    VersionOverflow { actual: Version },

    // --- 通用 ---
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

/// 错误类别，供边界层决定“重新加载后重试”还是“修正输入”
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEncoding,
    EntropyUnavailable,
    InvalidField,
    VersionConflict,
    VersionOverflow,
    Parse,
    NotFound,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::EntropyUnavailable { .. } => ErrorKind::EntropyUnavailable,
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::StaleVersion { .. } | Self::Conflict { .. } => ErrorKind::VersionConflict,
            Self::VersionOverflow { .. } => ErrorKind::VersionOverflow,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// 是否为版本冲突（StaleVersion 或 Conflict）
    pub fn is_version_conflict(&self) -> bool {
        self.kind() == ErrorKind::VersionConflict
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
