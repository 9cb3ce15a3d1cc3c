use libris_domain::error::{DomainError, ErrorKind};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("aggregate not found: type={aggregate}, id={id}")]
    AggregateNotFound { aggregate: &'static str, id: String },

    #[error("config: {0}")]
    Config(String),
}

impl AppError {
    /// 错误类别；未找到聚合归入 `NotFound`，配置错误归入 `Parse`
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::AggregateNotFound { .. } => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Parse,
        }
    }

    /// 调用方应重新读取最新状态后再决定是否重试
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::VersionConflict
    }
}

pub type AppResult<T> = Result<T, AppError>;
