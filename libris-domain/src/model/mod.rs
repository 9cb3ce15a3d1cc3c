//! 聚合模型（model）
//!
//! 作者、图书与读者三个可变聚合，以及它们共用的值对象。
//! 每个聚合通过 `#[entity]` 获得标识与版本，并实现 `VersionedEntity` 的字段校验与落地；
//! 带照片的聚合额外实现 `OptionalResource`。
//!
mod author;
mod book;
mod name;
mod photo;
mod reader;

pub use author::{Author, AuthorChanges, AuthorNumber, AuthorPatch, Bio};
pub use book::{Book, BookChanges, BookId, BookPatch, Description, Genre, Isbn, Title};
pub use name::Name;
pub use photo::Photo;
pub use reader::{Consents, PhoneNumber, Reader, ReaderChanges, ReaderNumber, ReaderPatch};

use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;

/// 文本字段的通用规则：非空白且不超过 `max_chars` 个字符
pub(crate) fn check_text(
    field: &'static str,
    label: &str,
    value: &str,
    max_chars: usize,
) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_field(
            field,
            format!("{label} cannot be blank"),
        ));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::invalid_field(
            field,
            format!("{label} has a maximum of {max_chars} characters"),
        ));
    }
    Ok(())
}

/// 将补丁值写入字段，返回该字段是否被提供（与当前值相同也算）
pub(crate) fn assign<T>(slot: &mut T, patch: Patch<T>) -> bool {
    match patch {
        Patch::Present(value) => {
            *slot = value;
            true
        }
        Patch::Absent => false,
    }
}

/// 可选照片补丁的校验：`Present(None)` 清除，`Present(Some(uri))` 替换
pub(crate) fn validate_photo(patch: Patch<Option<String>>) -> DomainResult<Patch<Option<Photo>>> {
    patch.try_map(|uri| uri.map(Photo::new).transpose())
}
