use std::collections::HashSet;

use libris_macros::{entity, entity_id, value_object};
use serde::{Deserialize, Serialize};

use super::{AuthorNumber, Photo, assign, check_text, validate_photo};
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::value_object::{ValueObject, Version};
use crate::versioned::{OptionalResource, VersionedEntity};

/// 图书标识（由 `IdGenerator` 生成）
#[entity_id]
pub struct BookId(String);

/// ISBN-10 或 ISBN-13，构造时去除连字符与空格并校验校验位
#[value_object(default = false, validate = true)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let normalized: String = value
            .as_ref()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let isbn = Self(normalized);
        isbn.validate()?;
        Ok(isbn)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Isbn {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let valid = match self.0.len() {
            10 => is_valid_isbn10(&self.0),
            13 => is_valid_isbn13(&self.0),
            _ => false,
        };
        if !valid {
            return Err(DomainError::invalid_field(
                "isbn",
                format!("Invalid ISBN: {}", self.0),
            ));
        }
        Ok(())
    }
}

fn is_valid_isbn10(isbn: &str) -> bool {
    let mut sum = 0;
    for (i, c) in isbn.chars().enumerate() {
        let digit = match (i, c) {
            (9, 'X') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += (10 - i as u32) * digit;
    }
    sum % 11 == 0
}

fn is_valid_isbn13(isbn: &str) -> bool {
    let mut sum = 0;
    for (i, c) in isbn.chars().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}

/// 书名：非空白，最多 128 个字符
#[value_object(default = false, validate = true)]
pub struct Title(String);

impl Title {
    pub const MAX_CHARS: usize = 128;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let title = Self(value.into());
        title.validate()?;
        Ok(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Title {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        check_text("title", "Title", &self.0, Self::MAX_CHARS)
    }
}

/// 图书描述：可选；提供时非空白，最多 4096 个字符
#[value_object(default = false, validate = true)]
pub struct Description(String);

impl Description {
    pub const MAX_CHARS: usize = 4096;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let description = Self(value.into());
        description.validate()?;
        Ok(description)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Description {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        check_text("description", "Description", &self.0, Self::MAX_CHARS)
    }
}

/// 类别名称：非空白，最多 100 个字符
#[value_object(default = false, validate = true)]
#[derive(Hash)]
pub struct Genre(String);

impl Genre {
    pub const MAX_CHARS: usize = 100;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let genre = Self(value.into());
        genre.validate()?;
        Ok(genre)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Genre {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        check_text("genre", "Genre", &self.0, Self::MAX_CHARS)
    }
}

// 作者列表：至少一位，且不重复
fn check_authors(authors: Vec<AuthorNumber>) -> DomainResult<Vec<AuthorNumber>> {
    if authors.is_empty() {
        return Err(DomainError::invalid_field(
            "authors",
            "A book must have at least one author",
        ));
    }
    let mut seen = HashSet::new();
    if let Some(duplicate) = authors.iter().find(|a| !seen.insert(*a)) {
        return Err(DomainError::invalid_field(
            "authors",
            format!("Author {duplicate} is listed more than once"),
        ));
    }
    Ok(authors)
}

/// 图书聚合
#[entity(id = BookId)]
pub struct Book {
    isbn: Isbn,
    title: Title,
    description: Option<Description>,
    genre: Genre,
    authors: Vec<AuthorNumber>,
    photo: Option<Photo>,
}

impl Book {
    /// 以新分配的标识创建图书，版本为 0
    pub fn new(
        id: BookId,
        isbn: Isbn,
        title: impl Into<String>,
        description: Option<String>,
        genre: Genre,
        authors: Vec<AuthorNumber>,
        photo: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            version: Version::new(),
            isbn,
            title: Title::new(title)?,
            description: description.map(Description::new).transpose()?,
            genre,
            authors: check_authors(authors)?,
            photo: photo.map(Photo::new).transpose()?,
        })
    }

    /// ISBN 在图书生命周期内不可变
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn genre(&self) -> &Genre {
        &self.genre
    }

    pub fn authors(&self) -> &[AuthorNumber] {
        &self.authors
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    /// 以期望版本移除封面照片
    pub fn remove_photo(&mut self, expected: Version) -> DomainResult<Version> {
        self.remove_optional_resource(expected)
    }
}

/// 图书更新请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    /// `null` 清除描述
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<Option<String>>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub genre: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub authors: Patch<Vec<AuthorNumber>>,
    /// `null` 清除照片
    #[serde(rename = "photoURI", skip_serializing_if = "Patch::is_absent")]
    pub photo: Patch<Option<String>>,
}

/// 已校验的图书变更
#[derive(Debug)]
pub struct BookChanges {
    title: Patch<Title>,
    description: Patch<Option<Description>>,
    genre: Patch<Genre>,
    authors: Patch<Vec<AuthorNumber>>,
    photo: Patch<Option<Photo>>,
}

impl VersionedEntity for Book {
    const TYPE: &'static str = "book";
    type Patch = BookPatch;
    type Changes = BookChanges;

    fn validate_patch(&self, patch: BookPatch) -> DomainResult<BookChanges> {
        Ok(BookChanges {
            title: patch.title.try_map(Title::new)?,
            description: patch
                .description
                .try_map(|d| d.map(Description::new).transpose())?,
            genre: patch.genre.try_map(Genre::new)?,
            authors: patch.authors.try_map(check_authors)?,
            photo: validate_photo(patch.photo)?,
        })
    }

    fn commit_changes(&mut self, changes: BookChanges) -> bool {
        assign(&mut self.title, changes.title)
            | assign(&mut self.description, changes.description)
            | assign(&mut self.genre, changes.genre)
            | assign(&mut self.authors, changes.authors)
            | assign(&mut self.photo, changes.photo)
    }
}

impl OptionalResource for Book {
    type Resource = Photo;

    fn take_resource(&mut self) -> Option<Photo> {
        self.photo.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::error::ErrorKind;

    fn author(n: &str) -> AuthorNumber {
        AuthorNumber::new(n.to_string())
    }

    fn book() -> Book {
        Book::new(
            BookId::new("1700000000000-00beef".into()),
            Isbn::new("978-0-306-40615-7").unwrap(),
            "Original Title",
            Some("Original Description".into()),
            Genre::new("Fantasy").unwrap(),
            vec![author("a-1")],
            None,
        )
        .unwrap()
    }

    #[test]
    fn isbn_validation() {
        assert_eq!(Isbn::new("978-0-306-40615-7").unwrap().as_str(), "9780306406157");
        assert!(Isbn::new("0306406152").is_ok());
        assert_eq!(Isbn::new("0-8044-2957-x").unwrap().as_str(), "080442957X");

        for bad in ["9780306406158", "0306406153", "12345", "97803064061X7", ""] {
            let err = Isbn::new(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidField, "{bad}");
        }
    }

    #[test]
    fn isbn_deserialization_checks_the_check_digit() {
        let isbn: Isbn = serde_json::from_str(r#""9780306406157""#).unwrap();
        assert_eq!(isbn.as_str(), "9780306406157");
        assert!(serde_json::from_str::<Isbn>(r#""9780306406158""#).is_err());
    }

    #[test]
    fn book_requires_authors() {
        let err = Book::new(
            BookId::new("b".into()),
            Isbn::new("0306406152").unwrap(),
            "T",
            None,
            Genre::new("Horror").unwrap(),
            vec![],
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[test]
    fn patch_title_and_description() {
        let mut b = book();
        let patch = BookPatch {
            title: "Updated Title".to_string().into(),
            description: Patch::Present(None),
            ..Default::default()
        };
        assert_eq!(b.apply_patch(Version::new(), patch).unwrap(), Version::from_value(1));
        assert_eq!(b.title().as_str(), "Updated Title");
        assert!(b.description().is_none());
        assert_eq!(b.isbn().as_str(), "9780306406157");
    }

    #[test]
    fn duplicate_authors_reject_the_patch() {
        let mut b = book();
        let patch = BookPatch {
            title: "Other".to_string().into(),
            authors: vec![author("a-1"), author("a-2"), author("a-1")].into(),
            ..Default::default()
        };
        let err = b.apply_patch(Version::new(), patch).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert_eq!(b.title().as_str(), "Original Title");
        assert_eq!(b.authors(), &[author("a-1")]);
        assert!(b.version().is_new());
    }

    #[test]
    fn version_increases_by_one_per_patch() {
        let mut b = book();
        for (i, genre) in ["Horror", "Romance", "Thriller"].iter().enumerate() {
            let patch = BookPatch {
                genre: genre.to_string().into(),
                ..Default::default()
            };
            let v = b.apply_patch(Version::from_value(i), patch).unwrap();
            assert_eq!(v, Version::from_value(i + 1));
        }
        assert_eq!(b.genre().as_str(), "Thriller");
    }

    #[test]
    fn photo_removal_uses_conflict() {
        let mut b = book();
        b.apply_patch(
            Version::new(),
            BookPatch {
                photo: Patch::Present(Some("covers/b.png".into())),
                ..Default::default()
            },
        )
        .unwrap();

        let err = b.remove_photo(Version::new()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(b.remove_photo(Version::from_value(1)).unwrap(), Version::from_value(2));
        assert!(b.photo().is_none());
    }
}
