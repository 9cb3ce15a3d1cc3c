//! 聚合工厂
//!
//! 从注入的 `IdGenerator` 取得标识，再以校验过的构造函数创建版本为 0 的聚合。
//! 创建请求使用 `bon` 构建，也可直接从 JSON 反序列化。
//!
use std::sync::Arc;

use bon::Builder;
use libris_domain::id_generator::IdGenerator;
use libris_domain::model::{
    Author, AuthorNumber, Book, BookId, Consents, Genre, Isbn, Reader, ReaderNumber,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppResult;

/// 创建作者
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub bio: String,
    #[builder(into)]
    #[serde(default, rename = "photoURI")]
    pub photo: Option<String>,
}

/// 创建图书
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[builder(into)]
    pub isbn: String,
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    #[serde(default)]
    pub description: Option<String>,
    #[builder(into)]
    pub genre: String,
    pub authors: Vec<AuthorNumber>,
    #[builder(into)]
    #[serde(default, rename = "photoURI")]
    pub photo: Option<String>,
}

/// 创建读者
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReader {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub phone_number: String,
    pub gdpr_consent: bool,
    #[builder(default)]
    #[serde(default)]
    pub marketing_consent: bool,
    #[builder(default)]
    #[serde(default)]
    pub third_party_sharing_consent: bool,
    #[builder(default)]
    #[serde(default)]
    pub interests: Vec<String>,
    #[builder(into)]
    #[serde(default, rename = "photoURI")]
    pub photo: Option<String>,
}

#[derive(Clone)]
pub struct AuthorFactory {
    ids: Arc<dyn IdGenerator>,
}

impl AuthorFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create(&self, request: CreateAuthor) -> AppResult<Author> {
        let id = AuthorNumber::new(self.ids.generate_id()?);
        debug!(%id, "creating author");
        Ok(Author::new(id, request.name, request.bio, request.photo)?)
    }
}

#[derive(Clone)]
pub struct BookFactory {
    ids: Arc<dyn IdGenerator>,
}

impl BookFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// 字段先于标识校验，非法请求不会消耗标识
    pub fn create(&self, request: CreateBook) -> AppResult<Book> {
        let isbn = Isbn::new(&request.isbn)?;
        let genre = Genre::new(request.genre)?;
        let id = BookId::new(self.ids.generate_id()?);
        debug!(%id, isbn = isbn.as_str(), "creating book");
        Ok(Book::new(
            id,
            isbn,
            request.title,
            request.description,
            genre,
            request.authors,
            request.photo,
        )?)
    }
}

#[derive(Clone)]
pub struct ReaderFactory {
    ids: Arc<dyn IdGenerator>,
}

impl ReaderFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create(&self, request: CreateReader) -> AppResult<Reader> {
        let interests = request
            .interests
            .into_iter()
            .map(Genre::new)
            .collect::<Result<Vec<_>, _>>()?;
        let id = ReaderNumber::new(self.ids.generate_id()?);
        debug!(%id, "creating reader");
        Ok(Reader::new(
            id,
            request.name,
            request.phone_number,
            Consents {
                gdpr: request.gdpr_consent,
                marketing: request.marketing_consent,
                third_party_sharing: request.third_party_sharing_consent,
            },
            interests,
            request.photo,
        )?)
    }
}
