use libris_macros::{entity, entity_id, value_object};
use serde::{Deserialize, Serialize};

use super::{Name, Photo, assign, check_text, validate_photo};
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::value_object::{ValueObject, Version};
use crate::versioned::{OptionalResource, VersionedEntity};

/// 作者编号（由 `IdGenerator` 生成）
#[entity_id]
pub struct AuthorNumber(String);

/// 作者简介：非空白，最多 4096 个字符
#[value_object(default = false, validate = true)]
pub struct Bio(String);

impl Bio {
    pub const MAX_CHARS: usize = 4096;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let bio = Self(value.into());
        bio.validate()?;
        Ok(bio)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Bio {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        check_text("bio", "Bio", &self.0, Self::MAX_CHARS)
    }
}

/// 作者聚合
#[entity(id = AuthorNumber)]
pub struct Author {
    name: Name,
    bio: Bio,
    photo: Option<Photo>,
}

impl Author {
    /// 以新分配的编号创建作者，版本为 0
    pub fn new(
        id: AuthorNumber,
        name: impl Into<String>,
        bio: impl Into<String>,
        photo: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            version: Version::new(),
            name: Name::new(name)?,
            bio: Bio::new(bio)?,
            photo: photo.map(Photo::new).transpose()?,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn bio(&self) -> &Bio {
        &self.bio
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    /// 以期望版本移除照片，见 `OptionalResource::remove_optional_resource`
    pub fn remove_photo(&mut self, expected: Version) -> DomainResult<Version> {
        self.remove_optional_resource(expected)
    }
}

/// 作者更新请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub bio: Patch<String>,
    /// `null` 清除照片
    #[serde(rename = "photoURI", skip_serializing_if = "Patch::is_absent")]
    pub photo: Patch<Option<String>>,
}

/// 已校验的作者变更
#[derive(Debug)]
pub struct AuthorChanges {
    name: Patch<Name>,
    bio: Patch<Bio>,
    photo: Patch<Option<Photo>>,
}

impl VersionedEntity for Author {
    const TYPE: &'static str = "author";
    type Patch = AuthorPatch;
    type Changes = AuthorChanges;

    fn validate_patch(&self, patch: AuthorPatch) -> DomainResult<AuthorChanges> {
        Ok(AuthorChanges {
            name: patch.name.try_map(Name::new)?,
            bio: patch.bio.try_map(Bio::new)?,
            photo: validate_photo(patch.photo)?,
        })
    }

    fn commit_changes(&mut self, changes: AuthorChanges) -> bool {
        assign(&mut self.name, changes.name)
            | assign(&mut self.bio, changes.bio)
            | assign(&mut self.photo, changes.photo)
    }
}

impl OptionalResource for Author {
    type Resource = Photo;

    fn take_resource(&mut self) -> Option<Photo> {
        self.photo.take()
    }
}
