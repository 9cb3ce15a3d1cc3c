use libris_macros::{entity, entity_id, value_object};
use serde::{Deserialize, Serialize};

use super::{Genre, Name, Photo, assign, validate_photo};
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::value_object::{ValueObject, Version};
use crate::versioned::{OptionalResource, VersionedEntity};

/// 读者编号
#[entity_id]
pub struct ReaderNumber(String);

/// 电话号码：可选前导 `+`，其后为 9 到 15 位数字
#[value_object(default = false, validate = true)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const MIN_DIGITS: usize = 9;
    pub const MAX_DIGITS: usize = 15;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let phone = Self(value.into());
        phone.validate()?;
        Ok(phone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PhoneNumber {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let digits = self.0.strip_prefix('+').unwrap_or(&self.0);
        let valid = (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(DomainError::invalid_field(
                "phoneNumber",
                format!("Invalid phone number: {}", self.0),
            ));
        }
        Ok(())
    }
}

/// 读者聚合
#[entity(id = ReaderNumber)]
pub struct Reader {
    name: Name,
    phone_number: PhoneNumber,
    gdpr_consent: bool,
    marketing_consent: bool,
    third_party_sharing_consent: bool,
    interests: Vec<Genre>,
    photo: Option<Photo>,
}

/// 读者创建时的同意选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consents {
    pub gdpr: bool,
    pub marketing: bool,
    pub third_party_sharing: bool,
}

impl Reader {
    /// 创建读者，GDPR 同意为必需项
    pub fn new(
        id: ReaderNumber,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        consents: Consents,
        interests: Vec<Genre>,
        photo: Option<String>,
    ) -> DomainResult<Self> {
        if !consents.gdpr {
            return Err(DomainError::invalid_field(
                "gdprConsent",
                "Readers must consent to GDPR data processing",
            ));
        }
        Ok(Self {
            id,
            version: Version::new(),
            name: Name::new(name)?,
            phone_number: PhoneNumber::new(phone_number)?,
            gdpr_consent: true,
            marketing_consent: consents.marketing,
            third_party_sharing_consent: consents.third_party_sharing,
            interests: dedup_interests(interests),
            photo: photo.map(Photo::new).transpose()?,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn gdpr_consent(&self) -> bool {
        self.gdpr_consent
    }

    pub fn marketing_consent(&self) -> bool {
        self.marketing_consent
    }

    pub fn third_party_sharing_consent(&self) -> bool {
        self.third_party_sharing_consent
    }

    pub fn interests(&self) -> &[Genre] {
        &self.interests
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    /// 以期望版本移除头像
    pub fn remove_photo(&mut self, expected: Version) -> DomainResult<Version> {
        self.remove_optional_resource(expected)
    }
}

// 保留首次出现的顺序
fn dedup_interests(interests: Vec<Genre>) -> Vec<Genre> {
    let mut unique: Vec<Genre> = Vec::with_capacity(interests.len());
    for genre in interests {
        if !unique.contains(&genre) {
            unique.push(genre);
        }
    }
    unique
}

/// 读者更新请求；GDPR 同意不可通过补丁撤回
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub phone_number: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub marketing_consent: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub third_party_sharing_consent: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub interests: Patch<Vec<String>>,
    #[serde(rename = "photoURI", skip_serializing_if = "Patch::is_absent")]
    pub photo: Patch<Option<String>>,
}

/// 已校验的读者变更
#[derive(Debug)]
pub struct ReaderChanges {
    name: Patch<Name>,
    phone_number: Patch<PhoneNumber>,
    marketing_consent: Patch<bool>,
    third_party_sharing_consent: Patch<bool>,
    interests: Patch<Vec<Genre>>,
    photo: Patch<Option<Photo>>,
}

impl VersionedEntity for Reader {
    const TYPE: &'static str = "reader";
    type Patch = ReaderPatch;
    type Changes = ReaderChanges;

    fn validate_patch(&self, patch: ReaderPatch) -> DomainResult<ReaderChanges> {
        Ok(ReaderChanges {
            name: patch.name.try_map(Name::new)?,
            phone_number: patch.phone_number.try_map(PhoneNumber::new)?,
            marketing_consent: patch.marketing_consent,
            third_party_sharing_consent: patch.third_party_sharing_consent,
            interests: patch.interests.try_map(|names| {
                names
                    .into_iter()
                    .map(Genre::new)
                    .collect::<DomainResult<Vec<_>>>()
                    .map(dedup_interests)
            })?,
            photo: validate_photo(patch.photo)?,
        })
    }

    fn commit_changes(&mut self, changes: ReaderChanges) -> bool {
        assign(&mut self.name, changes.name)
            | assign(&mut self.phone_number, changes.phone_number)
            | assign(&mut self.marketing_consent, changes.marketing_consent)
            | assign(
                &mut self.third_party_sharing_consent,
                changes.third_party_sharing_consent,
            )
            | assign(&mut self.interests, changes.interests)
            | assign(&mut self.photo, changes.photo)
    }
}

impl OptionalResource for Reader {
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

    fn consents() -> Consents {
        Consents {
            gdpr: true,
            ..Default::default()
        }
    }

    fn reader() -> Reader {
        Reader::new(
            ReaderNumber::new("2024/1".into()),
            "Maria",
            "+351912345678",
            consents(),
            vec![Genre::new("Fantasy").unwrap()],
            None,
        )
        .unwrap()
    }

    #[test]
    fn phone_numbers() {
        for ok in ["912345678", "+351912345678", "123456789012345"] {
            assert!(PhoneNumber::new(ok).is_ok(), "{ok}");
        }
        for bad in ["12345678", "1234567890123456", "+35191234567a", "", "+"] {
            assert!(PhoneNumber::new(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn gdpr_consent_is_required() {
        let err = Reader::new(
            ReaderNumber::new("r".into()),
            "Maria",
            "912345678",
            Consents::default(),
            vec![],
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[test]
    fn patch_consents_and_interests() {
        let mut r = reader();
        let patch = ReaderPatch {
            marketing_consent: true.into(),
            interests: vec!["Horror".to_string(), "Horror".to_string(), "Romance".to_string()]
                .into(),
            ..Default::default()
        };
        assert_eq!(r.apply_patch(Version::new(), patch).unwrap(), Version::from_value(1));
        assert!(r.marketing_consent());
        assert!(r.gdpr_consent());
        let interests: Vec<&str> = r.interests().iter().map(Genre::as_str).collect();
        assert_eq!(interests, ["Horror", "Romance"]);
    }

    #[test]
    fn invalid_phone_rejects_whole_patch() {
        let mut r = reader();
        let patch = ReaderPatch {
            name: "Joana".to_string().into(),
            phone_number: "abc".to_string().into(),
            ..Default::default()
        };
        assert!(r.apply_patch(Version::new(), patch).is_err());
        assert_eq!(r.name().as_str(), "Maria");
        assert!(r.version().is_new());
    }

    #[test]
    fn patch_from_camel_case_json() {
        let patch: ReaderPatch = serde_json::from_str(
            r#"{"phoneNumber": "912345678", "thirdPartySharingConsent": true, "photoURI": null}"#,
        )
        .unwrap();
        assert_eq!(patch.phone_number, Patch::Present("912345678".to_string()));
        assert_eq!(patch.third_party_sharing_consent, Patch::Present(true));
        assert_eq!(patch.photo, Patch::Present(None));
        assert!(patch.name.is_absent());
    }

    #[test]
    fn remove_photo_after_patch() {
        let mut r = reader();
        r.apply_patch(
            Version::new(),
            ReaderPatch {
                photo: Patch::Present(Some("readers/r.jpg".into())),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(r.remove_photo(Version::new()).unwrap_err().is_version_conflict());
        assert_eq!(r.remove_photo(Version::from_value(1)).unwrap(), Version::from_value(2));
        assert_eq!(r.remove_photo(Version::from_value(2)).unwrap(), Version::from_value(2));
    }
}
