//! 稀疏补丁字段
//!
//! `Patch<T>` 区分“未提供”（`Absent`，不做修改）与“提供了值”（`Present`）。
//! 可移除的字段使用 `Patch<Option<T>>`，`Present(None)` 表示清除该值。
//!
//! 与 serde 配合时，字段需标注 `#[serde(default)]`：缺失的键反序列化为 `Absent`，
//! 显式的 `null` 在 `Patch<Option<T>>` 上反序列化为 `Present(None)`。
//!
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 补丁中的单个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Patch<T> {
    /// 未提供，不修改
    Absent,
    /// 提供了新值
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Present(value) => Patch::Present(value),
        }
    }

    pub fn map<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Patch::Absent,
            Self::Present(value) => Patch::Present(f(value)),
        }
    }

    /// 对提供的值做可能失败的转换（通常是字段校验）
    pub fn try_map<U, E, F>(self, f: F) -> Result<Patch<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Self::Absent => Ok(Patch::Absent),
            Self::Present(value) => f(value).map(Patch::Present),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }

    /// 将不可移除字段的可选输入视为补丁：`None` 即未提供
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // 由 skip_serializing_if = "Patch::is_absent" 跳过；单独序列化时输出 null
            Self::Absent => serializer.serialize_none(),
            Self::Present(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Present)
    }
}
