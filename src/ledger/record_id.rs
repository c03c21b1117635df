use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

const SHORT_ID_LEN: usize = 5;

/// Opaque record identifier.
///
/// Browser-era documents stored numeric ids, so deserialization accepts both
/// JSON numbers and strings. Ids always serialize back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// An id that [`crate::core::store::Store::append`] will replace.
    pub fn blank() -> Self {
        Self(String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing characters used in compact listings.
    pub fn short(&self) -> &str {
        let count = self.0.chars().count();
        if count <= SHORT_ID_LEN {
            return &self.0;
        }
        let skip = count - SHORT_ID_LEN;
        let start = self
            .0
            .char_indices()
            .nth(skip)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordIdVisitor;

        impl<'de> de::Visitor<'de> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric record id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RecordId, E> {
                Ok(RecordId::new(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<RecordId, E> {
                Ok(RecordId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<RecordId, E> {
                Ok(RecordId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<RecordId, E> {
                Ok(RecordId(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<RecordId, E> {
                Ok(RecordId(value.to_string()))
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}
