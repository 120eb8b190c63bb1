use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

const MAX_KEY_LEN: usize = 512;

/// A validated object key: a relative, `/`-separated path such as
/// `site-images/galeria/0192f3c1-....jpg`.
///
/// Segments are non-empty, never `.` or `..`, never start with a dot, and
/// only contain ASCII letters, digits, `-`, `_` and `.`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".into()));
        }
        if s.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey(format!(
                "key longer than {MAX_KEY_LEN} bytes"
            )));
        }
        for segment in s.split('/') {
            if segment.is_empty() {
                return Err(StorageError::InvalidKey("empty path segment".into()));
            }
            if segment.starts_with('.') {
                return Err(StorageError::InvalidKey(format!(
                    "segment '{segment}' starts with a dot"
                )));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(StorageError::InvalidKey(format!(
                    "segment '{segment}' contains unsupported characters"
                )));
            }
        }
        Ok(Self(s.to_string()))
    }

    /// A fresh key `{prefix}/{uuid}.{ext}` for an upload.
    pub fn generate(prefix: &str, extension: &str) -> Result<Self, StorageError> {
        Self::parse(&format!(
            "{prefix}/{}.{}",
            uuid::Uuid::now_v7(),
            extension.to_ascii_lowercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as a relative filesystem path.
    pub fn to_relative_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BlobKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BlobKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
