use std::fmt;

use super::{RecordingId, UserId};

/// Opaque key into the object store for a recording's normalized audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(user_id: &UserId, recording_id: &RecordingId) -> Self {
        Self(format!("{}/{}.wav", user_id, recording_id.as_uuid()))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
