//! Core types shared by filers and file handles.

use std::time::SystemTime;

use crate::FileMode;

/// Metadata snapshot for a filesystem entry.
///
/// Produced fresh by every `stat`; nothing caches it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Base name of the entry (no directory part).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Type and permission bits.
    pub mode: FileMode,
    /// Last modification time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub modified: SystemTime,
}

impl Metadata {
    /// Returns `true` if this entry is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Returns `true` if this entry is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.mode.is_regular()
    }

    /// The permission bits of the entry.
    #[inline]
    pub fn permissions(&self) -> FileMode {
        self.mode.permissions()
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: 0,
            mode: FileMode::DEFAULT_FILE,
            modified: SystemTime::UNIX_EPOCH,
        }
    }
}

/// Serde support for SystemTime (when serde feature is enabled).
#[cfg(feature = "serde")]
mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (u64, u32) = Deserialize::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::new(secs, nanos))
    }
}
