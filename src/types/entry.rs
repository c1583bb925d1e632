/*!
 * Directory Entry
 * Entries returned by `read_dir`
 */

use super::file_type::FileType;
use super::FsError;
use serde::{Deserialize, Deserializer, Serialize};

/// Directory entry
///
/// Entry names must be non-empty and cannot contain null bytes or path separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    #[serde(deserialize_with = "deserialize_valid_filename")]
    pub name: String,
    #[serde(default)]
    pub file_type: FileType,
}

impl Entry {
    /// Create a new directory entry with validation
    #[must_use = "validation result must be checked"]
    pub fn new(name: impl Into<String>, file_type: FileType) -> Result<Self, FsError> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self { name, file_type })
    }

    /// Create an entry for a name the host already produced
    pub(crate) fn new_unchecked(name: String, file_type: FileType) -> Self {
        Self { name, file_type }
    }

    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }

    /// Validate entry name
    pub fn validate_name(name: &str) -> Result<(), FsError> {
        match name_problem(name) {
            Some(problem) => Err(FsError::InvalidArgument(problem.into())),
            None => Ok(()),
        }
    }
}

fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("entry name cannot be empty")
    } else if name.contains('\0') {
        Some("entry name cannot contain null bytes")
    } else if name.contains('/') || name.contains('\\') {
        Some("entry name cannot contain path separators")
    } else {
        None
    }
}

fn deserialize_valid_filename<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    match name_problem(&name) {
        Some(problem) => Err(serde::de::Error::custom(problem)),
        None => Ok(name),
    }
}
