/*!
 * Open Flags
 * Access and creation flags for `open_file`
 */

use super::FsError;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;

/// File open flags
///
/// Only true flags are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct OpenFlags {
    #[serde(skip_serializing_if = "is_false")]
    pub read: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub write: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub append: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub truncate: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_new: bool,
}

impl OpenFlags {
    #[inline]
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn write_only() -> Self {
        Self {
            write: true,
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn read_write() -> Self {
        Self {
            read: true,
            write: true,
            ..Default::default()
        }
    }

    /// Write, creating the file if needed and truncating it (what `create` uses)
    #[inline]
    #[must_use]
    pub fn create_truncate() -> Self {
        Self {
            read: true,
            write: true,
            create: true,
            truncate: true,
            ..Default::default()
        }
    }

    /// Write, failing if the file already exists
    #[inline]
    #[must_use]
    pub fn create_new() -> Self {
        Self {
            write: true,
            create_new: true,
            ..Default::default()
        }
    }

    /// Append, creating the file if needed
    #[inline]
    #[must_use]
    pub fn append_only() -> Self {
        Self {
            write: true,
            append: true,
            create: true,
            ..Default::default()
        }
    }

    /// Check if any write operation is possible
    #[inline]
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.write || self.append
    }

    /// Check if this will create a file
    #[inline]
    #[must_use]
    pub const fn will_create(&self) -> bool {
        self.create || self.create_new
    }

    /// Validate flag combinations
    pub fn validate(&self) -> Result<(), FsError> {
        if !self.read && !self.is_writable() {
            return Err(FsError::InvalidArgument(
                "open flags grant neither read nor write access".into(),
            ));
        }
        if self.will_create() && !self.is_writable() {
            return Err(FsError::InvalidArgument(
                "create requires write access".into(),
            ));
        }
        if self.truncate && !self.write {
            return Err(FsError::InvalidArgument(
                "truncate requires write flag".into(),
            ));
        }
        if self.append && self.truncate {
            return Err(FsError::InvalidArgument(
                "cannot use both append and truncate".into(),
            ));
        }
        Ok(())
    }

    /// Host open options carrying these flags
    pub fn to_open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .append(self.append)
            .truncate(self.truncate)
            .create(self.create)
            .create_new(self.create_new);
        options
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
