/*!
 * Filesystem Traits
 * Base read contract plus optional, dynamically probed capabilities
 */

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::types::*;

/// Base filesystem contract
///
/// Every backend handed out by a provider implements this trait. Paths are
/// interpreted relative to the handle's own root. Optional capabilities are
/// discovered at runtime through [`FileSystem::as_writeable`] and
/// [`FileSystem::as_current_path`]; a backend that does not override them
/// reports the capability as absent.
pub trait FileSystem: Send + Sync {
    /// Open a file for reading
    fn open(&self, path: &Path) -> FsResult<Box<dyn File>>;

    /// Get metadata, following symlinks
    fn stat(&self, path: &Path) -> FsResult<Metadata>;

    /// List directory contents, sorted by name
    fn read_dir(&self, path: &Path) -> FsResult<Vec<Entry>>;

    /// Read entire file contents
    ///
    /// The default reads through [`FileSystem::open`].
    fn read_file(&self, path: &Path) -> FsResult<Vec<u8>> {
        let mut file = self.open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Paths matching a shell pattern
    ///
    /// A malformed pattern is the only error; unreadable directories are skipped.
    fn glob(&self, pattern: &str) -> FsResult<Vec<String>>;

    /// New handle rooted at `path` relative to this one
    fn sub(&self, path: &Path) -> FsResult<Box<dyn FileSystem>>;

    /// Check if file/directory exists
    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    /// Backend label for diagnostics
    fn name(&self) -> &str;

    /// Writeable capability, if this backend supports mutation
    fn as_writeable(&self) -> Option<&dyn WriteableFileSystem> {
        None
    }

    /// Current-path capability, if this backend can report its root
    fn as_current_path(&self) -> Option<&dyn CurrentPathFileSystem> {
        None
    }
}

/// Mutation capability
pub trait WriteableFileSystem: FileSystem {
    /// Open with explicit flags; `perm` applies when the file is created
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> FsResult<Box<dyn WriteableFile>>;

    /// Create or truncate a file, opened read-write
    fn create(&self, path: &Path) -> FsResult<Box<dyn WriteableFile>> {
        self.open_file(path, OpenFlags::create_truncate(), Permissions::new(0o666))
    }

    /// Create a single directory
    fn mkdir(&self, path: &Path, perm: Permissions) -> FsResult<()>;

    /// Create a directory and any missing parents
    fn mkdir_all(&self, path: &Path, perm: Permissions) -> FsResult<()>;

    /// Remove a file or an empty directory
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Remove a path and everything below it; a missing path is not an error
    fn remove_all(&self, path: &Path) -> FsResult<()>;

    /// Move/rename a file or directory
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;
}

/// Root-reporting capability
pub trait CurrentPathFileSystem: FileSystem {
    /// The backend's notion of its own root
    fn current_path(&self) -> String;
}

/// Readable open file
///
/// Closed when dropped.
pub trait File: Read + Seek + Send {
    /// Metadata of the open file
    fn stat(&self) -> FsResult<Metadata>;
}

/// Writeable open file
///
/// Dropping releases the handle on every path; [`WriteableFile::close`]
/// additionally flushes and reports the flush result.
pub trait WriteableFile: File + Write {
    /// Sync file data to storage
    fn sync(&mut self) -> FsResult<()>;

    /// Flush and release
    fn close(self: Box<Self>) -> FsResult<()>;
}

/// Probe a handle for the writeable capability
#[inline]
pub fn writeable(fs: &dyn FileSystem) -> Option<&dyn WriteableFileSystem> {
    fs.as_writeable()
}

/// Root reported by a handle, if it supports the current-path capability
#[inline]
pub fn current_path(fs: &dyn FileSystem) -> Option<String> {
    fs.as_current_path().map(|cp| cp.current_path())
}
