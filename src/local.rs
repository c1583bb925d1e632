/*!
 * Local Filesystem Backend
 * Wraps std::fs for `file:` URLs
 */

use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

use tracing::trace;
use url::Url;

use crate::paths::root_for_url;
use crate::provider::ProviderFn;
use crate::traits::{CurrentPathFileSystem, File, FileSystem, WriteableFile, WriteableFileSystem};
use crate::types::*;

/// Registers [`LocalFs`] for the `file` scheme
pub static PROVIDER: ProviderFn = ProviderFn::new(construct, &["file"]);

fn construct(url: &Url) -> FsResult<Box<dyn FileSystem>> {
    Ok(Box::new(LocalFs::from_url(url)?))
}

/// Host filesystem rooted at a fixed path
///
/// Every argument path, absolute or relative, is joined under the root and
/// lexically cleaned, so `/a/../b` and `b` name the same file. `..` may still
/// climb above the root, as with a plain path join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// Create new local filesystem rooted at specified path
    ///
    /// An empty root means the process working directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Local filesystem for a `file:` URL
    ///
    /// Never touches the disk; a missing root surfaces on first use.
    pub fn from_url(url: &Url) -> FsResult<Self> {
        let root = root_for_url(url)?;
        trace!(url = %url, root = %root.display(), "local filesystem root");
        Ok(Self::new(root))
    }

    /// Root every operation resolves against
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve path under the root
    fn join(&self, path: &Path) -> PathBuf {
        let mut joined = self.root.clone();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                other => joined.push(other.as_os_str()),
            }
        }
        path_clean::clean(&joined)
    }

    fn base_name(path: &Path) -> String {
        match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        }
    }

    fn open_with(&self, path: &Path, options: &fs::OpenOptions) -> FsResult<LocalFile> {
        let full_path = self.join(path);
        let file = options.open(&full_path)?;
        Ok(LocalFile {
            file,
            name: Self::base_name(&full_path),
        })
    }

    #[cfg(unix)]
    fn dir_builder(perm: Permissions, recursive: bool) -> fs::DirBuilder {
        use std::os::unix::fs::DirBuilderExt;
        let mut builder = fs::DirBuilder::new();
        builder.recursive(recursive).mode(perm.mode);
        builder
    }

    #[cfg(not(unix))]
    fn dir_builder(_perm: Permissions, recursive: bool) -> fs::DirBuilder {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(recursive);
        builder
    }
}

impl FileSystem for LocalFs {
    fn open(&self, path: &Path) -> FsResult<Box<dyn File>> {
        let file = self.open_with(path, fs::OpenOptions::new().read(true))?;
        Ok(Box::new(file))
    }

    fn stat(&self, path: &Path) -> FsResult<Metadata> {
        let full_path = self.join(path);
        let md = fs::metadata(&full_path)?;
        Ok(Metadata::from_std(Self::base_name(&full_path), &md))
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<Entry>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(self.join(path))? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            result.push(Entry::new_unchecked(
                entry.file_name().to_string_lossy().into_owned(),
                file_type.into(),
            ));
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn read_file(&self, path: &Path) -> FsResult<Vec<u8>> {
        Ok(fs::read(self.join(path))?)
    }

    fn glob(&self, pattern: &str) -> FsResult<Vec<String>> {
        let full_pattern = self.join(Path::new(pattern));
        let matches = glob::glob(&full_pattern.to_string_lossy())?
            .filter_map(Result::ok)
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        Ok(matches)
    }

    fn sub(&self, path: &Path) -> FsResult<Box<dyn FileSystem>> {
        Ok(Box::new(Self::new(self.join(path))))
    }

    fn name(&self) -> &str {
        "local"
    }

    fn as_writeable(&self) -> Option<&dyn WriteableFileSystem> {
        Some(self)
    }

    fn as_current_path(&self) -> Option<&dyn CurrentPathFileSystem> {
        Some(self)
    }
}

impl WriteableFileSystem for LocalFs {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> FsResult<Box<dyn WriteableFile>> {
        flags.validate()?;
        let mut options = flags.to_open_options();

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(perm.mode);
        }
        #[cfg(not(unix))]
        let _ = perm;

        let file = self.open_with(path, &options)?;
        Ok(Box::new(file))
    }

    fn mkdir(&self, path: &Path, perm: Permissions) -> FsResult<()> {
        Ok(Self::dir_builder(perm, false).create(self.join(path))?)
    }

    fn mkdir_all(&self, path: &Path, perm: Permissions) -> FsResult<()> {
        Ok(Self::dir_builder(perm, true).create(self.join(path))?)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let full_path = self.join(path);
        match fs::symlink_metadata(&full_path) {
            Ok(md) if md.is_dir() => fs::remove_dir(&full_path)?,
            _ => fs::remove_file(&full_path)?,
        }
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> FsResult<()> {
        let full_path = self.join(path);
        let md = match fs::symlink_metadata(&full_path) {
            Ok(md) => md,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if md.is_dir() {
            fs::remove_dir_all(&full_path)?;
        } else {
            fs::remove_file(&full_path)?;
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        Ok(fs::rename(self.join(from), self.join(to))?)
    }
}

impl CurrentPathFileSystem for LocalFs {
    fn current_path(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }
}

/// Local file handle
#[derive(Debug)]
pub struct LocalFile {
    file: fs::File,
    name: String,
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for LocalFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for LocalFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl File for LocalFile {
    fn stat(&self) -> FsResult<Metadata> {
        let md = self.file.metadata()?;
        Ok(Metadata::from_std(self.name.as_str(), &md))
    }
}

impl WriteableFile for LocalFile {
    fn sync(&mut self) -> FsResult<()> {
        Ok(self.file.sync_all()?)
    }

    fn close(mut self: Box<Self>) -> FsResult<()> {
        self.file.flush()?;
        Ok(())
    }
}
