/*!
 * Test Support
 * Read-only in-memory backend standing in for a remote source
 */

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use url::Url;
use urlfs::{
    Entry, File, FileSystem, FileType, FsError, FsResult, Metadata, Permissions, Provider,
};

/// Immutable map of file path -> contents, served read-only
#[derive(Debug, Clone)]
pub struct MapFs {
    files: Arc<BTreeMap<String, Vec<u8>>>,
    prefix: String,
}

impl MapFs {
    pub fn new<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            files: Arc::new(
                files
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            prefix: String::new(),
        }
    }

    fn key(&self, path: &Path) -> String {
        let rel = path.to_string_lossy();
        let rel = rel.trim_matches('/');
        match (self.prefix.is_empty(), rel.is_empty()) {
            (true, _) => rel.to_string(),
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{}", self.prefix, rel),
        }
    }

    fn not_found(key: &str) -> FsError {
        std::io::Error::new(std::io::ErrorKind::NotFound, format!("{key}: not found")).into()
    }

    fn metadata(name: &str, file_type: FileType, size: u64) -> Metadata {
        Metadata {
            name: name.to_string(),
            file_type,
            size,
            permissions: Permissions::readonly(),
            modified: SystemTime::UNIX_EPOCH,
            accessed: SystemTime::UNIX_EPOCH,
            created: SystemTime::UNIX_EPOCH,
        }
    }
}

struct MapFile {
    data: Cursor<Vec<u8>>,
    md: Metadata,
}

impl std::io::Read for MapFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.data.read(buf)
    }
}

impl std::io::Seek for MapFile {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        self.data.seek(pos)
    }
}

impl File for MapFile {
    fn stat(&self) -> FsResult<Metadata> {
        Ok(self.md.clone())
    }
}

impl FileSystem for MapFs {
    fn open(&self, path: &Path) -> FsResult<Box<dyn File>> {
        let key = self.key(path);
        let data = self.files.get(&key).ok_or_else(|| Self::not_found(&key))?;
        let md = Self::metadata(&key, FileType::File, data.len() as u64);
        Ok(Box::new(MapFile {
            data: Cursor::new(data.clone()),
            md,
        }))
    }

    fn stat(&self, path: &Path) -> FsResult<Metadata> {
        let key = self.key(path);
        match self.files.get(&key) {
            Some(data) => Ok(Self::metadata(&key, FileType::File, data.len() as u64)),
            None if !self.read_dir(path)?.is_empty() => {
                Ok(Self::metadata(&key, FileType::Directory, 0))
            }
            None => Err(Self::not_found(&key)),
        }
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<Entry>> {
        let key = self.key(path);
        let dir = if key.is_empty() { String::new() } else { format!("{key}/") };

        let mut entries: BTreeMap<String, FileType> = BTreeMap::new();
        for name in self.files.keys() {
            if let Some(rest) = name.strip_prefix(&dir) {
                match rest.split_once('/') {
                    Some((child, _)) => entries.insert(child.to_string(), FileType::Directory),
                    None => entries.insert(rest.to_string(), FileType::File),
                };
            }
        }

        entries
            .into_iter()
            .map(|(name, file_type)| Entry::new(name, file_type))
            .collect()
    }

    fn glob(&self, pattern: &str) -> FsResult<Vec<String>> {
        let pattern = glob::Pattern::new(&self.key(Path::new(pattern)))?;
        Ok(self
            .files
            .keys()
            .filter(|name| pattern.matches(name))
            .cloned()
            .collect())
    }

    fn sub(&self, path: &Path) -> FsResult<Box<dyn FileSystem>> {
        Ok(Box::new(Self {
            files: Arc::clone(&self.files),
            prefix: self.key(path),
        }))
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// Provider serving one shared `MapFs` for a scheme, recording the URLs it saw
pub struct MapProvider {
    pub schemes: Vec<&'static str>,
    pub fs: MapFs,
    pub seen: parking_lot::Mutex<Vec<Url>>,
}

impl MapProvider {
    pub fn new(schemes: &[&'static str], fs: MapFs) -> Self {
        Self {
            schemes: schemes.to_vec(),
            fs,
            seen: parking_lot::Mutex::new(Vec::new()),
        }
    }
}

impl Provider for MapProvider {
    fn schemes(&self) -> &[&str] {
        &self.schemes
    }

    fn construct(&self, url: &Url) -> FsResult<Box<dyn FileSystem>> {
        self.seen.lock().push(url.clone());
        self.fs.sub(&PathBuf::from(url.path()))
    }
}
