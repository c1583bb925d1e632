/*!
 * urlfs
 * URL-addressed filesystem handles behind a scheme multiplexer
 *
 * A URL such as `file:///var/data` selects a provider by scheme; the provider
 * builds a caller-owned [`FileSystem`] rooted at the URL. Mutation and root
 * reporting are optional capabilities probed at runtime.
 *
 * ```no_run
 * use std::io::Write;
 * use std::path::Path;
 *
 * # fn main() -> urlfs::FsResult<()> {
 * let fs = urlfs::lookup("file:///tmp")?;
 * if let Some(w) = urlfs::writeable(fs.as_ref()) {
 *     let mut file = w.create(Path::new("hello.txt"))?;
 *     file.write_all(b"hi")?;
 *     file.close()?;
 * }
 * let data = fs.read_file(Path::new("hello.txt"))?;
 * # let _ = data;
 * # Ok(())
 * # }
 * ```
 */

pub mod auto;
pub mod local;
pub mod mux;
pub mod paths;
pub mod provider;
pub mod traits;
pub mod types;

// Re-exports
pub use auto::lookup;
pub use local::{LocalFile, LocalFs};
pub use mux::Mux;
pub use provider::{Constructor, Provider, ProviderFn};
pub use traits::{
    current_path, writeable, CurrentPathFileSystem, File, FileSystem, WriteableFile,
    WriteableFileSystem,
};
pub use types::{Entry, FileType, FsError, FsResult, Metadata, OpenFlags, Permissions};
