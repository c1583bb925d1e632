/*!
 * Root Paths
 * Converts `file:` URLs into host root paths (drive letters, UNC hosts)
 */

use std::borrow::Cow;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::types::FsResult;

/// Prefix addressing the Win32 device namespace
const DEVICE_PREFIX: &str = "//.";

/// Root path for a parsed URL
///
/// Feeds the URL's host (empty when absent) and percent-decoded path to
/// [`root_for_parts`]. Never touches the filesystem.
///
/// The host is whatever the URL parser leaves after WHATWG normalization:
/// `file://localhost/tmp` has no host and roots at `/tmp`, and
/// `file://./C:/x` has no host either, rooting at `C:/x` rather than the
/// device form. Use [`root_for_parts`] to reach `//./` explicitly.
///
/// Decoded bytes that are not UTF-8 are kept as-is on unix. Elsewhere they
/// fail with [`FsError::InvalidArgument`](crate::FsError::InvalidArgument).
pub fn root_for_url(url: &Url) -> FsResult<PathBuf> {
    let host = url.host_str().unwrap_or("");
    let decoded: Cow<'_, [u8]> = percent_decode_str(url.path()).into();
    match std::str::from_utf8(&decoded) {
        Ok(path) => Ok(PathBuf::from(root_for_parts(host, path))),
        Err(_) => raw_root(host, &decoded, url),
    }
}

/// Root path for a URL host and path
///
/// - empty path: empty root (the working directory)
/// - `/C:/...`: leading separator dropped, giving `C:/...`
/// - host `.`: device namespace, `//./<path>`
/// - any other host: UNC share, `//<host><path>`
pub fn root_for_parts(host: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let path = strip_drive_separator(path);

    match host {
        "" => path.to_string(),
        "." => {
            if path.starts_with('/') {
                format!("{DEVICE_PREFIX}{path}")
            } else {
                format!("{DEVICE_PREFIX}/{path}")
            }
        }
        server => format!("//{server}{path}"),
    }
}

#[cfg(unix)]
fn raw_root(host: &str, path: &[u8], _url: &Url) -> FsResult<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let path = if has_drive_separator(path) { &path[1..] } else { path };

    let mut root = Vec::with_capacity(host.len() + path.len() + 4);
    match host {
        "" => {}
        "." => {
            root.extend_from_slice(DEVICE_PREFIX.as_bytes());
            if !path.starts_with(b"/") {
                root.push(b'/');
            }
        }
        server => {
            root.extend_from_slice(b"//");
            root.extend_from_slice(server.as_bytes());
        }
    }
    root.extend_from_slice(path);

    Ok(PathBuf::from(OsString::from_vec(root)))
}

#[cfg(not(unix))]
fn raw_root(_host: &str, _path: &[u8], url: &Url) -> FsResult<PathBuf> {
    Err(crate::FsError::InvalidArgument(format!(
        "URL path is not valid UTF-8: {url}"
    )))
}

/// `/C:/x` -> `C:/x`; anything else unchanged
fn strip_drive_separator(path: &str) -> &str {
    if has_drive_separator(path.as_bytes()) {
        // bytes[0] is ASCII, so index 1 is a char boundary
        &path[1..]
    } else {
        path
    }
}

fn has_drive_separator(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':'
}
