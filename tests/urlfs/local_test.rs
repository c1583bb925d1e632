/*!
 * Local Backend Tests
 * `file:` URLs resolved through the shared registry
 */

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use url::Url;
use urlfs::{File, FileSystem, OpenFlags, Permissions};

fn open_temp(temp: &TempDir) -> Box<dyn FileSystem> {
    let url = Url::from_directory_path(temp.path()).unwrap();
    urlfs::lookup(url.as_str()).unwrap()
}

#[test]
fn test_round_trip_through_lookup() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);
    let w = urlfs::writeable(fs.as_ref()).unwrap();

    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    w.mkdir_all(Path::new("a/b"), Permissions::executable()).unwrap();
    let mut file = w.create(Path::new("a/b/blob.bin")).unwrap();
    file.write_all(&payload).unwrap();
    file.close().unwrap();

    assert_eq!(fs.read_file(Path::new("a/b/blob.bin")).unwrap(), payload);
    assert_eq!(std::fs::read(temp.path().join("a/b/blob.bin")).unwrap(), payload);
}

#[test]
fn test_read_write_stream_seek() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);
    let w = urlfs::writeable(fs.as_ref()).unwrap();

    let mut file = w
        .open_file(
            Path::new("rw.txt"),
            OpenFlags::create_truncate(),
            Permissions::readwrite(),
        )
        .unwrap();
    file.write_all(b"hello world").unwrap();
    file.seek(SeekFrom::Start(6)).unwrap();

    let mut tail = String::new();
    file.read_to_string(&mut tail).unwrap();
    assert_eq!(tail, "world");
    assert_eq!(file.stat().unwrap().size, 11);
    file.close().unwrap();
}

#[test]
fn test_dropped_stream_is_released() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);
    let w = urlfs::writeable(fs.as_ref()).unwrap();

    {
        let mut file = w.create(Path::new("dropped.txt")).unwrap();
        file.write_all(b"written before drop").unwrap();
    }

    assert_eq!(
        fs.read_file(Path::new("dropped.txt")).unwrap(),
        b"written before drop"
    );
    w.remove(Path::new("dropped.txt")).unwrap();
}

#[test]
fn test_sub_equivalent_to_joined_path() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);
    let w = urlfs::writeable(fs.as_ref()).unwrap();
    w.mkdir_all(Path::new("p/q"), Permissions::executable()).unwrap();

    let sub = fs.sub(Path::new("p")).unwrap();
    let sw = urlfs::writeable(sub.as_ref()).unwrap();
    let mut file = sw.create(Path::new("q/file.txt")).unwrap();
    file.write_all(b"via sub").unwrap();
    file.close().unwrap();

    assert_eq!(fs.read_file(Path::new("p/q/file.txt")).unwrap(), b"via sub");
    assert_eq!(
        sub.stat(Path::new("q/file.txt")).unwrap(),
        fs.stat(Path::new("p/q/file.txt")).unwrap()
    );

    sw.rename(Path::new("q/file.txt"), Path::new("moved.txt")).unwrap();
    assert!(fs.exists(Path::new("p/moved.txt")));
    sw.remove_all(Path::new("q")).unwrap();
    assert!(!fs.exists(Path::new("p/q")));

    // The parent's root is unchanged
    let root = urlfs::current_path(fs.as_ref()).unwrap();
    assert!(!root.ends_with("/p") && !root.ends_with("/p/"));
    assert!(fs.exists(Path::new("p")));
}

#[test]
fn test_glob_and_read_dir() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);
    let w = urlfs::writeable(fs.as_ref()).unwrap();

    w.mkdir(Path::new("logs"), Permissions::executable()).unwrap();
    for name in ["logs/2.log", "logs/1.log", "logs/notes.txt"] {
        w.create(Path::new(name)).unwrap().close().unwrap();
    }

    let names: Vec<String> = fs
        .read_dir(Path::new("logs"))
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["1.log", "2.log", "notes.txt"]);

    let mut logs = fs.glob("logs/*.log").unwrap();
    logs.sort();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].ends_with("1.log"));
    assert!(logs[1].ends_with("2.log"));
}

#[test]
fn test_os_errors_are_not_translated() {
    let temp = TempDir::new().unwrap();
    let fs = open_temp(&temp);

    let err = fs.read_file(Path::new("missing")).unwrap_err();
    let expected = std::fs::read(temp.path().join("missing")).unwrap_err();
    assert_eq!(err.io_kind(), Some(expected.kind()));
    assert_eq!(err.to_string(), expected.to_string());
}
