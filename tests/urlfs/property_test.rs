/*!
 * Property Tests
 * Root normalization and sub-filesystem equivalence
 */

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use urlfs::paths::root_for_parts;
use urlfs::{FileSystem, LocalFs};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        "[a-z]{1,6}",
    ]
}

fn rel_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(segment(), 0..5).prop_map(|parts| parts.iter().collect())
}

fn root_of(fs: &dyn FileSystem) -> String {
    urlfs::current_path(fs).unwrap()
}

proptest! {
    #[test]
    fn test_plain_paths_pass_through(path in "/[a-z]{2}[a-z/]{0,20}") {
        // Third character is never ':' so no drive letter is stripped
        prop_assert_eq!(root_for_parts("", &path), path);
    }

    #[test]
    fn test_drive_paths_lose_leading_separator(drive in "[A-Z]", rest in "(/[a-z]{1,8}){0,3}") {
        let path = format!("/{drive}:{rest}");
        prop_assert_eq!(root_for_parts("", &path), format!("{drive}:{rest}"));
    }

    #[test]
    fn test_unc_host_prefix(host in "[a-z][a-z0-9-]{0,10}", path in "(/[a-z]{1,8}){1,3}") {
        prop_assert_eq!(root_for_parts(&host, &path), format!("//{host}{path}"));
    }

    #[test]
    fn test_sub_then_path_equals_joined_path(p in rel_path(), q in rel_path()) {
        let fs = LocalFs::new("/base/root");

        let via_sub = fs.sub(&p).unwrap().sub(&q).unwrap();
        let direct = fs.sub(&p.join(&q)).unwrap();
        prop_assert_eq!(root_of(via_sub.as_ref()), root_of(direct.as_ref()));

        // Parent root untouched
        prop_assert_eq!(fs.root(), Path::new("/base/root"));
    }
}
