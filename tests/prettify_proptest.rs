mod common;

use common::MemFs;
use pathtree::path::PosixRoot;
use pathtree::{PATH_MAX, PathTreeError, prettify_dir, prettify_file};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z0-9_]{1,6}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
        1 => Just(String::new()),
    ]
}

fn path() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment(), 0..10))
        .prop_map(|(rooted, segs)| {
            let body = segs.join("/");
            if rooted { format!("/{body}") } else { body }
        })
}

proptest! {
    #[test]
    fn prettified_dirs_are_fixed_points(p in path()) {
        let fs = MemFs::new("/w/x");
        if let Ok(once) = prettify_dir(&fs, &PosixRoot, &p, PATH_MAX) {
            let twice = prettify_dir(&fs, &PosixRoot, &once, PATH_MAX).unwrap();
            prop_assert_eq!(&twice, &once);
            prop_assert!(once.starts_with('/'));
            prop_assert!(once.ends_with('/'));
            prop_assert!(!once.contains("//"));
            prop_assert!(!once.split('/').any(|s| s == "." || s == ".."));
        }
    }

    #[test]
    fn only_escapes_fail_on_plain_segments(p in path()) {
        let fs = MemFs::new("/w/x");
        match prettify_dir(&fs, &PosixRoot, &p, PATH_MAX) {
            Ok(_) => {}
            Err(PathTreeError::PathEscapesRoot { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected {:?} for {:?}", other, p),
        }
    }

    #[test]
    fn enough_parents_reach_root_one_more_escapes(depth in 1usize..8) {
        let fs = MemFs::new("/");
        let deep: String = (0..depth).map(|i| format!("/d{i}")).collect();
        let ups = "/..".repeat(depth);
        let at_root = prettify_dir(&fs, &PosixRoot, &format!("{deep}{ups}"), PATH_MAX).unwrap();
        prop_assert_eq!(at_root, "/");
        let err = prettify_dir(&fs, &PosixRoot, &format!("{deep}{ups}/.."), PATH_MAX).unwrap_err();
        prop_assert!(matches!(err, PathTreeError::PathEscapesRoot { .. }), "got {:?}", err);
    }

    #[test]
    fn files_never_end_in_slash(p in path(), leaf in "[a-z]{1,4}") {
        let fs = MemFs::new("/w/x");
        let file = format!("{p}/{leaf}");
        if let Ok(f) = prettify_file(&fs, &PosixRoot, &file, PATH_MAX) {
            prop_assert!(!f.ends_with('/'));
            prop_assert!(f.ends_with(&leaf));
        }
    }
}
