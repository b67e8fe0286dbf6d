mod common;

use common::MemFs;
use pathtree::path::{DriveLetterRoot, PosixRoot};
use pathtree::{PATH_MAX, PathTreeError, prettify_dir};

fn pretty(path: &str) -> Result<String, PathTreeError> {
    let fs = MemFs::new("/home/user/work");
    prettify_dir(&fs, &PosixRoot, path, PATH_MAX)
}

#[test]
fn collapses_dots_and_separators() {
    assert_eq!(pretty("/a/./b/../c/").unwrap(), "/a/c/");
    assert_eq!(pretty("//a///b//").unwrap(), "/a/b/");
    assert_eq!(pretty("/a/b/.").unwrap(), "/a/b/");
    assert_eq!(pretty("/a/b/..").unwrap(), "/a/");
    assert_eq!(pretty("/").unwrap(), "/");
}

#[test]
fn relative_input_is_anchored_at_cwd() {
    assert_eq!(pretty("src").unwrap(), "/home/user/work/src/");
    assert_eq!(pretty("./src/../lib").unwrap(), "/home/user/work/lib/");
    assert_eq!(pretty("..").unwrap(), "/home/user/");
    assert_eq!(pretty(".").unwrap(), "/home/user/work/");
    assert_eq!(pretty("").unwrap(), "/home/user/work/");
}

#[test]
fn dot_prefixed_names_are_ordinary() {
    assert_eq!(pretty("/a/.git/..b/").unwrap(), "/a/.git/..b/");
    assert_eq!(pretty("/a/b.../").unwrap(), "/a/b.../");
}

#[test]
fn climbing_to_root_is_allowed_once_more_is_not() {
    assert_eq!(pretty("/a/b/../..").unwrap(), "/");
    let err = pretty("/a/b/../../..").unwrap_err();
    assert!(matches!(err, PathTreeError::PathEscapesRoot { .. }), "got {err:?}");

    // cwd has three components
    assert_eq!(pretty("../../..").unwrap(), "/");
    assert!(matches!(
        pretty("../../../..").unwrap_err(),
        PathTreeError::PathEscapesRoot { .. }
    ));
}

#[test]
fn triple_dot_segments_are_refused() {
    for bad in ["/a/.../b/", "/...", "x/..../y"] {
        let err = pretty(bad).unwrap_err();
        assert!(matches!(err, PathTreeError::InvalidPath { .. }), "{bad}: {err:?}");
    }
}

#[test]
fn output_is_bounded_by_capacity() {
    let fs = MemFs::new("/");
    assert_eq!(prettify_dir(&fs, &PosixRoot, "/abc", 5).unwrap(), "/abc/");
    let err = prettify_dir(&fs, &PosixRoot, "/abcd", 5).unwrap_err();
    assert!(matches!(err, PathTreeError::BufferTooSmall { .. }), "got {err:?}");
}

#[test]
fn prettified_output_is_a_fixed_point() {
    for input in ["/a/./b/../c/", "rel/../x", "/q//r/s/..", "."] {
        let once = pretty(input).unwrap();
        assert_eq!(pretty(&once).unwrap(), once, "input {input}");
    }
}

#[test]
fn drive_letter_roots_are_kept() {
    let fs = MemFs::new("C:/Users/me");
    let p = |s: &str| prettify_dir(&fs, &DriveLetterRoot, s, PATH_MAX);
    assert_eq!(p("C:/a/../b").unwrap(), "C:/b/");
    assert_eq!(p("D:\\x\\.\\y").unwrap(), "D:/x/y/");
    assert_eq!(p("C:/..").unwrap_err().kind(), "path_escapes_root");
}
