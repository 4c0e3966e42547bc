//! Integration tests for the parent-ensuring filesystem service
//!
//! These tests drive the public operations against the in-memory filesystem:
//! - Ancestor creation order and count
//! - Idempotence on an existing chain
//! - Conflict short-circuiting
//! - Write and rename end to end

use fs_capability::{
    FailingFilesystem, FailurePolicy, FileData, FilesystemCapability, FsError, MemoryFilesystem,
    WriteOptions,
};
use fs_path::PathNormalizer;
use services_fs_parents::{
    ensure_parent, rename_with_parents, write_file_with_parents, FileManifest, ParentsError,
};

fn recording_fs() -> FailingFilesystem<MemoryFilesystem> {
    FailingFilesystem::new(MemoryFilesystem::new(), FailurePolicy::Never)
}

#[test]
fn test_creates_exactly_the_missing_levels_shallow_to_deep() {
    let mut fs = recording_fs();
    fs.inner_mut().mkdir("/srv").unwrap();
    fs.inner_mut().mkdir("/srv/app").unwrap();

    ensure_parent(&mut fs, "/srv/app/static/css/site/main.css").unwrap();

    assert_eq!(
        fs.mkdir_log(),
        ["/srv/app/static", "/srv/app/static/css", "/srv/app/static/css/site"]
    );
}

#[test]
fn test_second_ensure_is_a_no_op() {
    let mut fs = recording_fs();
    ensure_parent(&mut fs, "a/b/c/d.txt").unwrap();
    assert_eq!(fs.mkdir_log().len(), 3);

    let before = fs.inner().entry_count();
    ensure_parent(&mut fs, "a/b/c/d.txt").unwrap();

    assert_eq!(fs.mkdir_log().len(), 3);
    assert_eq!(fs.inner().entry_count(), before);
}

#[test]
fn test_write_into_empty_filesystem() {
    let mut fs = MemoryFilesystem::new();

    write_file_with_parents(&mut fs, "a/b/c.txt", "hello", WriteOptions::default()).unwrap();

    assert!(fs.is_directory("a"));
    assert!(fs.is_directory("a/b"));
    assert_eq!(fs.read_to_string("a/b/c.txt").unwrap(), "hello");
    assert_eq!(fs.entry_count(), 3);
}

#[test]
fn test_rename_into_new_directories() {
    let mut fs = MemoryFilesystem::new();
    write_file_with_parents(&mut fs, "a/old.txt", "v1", WriteOptions::default()).unwrap();
    let id = fs.node_id("a/old.txt").unwrap();

    rename_with_parents(&mut fs, "a/old.txt", "x/y/new.txt").unwrap();

    assert!(fs.is_directory("x"));
    assert!(fs.is_directory("x/y"));
    assert_eq!(fs.read_to_string("x/y/new.txt").unwrap(), "v1");
    assert_eq!(fs.node_id("x/y/new.txt"), Some(id));
    assert!(!fs.exists("a/old.txt"));
    assert!(fs.is_directory("a"));
}

#[test]
fn test_dot_segments_collapse_to_single_ancestor() {
    assert_eq!(PathNormalizer::normalize("./a/../b/c"), "b/c");

    let mut fs = recording_fs();
    ensure_parent(&mut fs, "./a/../b/c").unwrap();

    assert_eq!(fs.mkdir_log(), ["b"]);
    assert!(fs.is_directory("b"));
    assert!(!fs.exists("a"));
}

#[test]
fn test_file_in_ancestor_position_blocks_the_walk() {
    let mut fs = recording_fs();
    fs.inner_mut()
        .write_file("/etc", FileData::from("root:x:0:0"), WriteOptions::default())
        .unwrap();

    let result = ensure_parent(&mut fs, "/etc/passwd/shadow");

    assert_eq!(
        result,
        Err(ParentsError::Conflict {
            path: "/etc".to_string()
        })
    );
    assert!(fs.mkdir_log().is_empty());
    assert!(!fs.exists("/etc/passwd"));
}

#[test]
fn test_partial_chain_survives_failure() {
    let mut fs = FailingFilesystem::new(MemoryFilesystem::new(), FailurePolicy::AfterMkdirs(2));

    let err = write_file_with_parents(&mut fs, "w/x/y/z.txt", "data", WriteOptions::default())
        .unwrap_err();

    assert_eq!(err.path(), Some("w/x/y"));
    assert!(matches!(err, ParentsError::Creation { .. }));
    assert!(fs.is_directory("w/x"));
    assert!(!fs.exists("w/x/y"));
    assert_eq!(fs.writes_attempted(), 0);
}

#[test]
fn test_editor_save_then_move_workflow() {
    let mut fs = MemoryFilesystem::new().with_cwd("/home/user");

    let manifest = FileManifest::new()
        .with_file("Hello.py", "import streamlit as st", WriteOptions::default())
        .with_file("requirements", "matplotlib\nhiplot\n", WriteOptions::default());
    assert_eq!(manifest.apply(&mut fs).unwrap(), 2);

    // Save a new page from the editor, then move it under a new folder
    write_file_with_parents(&mut fs, "pages/draft.py", "st.write(1)", WriteOptions::default())
        .unwrap();
    rename_with_parents(&mut fs, "pages/draft.py", "pages/archive/2024/draft.py").unwrap();

    assert_eq!(
        fs.read_to_string("/home/user/pages/archive/2024/draft.py")
            .unwrap(),
        "st.write(1)"
    );
    assert_eq!(fs.list_dir("pages").unwrap(), vec!["archive"]);
}

#[test]
fn test_errors_carry_path_and_cause() {
    let mut fs = MemoryFilesystem::new().with_capacity(2);

    let err = write_file_with_parents(&mut fs, "a/b/c/d.txt", "x", WriteOptions::default())
        .unwrap_err();

    assert_eq!(
        err,
        ParentsError::Creation {
            path: "a/b/c".to_string(),
            source: FsError::NoSpace("/a/b/c".to_string()),
        }
    );
    assert_eq!(
        err.to_string(),
        "Failed to create directory \"a/b/c\": No space left for: /a/b/c"
    );
}
