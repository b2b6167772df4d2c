use fs_manager::{FileFormat, FileSystemManager, FsErrorKind, LocalBackend, NodeKind, RootSelector, WriteOptions};
use std::fs;
use tempfile::{tempdir, TempDir};

async fn bind(dir: &TempDir) -> FileSystemManager<LocalBackend> {
    FileSystemManager::new(LocalBackend::new(), &RootSelector::Path(dir.path().to_path_buf()))
        .await
        .expect("bind root")
}

#[tokio::test]
async fn text_round_trip_creates_parents() {
    let td = tempdir().unwrap();
    let fsm = bind(&td).await;

    let node = fsm.write_file("notes/today/todo.txt", "hello", FileFormat::Text).await.unwrap();
    assert_eq!(node.name(), "todo.txt");
    assert_eq!(node.kind(), NodeKind::File);

    assert_eq!(fsm.read_file("notes/today/todo.txt", FileFormat::Text).await.unwrap(), "hello");
    assert_eq!(fs::read_to_string(td.path().join("notes/today/todo.txt")).unwrap(), "hello");
}

#[tokio::test]
async fn write_replaces_existing_content() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), "a much longer original body").unwrap();
    let fsm = bind(&td).await;

    fsm.write_file("a.txt", "short", FileFormat::Text).await.unwrap();
    assert_eq!(fsm.read_file("a.txt", FileFormat::Text).await.unwrap(), "short");
}

#[tokio::test]
async fn base64_stores_raw_bytes_and_reads_back_a_data_url() {
    let td = tempdir().unwrap();
    let fsm = bind(&td).await;

    fsm.write_file("hi.txt", "data:text/plain;base64,aGVsbG8=", FileFormat::Base64)
        .await
        .unwrap();
    assert_eq!(fs::read(td.path().join("hi.txt")).unwrap(), b"hello");

    let url = fsm.read_file("hi.txt", FileFormat::Base64).await.unwrap();
    assert_eq!(url, "data:text/plain;base64,aGVsbG8=");
}

#[tokio::test]
async fn bad_base64_leaves_the_file_untouched() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("keep.txt"), "original").unwrap();
    let fsm = bind(&td).await;

    let err = fsm.write_file("keep.txt", "%%%not base64%%%", FileFormat::Base64).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::InvalidData);
    assert_eq!(fs::read_to_string(td.path().join("keep.txt")).unwrap(), "original");
}

#[tokio::test]
async fn write_options_control_creation() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("exists.txt"), "x").unwrap();
    let fsm = bind(&td).await;

    let exclusive = WriteOptions {
        exclusive: true,
        ..Default::default()
    };
    let err = fsm.write_file("exists.txt", "y", exclusive).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::AlreadyExists);
    assert!(err.to_string().starts_with("get file entry failed:"), "got: {err}");

    let no_create = WriteOptions {
        create: false,
        ..Default::default()
    };
    let err = fsm.write_file("missing.txt", "y", no_create).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::NotFound);
    assert!(!td.path().join("missing.txt").exists());

    fsm.write_file("fresh.txt", "z", exclusive).await.unwrap();
    assert_eq!(fs::read_to_string(td.path().join("fresh.txt")).unwrap(), "z");
}

#[test]
fn unknown_format_names_are_rejected() {
    let err = "binary".parse::<FileFormat>().unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::InvalidFormat);
    assert_eq!("Text".parse::<FileFormat>().unwrap(), FileFormat::Text);
}

#[tokio::test]
async fn reading_a_directory_as_a_file_is_a_type_mismatch() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("dir")).unwrap();
    let fsm = bind(&td).await;

    let err = fsm.read_file("dir", FileFormat::Text).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::TypeMismatch);
}

#[tokio::test]
async fn directory_listing_is_sorted_and_typed() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("d/zeta")).unwrap();
    fs::write(td.path().join("d/beta.txt"), "b").unwrap();
    fs::write(td.path().join("d/alpha.txt"), "a").unwrap();
    let fsm = bind(&td).await;

    let children = fsm.read_directory("d").await.unwrap();
    let names: Vec<_> = children.iter().map(|n| n.name()).collect();
    assert_eq!(names, ["alpha.txt", "beta.txt", "zeta"]);
    assert!(children[2].is_directory());
    assert!(children[0].is_file());
}

#[tokio::test]
async fn create_directory_is_idempotent_unless_exclusive() {
    let td = tempdir().unwrap();
    let fsm = bind(&td).await;

    let dir = fsm.create_directory("a/b/c", false).await.unwrap();
    assert!(dir.is_directory());
    fsm.create_directory("a/b/c", false).await.unwrap();

    let err = fsm.create_directory("a/b/c", true).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::AlreadyExists);
}

#[tokio::test]
async fn metadata_counts_direct_or_nested_children() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("m/sub")).unwrap();
    fs::write(td.path().join("m/one.txt"), "12345").unwrap();
    fs::write(td.path().join("m/sub/two.txt"), "123").unwrap();
    let fsm = bind(&td).await;

    let shallow = fsm.entry_metadata("m", false).await.unwrap();
    assert_eq!(shallow.file_count, 1);
    assert_eq!(shallow.directory_count, 1);
    assert_eq!(shallow.size, 5);

    let deep = fsm.entry_metadata("m", true).await.unwrap();
    assert_eq!(deep.file_count, 2);
    assert_eq!(deep.size, 8);

    let file = fsm.entry_metadata("m/one.txt", false).await.unwrap();
    assert_eq!(file.size, 5);
    assert!(file.modified.is_some());
}

#[tokio::test]
async fn parent_directory_of_a_nested_entry() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("outer/inner")).unwrap();
    fs::write(td.path().join("outer/inner/f.txt"), "f").unwrap();
    let fsm = bind(&td).await;

    let parent = fsm.parent_directory("outer/inner/f.txt").await.unwrap();
    assert_eq!(parent.name(), "inner");
    assert!(parent.is_directory());

    let root_parent = fsm.parent_directory("outer").await.unwrap();
    assert_eq!(root_parent.locator(), fsm.root().locator());
}
