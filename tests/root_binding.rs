use fs_manager::{Config, FileSystemManager, FsErrorKind, LocalBackend, RootSelector, StorageArea};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn unconfigured_root_is_a_configuration_error() {
    let cfg = Config {
        root_path: None,
        root_area: None,
        ..Config::default()
    };
    let err = FileSystemManager::from_config(LocalBackend::new(), &cfg)
        .await
        .err()
        .expect("binding must fail");
    assert_eq!(err.kind(), FsErrorKind::MissingConfiguration);
    assert_eq!(err.code(), 19);
    assert_eq!(err.to_string(), "get file root failed: type or path is required");
}

#[tokio::test]
async fn missing_root_directory_is_not_found() {
    let td = tempdir().unwrap();
    let err = FileSystemManager::new(LocalBackend::new(), &RootSelector::Path(td.path().join("nope")))
        .await
        .err()
        .expect("binding must fail");
    assert_eq!(err.kind(), FsErrorKind::NotFound);
    assert!(err.to_string().starts_with("get file root failed:"));
}

#[tokio::test]
async fn file_root_is_a_type_mismatch() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("plain.txt"), "x").unwrap();
    let err = FileSystemManager::new(LocalBackend::new(), &RootSelector::Path(td.path().join("plain.txt")))
        .await
        .err()
        .expect("binding must fail");
    assert_eq!(err.kind(), FsErrorKind::TypeMismatch);
}

#[tokio::test]
async fn area_root_is_created_and_bound() {
    let td = tempdir().unwrap();
    let cfg = Config::with_area(StorageArea::PrivateWww);
    let fsm = FileSystemManager::from_config(LocalBackend::with_area_base(td.path()), &cfg)
        .await
        .unwrap();

    assert!(fsm.root().is_directory());
    assert_eq!(fsm.root().name(), "private_www");

    fsm.create_directory("assets", false).await.unwrap();
    assert!(td.path().join("private_www/assets").is_dir());
}

#[tokio::test]
async fn paths_cannot_climb_out_of_the_filesystem_root() {
    let td = tempdir().unwrap();
    let fsm = FileSystemManager::new(LocalBackend::new(), &RootSelector::Path(td.path().to_path_buf()))
        .await
        .unwrap();

    let depth = td.path().components().count() + 2;
    let climb = vec![".."; depth].join("/");
    let err = fsm.resolve_entry(&climb).await.unwrap_err();
    assert_eq!(err.kind(), FsErrorKind::InvalidPath);
}
