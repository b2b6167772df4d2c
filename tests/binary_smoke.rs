use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_cfg(path: &Path, root: &Path, log: &Path) {
    let xml = format!(
        r#"<config>
  <root_path>{}</root_path>
  <log_level>quiet</log_level>
  <log_file>{}</log_file>
</config>"#,
        root.display(),
        log.display()
    );
    fs::write(path, xml).unwrap();
}

#[test]
fn binary_print_config_succeeds() {
    let me = cargo::cargo_bin!("fs_manager");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
}

#[test]
fn path_helpers_run_without_a_config() {
    let td = tempdir().unwrap();
    let me = cargo::cargo_bin!("fs_manager");
    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", td.path().join("absent.xml"))
        .args(["path", "normalize", "a/b/c/../../../d"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "../d");
}

#[test]
fn write_then_read_through_a_configured_root() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("files");
    fs::create_dir_all(&root).unwrap();
    let cfg_path = base.join("config.xml");
    write_cfg(&cfg_path, &root, &base.join("fs_manager.log"));

    let me = cargo::cargo_bin!("fs_manager");
    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", &cfg_path)
        .args(["write", "notes/hello.txt", "hello there"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "write failed; stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(root.join("notes/hello.txt")).unwrap(), "hello there");

    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", &cfg_path)
        .args(["read", "notes/hello.txt"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "read failed; stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim_end(), "hello there");
}

#[test]
fn failures_exit_non_zero() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("config.xml");
    write_cfg(&cfg_path, &base, &base.join("fs_manager.log"));

    let me = cargo::cargo_bin!("fs_manager");
    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", &cfg_path)
        .args(["rmdir", "does-not-exist"])
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("get directory entry failed"),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", &cfg_path)
        .args(["rmdir", "--force", "does-not-exist"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn root_flag_overrides_the_config() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let configured = base.join("configured");
    let flagged = base.join("flagged");
    fs::create_dir_all(&configured).unwrap();
    fs::create_dir_all(&flagged).unwrap();
    let cfg_path = base.join("config.xml");
    write_cfg(&cfg_path, &configured, &base.join("fs_manager.log"));

    let me = cargo::cargo_bin!("fs_manager");
    let out = Command::new(me)
        .env("FS_MANAGER_CONFIG", &cfg_path)
        .arg("--root")
        .arg(&flagged)
        .args(["mkdir", "made"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(flagged.join("made").is_dir());
    assert!(!configured.join("made").exists());
}
