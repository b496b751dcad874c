use oemdedupe::catalog::IdentityMap;
use oemdedupe::dedupe::{dedupe, DedupeConfig, DedupeError, Deduplicator};
use oemdedupe::scanner::ScanError;
use std::fs;
use tempfile::tempdir;

/// A candidate whose content is not valid UTF-8 cannot be read.
fn write_unreadable(dir: &std::path::Path, name: &str) {
    fs::write(dir.join(name), b"\xff\xfe\xfd OBJECT_ID = 1\n").unwrap();
}

#[test]
fn test_unreadable_file_is_skipped_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.oem"), "OBJECT_ID = 1\nSTART_TIME = 2020\n").unwrap();
    write_unreadable(dir.path(), "b.oem");

    let report = Deduplicator::new(DedupeConfig::default().with_delete_stale(false))
        .run(dir.path(), &IdentityMap::new())
        .unwrap();

    assert_eq!(report.fresh.len(), 1);
    assert_eq!(report.scan_errors.len(), 1);
    assert_eq!(report.scan_errors[0].path(), dir.path().join("b.oem"));
}

#[test]
fn test_unreadable_file_aborts_in_strict_mode() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.oem"), "OBJECT_ID = 1\nSTART_TIME = 2020\n").unwrap();
    fs::write(dir.path().join("c.oem"), "OBJECT_ID = 1\nSTART_TIME = 2019\n").unwrap();
    write_unreadable(dir.path(), "b.oem");

    let result = dedupe(dir.path(), true, true, &IdentityMap::new());

    match result {
        Err(DedupeError::Scan(ScanError::Io { path, .. })) => {
            assert_eq!(path, dir.path().join("b.oem"));
        }
        other => panic!("Expected Scan error, got {:?}", other),
    }
    // Aborted before the deletion step.
    assert!(dir.path().join("c.oem").exists());
}

#[test]
fn test_missing_root() {
    let dir = tempdir().unwrap();
    let result = dedupe(&dir.path().join("nope"), true, false, &IdentityMap::new());

    assert!(matches!(result, Err(DedupeError::PathNotFound(_))));
}

#[test]
fn test_root_is_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.oem");
    fs::write(&file, "OBJECT_ID = 1\n").unwrap();

    let result = dedupe(&file, true, false, &IdentityMap::new());

    assert!(matches!(result, Err(DedupeError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_never_aborts() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let a = dir.path().join("a.oem");
    let b = dir.path().join("b.oem");
    fs::write(&a, "OBJECT_ID = 1\nSTART_TIME = 2020\n").unwrap();
    fs::write(&b, "OBJECT_ID = 1\nSTART_TIME = 2021\n").unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read it anyway.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let lenient = Deduplicator::new(DedupeConfig::default().with_delete_stale(false))
        .run(dir.path(), &IdentityMap::new());
    let strict = dedupe(dir.path(), true, true, &IdentityMap::new());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let report = lenient.unwrap();
    assert_eq!(report.stale, vec![a.clone()]);
    assert_eq!(report.scan_errors.len(), 1);
    assert_eq!(report.scan_errors[0].path(), locked.as_path());

    let (fresh, stale) = strict.unwrap();
    assert_eq!(fresh.get("1").unwrap().path, b);
    assert_eq!(stale, vec![a.clone()]);
    assert!(!a.exists());
    assert!(b.exists());
}
