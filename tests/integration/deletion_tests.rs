use oemdedupe::actions::{delete_stale, DeleteMode};
use oemdedupe::catalog::IdentityMap;
use oemdedupe::dedupe::{DedupeConfig, Deduplicator};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_dry_run_leaves_files_in_place() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.oem"), "OBJECT_ID = 1\nSTART_TIME = 2020\n").unwrap();
    fs::write(dir.path().join("b.oem"), "OBJECT_ID = 1\nSTART_TIME = 2021\n").unwrap();

    let report = Deduplicator::new(DedupeConfig::default().with_delete_stale(false))
        .run(dir.path(), &IdentityMap::new())
        .unwrap();

    assert_eq!(report.stale.len(), 1);
    assert!(report.deletion.is_none());
    assert!(dir.path().join("a.oem").exists());
    assert!(dir.path().join("b.oem").exists());
}

#[test]
fn test_deletion_happens_after_scan() {
    let dir = tempdir().unwrap();
    for (name, start) in [("a.oem", "2020"), ("b.oem", "2022"), ("c.oem", "2021")] {
        fs::write(
            dir.path().join(name),
            format!("OBJECT_ID = 1\nSTART_TIME = {start}\n"),
        )
        .unwrap();
    }

    let report = Deduplicator::with_defaults()
        .run(dir.path(), &IdentityMap::new())
        .unwrap();

    let deletion = report.deletion.unwrap();
    assert_eq!(deletion.success_count(), 2);
    assert!(deletion.all_succeeded());
    assert!(!dir.path().join("a.oem").exists());
    assert!(dir.path().join("b.oem").exists());
    assert!(!dir.path().join("c.oem").exists());
}

#[test]
fn test_delete_failure_does_not_stop_remaining() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.oem"), "OBJECT_ID = 1\nSTART_TIME = 2020\n").unwrap();
    fs::write(dir.path().join("b.oem"), "OBJECT_ID = 1\nSTART_TIME = 2021\n").unwrap();
    fs::write(dir.path().join("c.oem"), "OBJECT_ID = 2\nSTART_TIME = 2020\n").unwrap();
    fs::write(dir.path().join("d.oem"), "OBJECT_ID = 2\nSTART_TIME = 2021\n").unwrap();

    let report = Deduplicator::new(DedupeConfig::default().with_delete_stale(false))
        .run(dir.path(), &IdentityMap::new())
        .unwrap();
    assert_eq!(report.stale.len(), 2);

    // The first stale file vanishes before removal starts.
    fs::remove_file(&report.stale[0]).unwrap();

    let result = delete_stale(&report.stale, DeleteMode::Permanent);

    assert_eq!(result.failure_count(), 1);
    assert_eq!(result.success_count(), 1);
    assert!(!report.stale[1].exists());
}
