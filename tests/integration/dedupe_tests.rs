use oemdedupe::catalog::IdentityMap;
use oemdedupe::dedupe::{dedupe, DedupeConfig, Deduplicator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_oem(dir: &Path, name: &str, id: &str, start: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        format!(
            "CCSDS_OEM_VERS = 2.0\n\
             CREATION_DATE = 2022-01-01T00:00:00\n\
             META_START\n\
             OBJECT_ID = {id}\n\
             CENTER_NAME = EARTH\n\
             START_TIME = {start}\n\
             META_STOP\n\
             2020-01-01T00:00:00 1.0 2.0 3.0 4.0 5.0 6.0\n"
        ),
    )
    .unwrap();
    path
}

fn scan_only() -> Deduplicator {
    Deduplicator::new(DedupeConfig::default().with_delete_stale(false))
}

#[test]
fn test_dedupe_empty_directory() {
    let dir = tempdir().unwrap();

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert!(report.fresh.is_empty());
    assert!(report.stale.is_empty());
    assert_eq!(report.files_scanned, 0);
}

#[test]
fn test_dedupe_keeps_latest_and_deletes_stale() {
    let dir = tempdir().unwrap();
    let a = write_oem(dir.path(), "a.oem", "25544", "2020-01-01T00:00:00");
    let b = write_oem(dir.path(), "b.oem", "25544", "2021-06-01T00:00:00");

    let (fresh, stale) = dedupe(dir.path(), true, true, &IdentityMap::new()).unwrap();

    assert_eq!(fresh.len(), 1);
    let entry = fresh.get("25544").unwrap();
    assert_eq!(entry.path, b);
    assert_eq!(entry.start_time, "2021-06-01T00:00:00");
    assert_eq!(stale, vec![a.clone()]);
    assert!(!a.exists());
    assert!(b.exists());
}

#[test]
fn test_dedupe_single_winner_per_id() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("exports").join("2021");
    fs::create_dir_all(&sub).unwrap();

    write_oem(dir.path(), "x1.oem", "100", "2020-03-01T00:00:00");
    write_oem(dir.path(), "x2.oem", "100", "2020-05-01T00:00:00");
    let newest = write_oem(&sub, "x3.oem", "100", "2021-01-01T00:00:00");
    write_oem(&sub, "x4.oem", "100", "2020-04-01T00:00:00");
    let other = write_oem(&sub, "y1.oem", "200", "2019-01-01T00:00:00");

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(report.fresh.len(), 2);
    assert_eq!(report.fresh.get("100").unwrap().path, newest);
    assert_eq!(
        report.fresh.get("100").unwrap().start_time,
        "2021-01-01T00:00:00"
    );
    assert_eq!(report.fresh.get("200").unwrap().path, other);
    assert_eq!(report.stale.len(), 3);
    for path in &report.stale {
        assert!(!report.fresh.holds_path(path));
    }
}

#[test]
fn test_dedupe_excludes_incomplete_files() {
    let dir = tempdir().unwrap();
    write_oem(dir.path(), "full.oem", "7", "2020-01-01T00:00:00");
    fs::write(dir.path().join("id_only.oem"), "OBJECT_ID = 7\n").unwrap();
    fs::write(
        dir.path().join("time_only.oem"),
        "START_TIME = 2030-01-01T00:00:00\n",
    )
    .unwrap();
    fs::write(dir.path().join("neither.oem"), "COMMENT nothing here\n").unwrap();

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.files_excluded, 3);
    assert_eq!(report.fresh.len(), 1);
    assert!(report.stale.is_empty());
}

#[test]
fn test_dedupe_ignores_other_suffixes() {
    let dir = tempdir().unwrap();
    let kept = write_oem(dir.path(), "a.oem", "1", "2020");
    write_oem(dir.path(), "b.txt", "1", "2021");
    write_oem(dir.path(), "c.oem.bak", "1", "2022");

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.fresh.get("1").unwrap().path, kept);
}

#[test]
fn test_dedupe_non_recursive() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let top = write_oem(dir.path(), "top.oem", "1", "2020");
    let nested = write_oem(&sub, "nested.oem", "1", "2021");

    let (fresh, stale) = dedupe(dir.path(), false, true, &IdentityMap::new()).unwrap();

    assert_eq!(fresh.get("1").unwrap().path, top);
    assert!(stale.is_empty());
    assert!(nested.exists());
}

#[test]
fn test_dedupe_equal_start_times_one_survivor() {
    let dir = tempdir().unwrap();
    let a = write_oem(dir.path(), "a.oem", "1", "2020-01-01T00:00:00");
    let b = write_oem(dir.path(), "b.oem", "1", "2020-01-01T00:00:00");

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    let survivor = &report.fresh.get("1").unwrap().path;
    assert!(survivor == &a || survivor == &b);
    assert_eq!(report.stale.len(), 1);
    assert_ne!(&report.stale[0], survivor);
}

#[test]
fn test_dedupe_idempotent_without_deletion() {
    let dir = tempdir().unwrap();
    write_oem(dir.path(), "a.oem", "1", "2020");
    write_oem(dir.path(), "b.oem", "1", "2021");
    write_oem(dir.path(), "c.oem", "2", "2019");

    let first = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();
    let second = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(first.fresh, second.fresh);
    assert_eq!(first.stale, second.stale);
}

#[test]
fn test_dedupe_rerun_after_deletion_finds_nothing_stale() {
    let dir = tempdir().unwrap();
    write_oem(dir.path(), "a.oem", "1", "2020");
    write_oem(dir.path(), "b.oem", "1", "2021");
    write_oem(dir.path(), "c.oem", "2", "2019");
    write_oem(dir.path(), "d.oem", "2", "2018");

    let first = Deduplicator::with_defaults()
        .run(dir.path(), &IdentityMap::new())
        .unwrap();
    assert_eq!(first.stale.len(), 2);
    assert!(first.deletion.as_ref().unwrap().all_succeeded());

    let second = Deduplicator::with_defaults()
        .run(dir.path(), &IdentityMap::new())
        .unwrap();

    assert!(second.stale.is_empty());
    assert!(second.deletion.is_none());
    assert_eq!(first.fresh, second.fresh);
}

#[test]
fn test_dedupe_aliases_share_canonical_id() {
    let dir = tempdir().unwrap();
    let a1 = write_oem(dir.path(), "a1.oem", "A1", "2020-01-01T00:00:00");
    let a2 = write_oem(dir.path(), "a2.oem", "A2", "2020-02-01T00:00:00");
    let ids: IdentityMap = vec![("C", "A1"), ("C", "A2")].into_iter().collect();

    let report = scan_only().run(dir.path(), &ids).unwrap();

    assert_eq!(report.fresh.len(), 1);
    assert_eq!(report.fresh.get("C").unwrap().path, a2);
    assert_eq!(report.stale, vec![a1]);
}

#[test]
fn test_dedupe_without_catalog_aliases_are_distinct() {
    let dir = tempdir().unwrap();
    write_oem(dir.path(), "a1.oem", "A1", "2020");
    write_oem(dir.path(), "a2.oem", "A2", "2021");

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(report.fresh.len(), 2);
    assert!(report.stale.is_empty());
}

#[test]
fn test_dedupe_compact_assignments() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.oem"), "OBJECT_ID=9\nSTART_TIME=2020\n").unwrap();
    fs::write(dir.path().join("b.oem"), "  OBJECT_ID =9 \n START_TIME= 2021\n").unwrap();

    let report = scan_only().run(dir.path(), &IdentityMap::new()).unwrap();

    assert_eq!(report.fresh.len(), 1);
    assert_eq!(report.fresh.get("9").unwrap().start_time, "2021");
}
