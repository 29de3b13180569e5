use chrono::{TimeZone, Utc};
use predicates::str::contains;
use rtimekeeper::core::backup::{BACKUP_PREFIX, BackupLogic, BackupSchedule, backup_file_name, spawn_scheduler};
use rtimekeeper::db::employees;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tokio::sync::watch;

mod common;
use common::{rtk, setup_test_db, temp_dir, test_store};

fn backups_in(dir: &PathBuf) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)
        .map(|rd| rd.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    out.sort();
    out
}

#[test]
fn test_backup_file_name_is_filesystem_safe_iso8601() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 5).unwrap()
        + chrono::Duration::milliseconds(42);
    assert_eq!(backup_file_name(at), "db-backup-2024-01-01T09-30-05-042Z");
}

#[test]
fn test_snapshot_creates_directory_and_copies_data() {
    let store = test_store("backup_snapshot");
    {
        let pool = store.connect().unwrap();
        employees::create_employee(&pool.conn, "Alice").unwrap();
    }
    let dir = temp_dir("backup_snapshot").join("nested").join("backups");

    let path = BackupLogic::snapshot(&store, &dir, false).expect("snapshot");

    assert!(dir.is_dir());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with(BACKUP_PREFIX));
    assert!(!name.contains(':'));

    // the copy is a complete database on its own
    let copy = Connection::open(&path).unwrap();
    let n: i64 = copy
        .query_row("SELECT COUNT(*) FROM employees WHERE name = 'Alice'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(n, 1);
}

#[test]
fn test_snapshot_while_writer_is_active_is_consistent() {
    let store = test_store("backup_live_writer");
    let dir = temp_dir("backup_live_writer");
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = store.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let pool = store.connect().unwrap();
            let mut written = 0;
            while !stop.load(Ordering::Relaxed) {
                employees::create_employee(&pool.conn, &format!("Worker {}", written)).unwrap();
                written += 1;
            }
            written
        })
    };

    let mut paths = Vec::new();
    for _ in 0..5 {
        paths.push(BackupLogic::snapshot(&store, &dir, false).expect("snapshot"));
        thread::sleep(Duration::from_millis(5));
    }
    stop.store(true, Ordering::Relaxed);
    let written = writer.join().unwrap();
    assert!(written > 0);

    let mut previous = 0;
    for path in paths {
        let copy = Connection::open(&path).unwrap();
        let check: String = copy.query_row("PRAGMA integrity_check", [], |row| row.get(0)).unwrap();
        assert_eq!(check, "ok");
        let n: i64 = copy
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert!(n >= previous);
        previous = n;
    }
}

#[test]
fn test_snapshot_compressed() {
    let store = test_store("backup_compressed");
    let dir = temp_dir("backup_compressed");

    let path = BackupLogic::snapshot(&store, &dir, true).expect("snapshot");

    assert_eq!(path.extension().unwrap(), "zip");
    assert_eq!(backups_in(&dir), vec![path]);
}

#[test]
fn test_snapshot_missing_database_fails() {
    let db_path = setup_test_db("backup_missing_db");
    let store = rtimekeeper::db::Store::new(&db_path, Duration::from_secs(1));
    let dir = temp_dir("backup_missing_db");

    assert!(BackupLogic::snapshot(&store, &dir, false).is_err());
}

#[tokio::test]
async fn test_scheduler_waits_one_period_then_snapshots() {
    let store = test_store("backup_scheduler");
    let dir = temp_dir("backup_scheduler");
    let (tx, rx) = watch::channel(false);

    let handle = spawn_scheduler(
        store,
        BackupSchedule {
            dir: dir.clone(),
            every: Duration::from_millis(300),
            compress: false,
        },
        rx,
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(backups_in(&dir).is_empty(), "no backup before the first period");

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!backups_in(&dir).is_empty());

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler stops")
        .unwrap();
}

#[tokio::test]
async fn test_scheduler_survives_failures() {
    let db_path = setup_test_db("backup_scheduler_failing");
    let store = rtimekeeper::db::Store::new(&db_path, Duration::from_secs(1));
    let dir = temp_dir("backup_scheduler_failing");
    let (tx, rx) = watch::channel(false);

    let handle = spawn_scheduler(
        store,
        BackupSchedule {
            dir,
            every: Duration::from_millis(50),
            compress: false,
        },
        rx,
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());

    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler stops when the sender is gone")
        .unwrap();
}

#[test]
fn test_backup_command() {
    let db_path = setup_test_db("backup_cli");
    let dir = temp_dir("backup_cli");

    rtk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rtk()
        .args(["--db", &db_path, "backup", "--dir", &dir.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert_eq!(backups_in(&dir).len(), 1);
}
