use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rtimekeeper::core::import::{import_legacy, parse_legacy};
use rtimekeeper::db::data::load_all;
use serde_json::json;
use std::fs;

mod common;
use common::{rtk, setup_test_db, temp_dir, test_store};

const LEGACY: &str = r#"{
  "properties": [
    {"id": 7, "fullName": "Acme", "address": "1 Main St", "services": {"mowing": true}},
    {"id": 12, "fullName": "Birch", "address": "2 Oak Ave"}
  ],
  "employees": ["Alice", "Bob"],
  "entries": [
    {"id": 40, "date": "2023-05-01", "client": "Acme", "propertyAddress": "1 Main St",
     "service": "mowing", "TimeIn": "08:00", "TimeOut": "10:00", "totalHours": "2",
     "employees": ["Alice", "Bob"]},
    {"id": 41, "date": "2023-05-02", "client": "Birch", "propertyAddress": "2 Oak Ave",
     "service": "snow", "timeIn": "07:00", "timeOut": "07:30", "totalHours": 0.5}
  ]
}"#;

#[test]
fn test_import_preserves_ids_and_links() {
    let store = test_store("import_lib");
    let data = parse_legacy(LEGACY).unwrap();

    let mut pool = store.connect().unwrap();
    let report = import_legacy(&mut pool.conn, &data).unwrap();
    assert_eq!(report.properties, 2);
    assert_eq!(report.employees, 2);
    assert_eq!(report.entries, 2);
    assert_eq!(report.links, 2);
    assert_eq!(report.unknown_employee_links, 0);

    let all = load_all(&mut pool.conn).unwrap();
    let ids: Vec<i64> = all.properties.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![7, 12]);
    assert_eq!(all.properties[0].services.get("mowing"), Some(&json!(true)));
    assert!(all.properties[1].services.is_empty());

    // newest first
    assert_eq!(all.entries[0].id, 41);
    assert_eq!(all.entries[0].time_in, "07:00");
    assert_eq!(all.entries[0].total_hours, "0.5");
    assert!(all.entries[0].employees.is_empty());

    assert_eq!(all.entries[1].id, 40);
    assert_eq!(all.entries[1].time_in, "08:00");
    assert_eq!(all.entries[1].time_out, "10:00");
    assert_eq!(all.entries[1].employees, vec!["Alice", "Bob"]);
}

#[test]
fn test_import_continues_autoincrement_after_preserved_ids() {
    let store = test_store("import_autoincrement");
    let mut pool = store.connect().unwrap();
    import_legacy(&mut pool.conn, &parse_legacy(LEGACY).unwrap()).unwrap();

    pool.conn
        .execute(
            "INSERT INTO entries (date, client, propertyAddress, service, timeIn, timeOut, totalHours)
             VALUES ('2024-01-01', 'c', 'a', 's', '1', '2', '1')",
            [],
        )
        .unwrap();
    assert_eq!(pool.conn.last_insert_rowid(), 42);
}

#[test]
fn test_import_is_all_or_nothing() {
    let store = test_store("import_rollback");
    let mut pool = store.connect().unwrap();

    // entry ids collide
    let bad = r#"{
      "properties": [{"id": 1, "fullName": "A", "address": "x"}],
      "entries": [
        {"id": 5, "date": "d", "client": "c", "propertyAddress": "x", "service": "s",
         "timeIn": "1", "timeOut": "2", "totalHours": "1"},
        {"id": 5, "date": "d", "client": "c", "propertyAddress": "x", "service": "s",
         "timeIn": "1", "timeOut": "2", "totalHours": "1"}
      ]
    }"#;
    let result = import_legacy(&mut pool.conn, &parse_legacy(bad).unwrap());
    assert!(result.is_err());

    let all = load_all(&mut pool.conn).unwrap();
    assert!(all.properties.is_empty());
    assert!(all.entries.is_empty());
}

#[test]
fn test_parse_legacy_accepts_missing_sections_and_employee_records() {
    let data = parse_legacy(r#"{"employees": ["Alice", {"name": "Bob"}]}"#).unwrap();
    assert!(data.properties.is_empty());
    assert!(data.entries.is_empty());
    let names: Vec<&str> = data.employees.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    assert!(parse_legacy("not json").is_err());
}

#[test]
fn test_import_command() {
    let db_path = setup_test_db("import_cli");
    let dir = temp_dir("import_cli");
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join("legacy.json");
    fs::write(&file, LEGACY).unwrap();

    rtk()
        .args(["--db", &db_path, "import", &file.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("2 properties").and(contains("2 entries")));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM entry_employees WHERE entry_id = 40", [], |row| row.get(0))
        .unwrap();
    assert_eq!(n, 2);
}

#[test]
fn test_import_command_missing_file_fails() {
    let db_path = setup_test_db("import_cli_missing");

    rtk()
        .args(["--db", &db_path, "import", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(contains("Import error"));
}
