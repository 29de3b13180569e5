use predicates::str::contains;

mod common;
use common::{rtk, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rtk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let mut tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    tables.sort();
    assert_eq!(
        tables,
        vec!["activeTimers", "employees", "entries", "entry_employees", "properties"]
    );
}

#[test]
fn test_init_twice_keeps_database() {
    let db_path = setup_test_db("cli_init_twice");

    rtk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute("INSERT INTO employees (name) VALUES ('Alice')", [])
            .unwrap();
    }

    rtk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("already exists"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
        .unwrap();
    assert_eq!(n, 1);
}

#[test]
fn test_help_lists_commands() {
    rtk()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("serve"))
        .stdout(contains("import"))
        .stdout(contains("backup"));
}
