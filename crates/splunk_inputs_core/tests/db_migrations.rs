use rusqlite::Connection;
use splunk_inputs_core::db::migrations::latest_version;
use splunk_inputs_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "entities");
    assert_table_exists(&conn, "entity_attributes");
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inputs.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "entities");
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("inputs.db")).unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn attribute_rows_follow_entity_path_updates() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO entities (path, title) VALUES ('/services/data/inputs/udp/514', '514');
         INSERT INTO entity_attributes (entity_path, name, value_json)
         VALUES ('/services/data/inputs/udp/514', 'index', '\"net\"');
         UPDATE entities SET path = '/services/data/inputs/udp/myhost:514', title = 'myhost:514'
         WHERE path = '/services/data/inputs/udp/514';",
    )
    .unwrap();

    let moved: String = conn
        .query_row(
            "SELECT entity_path FROM entity_attributes WHERE name = 'index';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(moved, "/services/data/inputs/udp/myhost:514");
}

#[test]
fn attribute_rows_require_an_entity() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO entity_attributes (entity_path, name, value_json)
             VALUES ('/services/data/inputs/udp/514', 'index', '\"net\"');",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
