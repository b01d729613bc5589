use cadastro_core::db::migrations::latest_version;
use cadastro_core::db::open_db_in_memory;
use cadastro_core::{RepoError, SlotRepository, SqliteSlotRepository};
use rusqlite::Connection;

#[test]
fn read_absent_slot_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert_eq!(repo.read_slot("usuarios").unwrap(), None);
}

#[test]
fn write_then_read_roundtrips_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("usuarios", r#"[{"nome":"Ana"}]"#).unwrap();

    assert_eq!(
        repo.read_slot("usuarios").unwrap().as_deref(),
        Some(r#"[{"nome":"Ana"}]"#)
    );
}

#[test]
fn write_replaces_existing_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("usuarios", "first").unwrap();
    repo.write_slot("usuarios", "second").unwrap();

    assert_eq!(repo.read_slot("usuarios").unwrap().as_deref(), Some("second"));
}

#[test]
fn slots_are_isolated_by_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("usuarios", "payload").unwrap();

    assert_eq!(repo.read_slot("outros").unwrap(), None);
}

#[test]
fn clear_removes_slot_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    repo.write_slot("usuarios", "payload").unwrap();
    repo.clear_slot("usuarios").unwrap();
    repo.clear_slot("usuarios").unwrap();

    assert_eq!(repo.read_slot("usuarios").unwrap(), None);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("slots"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE slots (key TEXT PRIMARY KEY NOT NULL);")
        .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "slots",
            column: "value"
        })
    ));
}
