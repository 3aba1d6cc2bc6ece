//! Integration tests for the sqlmodel-store crate.
//!
//! These tests exercise the full store lifecycle against real SQLite
//! databases on disk (via tempfile): directory provisioning, DDL generated
//! from model metadata, and statement round-trips.

use sqlmodel_schema::{FieldDescriptor, ModelDefinition, TableSpec};
use sqlmodel_store::{
    ErrorKind, ExecResult, SqlValue, SqliteStore, StoreConfig, StoreError, StoreState, sql_params,
};

fn user_model() -> ModelDefinition {
    ModelDefinition::new("user")
        .with_field(
            FieldDescriptor::new("id")
                .with_db_type("INTEGER")
                .primary_key()
                .auto_increment(),
        )
        .with_field(
            FieldDescriptor::new("email")
                .with_db_type("VARCHAR(255)")
                .unique()
                .indexed(),
        )
        .with_field(FieldDescriptor::new("nick").with_default("anon"))
        .with_field(FieldDescriptor::new("score").with_db_type("double"))
        .with_index("byNick", "nick")
}

// ═══════════════════════════════════════════════════════════════════════
//  Lifecycle on disk
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn init_provisions_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("one").join("two").join("three").join("app.db");

    let mut store = SqliteStore::new(StoreConfig::new().with_file(&db_path));
    store.init().await.unwrap();
    assert_eq!(store.state(), StoreState::Open);
    assert!(dir.path().join("one").join("two").join("three").is_dir());

    store.exec_batch("CREATE TABLE t (v INTEGER);").await.unwrap();
    store.close().await.unwrap();

    // The file exists once the connection has written to it.
    assert!(db_path.exists());
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("persist.db");
    let config = StoreConfig::new().with_file(&db_path);

    let mut store = SqliteStore::new(config.clone());
    store.init().await.unwrap();
    store
        .create_table(&TableSpec::from_model(&user_model()))
        .await
        .unwrap();
    store
        .exec(
            "INSERT INTO user (email, score) VALUES (?1, ?2)",
            &sql_params!["a@example.com", 1.25],
        )
        .await
        .unwrap();
    store.close().await.unwrap();

    let mut reopened = SqliteStore::new(config);
    reopened.init().await.unwrap();
    let rows = reopened.query("SELECT email FROM user", &[]).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("email").and_then(SqlValue::as_str),
        Some("a@example.com")
    );
    reopened.close().await.unwrap();
}

#[tokio::test]
async fn open_failure_leaves_store_unopened() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the database file should be cannot be opened.
    let db_path = dir.path().join("actually_a_dir");
    std::fs::create_dir(&db_path).unwrap();

    let mut store = SqliteStore::new(StoreConfig::new().with_file(&db_path));
    let err = store.init().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(store.state(), StoreState::Unopened);
    assert!(matches!(
        store.query("SELECT 1", &[]).await,
        Err(StoreError::NotOpen)
    ));
}

#[tokio::test]
async fn provisioning_failure_is_io() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let mut store = SqliteStore::new(StoreConfig::new().with_file(blocker.join("sub").join("app.db")));
    let err = store.init().await.unwrap_err();
    assert!(matches!(err, StoreError::Provision { .. }));
    assert_eq!(store.state(), StoreState::Unopened);
}

// ═══════════════════════════════════════════════════════════════════════
//  Generated DDL round-trip
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn generated_schema_round_trip() {
    let mut store = SqliteStore::in_memory();
    store.init().await.unwrap();

    let spec = TableSpec::from_model(&user_model());
    store.create_table(&spec).await.unwrap();

    let inserted = store
        .exec(
            "INSERT INTO user (email, score) VALUES (?1, ?2)",
            &sql_params!["ada@example.com", 99.5],
        )
        .await
        .unwrap();
    assert_eq!(
        inserted,
        ExecResult {
            affected_rows: 1,
            insert_id: Some(1)
        }
    );

    let rows = store
        .query("SELECT id, email, nick, score FROM user WHERE id = ?1", &sql_params![1_i64])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("id"), Some(&SqlValue::Integer(1)));
    assert_eq!(row.get("email"), Some(&SqlValue::Text("ada@example.com".into())));
    assert_eq!(row.get("nick"), Some(&SqlValue::Text("anon".into())));
    assert_eq!(row.get("score"), Some(&SqlValue::Real(99.5)));

    store.close().await.unwrap();
}

#[tokio::test]
async fn generated_indices_exist() {
    let mut store = SqliteStore::in_memory();
    store.init().await.unwrap();
    store
        .create_table(&TableSpec::from_model(&user_model()))
        .await
        .unwrap();

    let rows = store
        .query(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'user' AND name LIKE '%_INDEX' ORDER BY name",
            &[],
        )
        .await
        .unwrap();
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.get("name").and_then(SqlValue::as_str))
        .collect();
    assert_eq!(names, ["byNick_INDEX", "email_INDEX"]);
    store.close().await.unwrap();
}

#[tokio::test]
async fn unique_constraint_is_a_driver_failure() {
    let mut store = SqliteStore::in_memory();
    store.init().await.unwrap();
    store
        .create_table(&TableSpec::from_model(&user_model()))
        .await
        .unwrap();

    let insert = "INSERT INTO user (email) VALUES (?1)";
    store.exec(insert, &sql_params!["dup@example.com"]).await.unwrap();
    let err = store
        .exec(insert, &sql_params!["dup@example.com"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Driver);
    store.close().await.unwrap();
}

#[tokio::test]
async fn creating_a_table_twice_fails() {
    let mut store = SqliteStore::in_memory();
    store.init().await.unwrap();
    let spec = TableSpec::from_model(&user_model());
    store.create_table(&spec).await.unwrap();
    let err = store.create_table(&spec).await.unwrap_err();
    assert!(matches!(err, StoreError::Driver(_)));
    store.close().await.unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
//  Configuration file
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn store_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cfg").join("main.db");
    let config_path = dir.path().join("store.toml");
    std::fs::write(
        &config_path,
        format!(
            "[store]\nfile = {:?}\nbusy_timeout_ms = 100\n",
            db_path.display().to_string()
        ),
    )
    .unwrap();

    let config = StoreConfig::load(&config_path).unwrap();
    assert_eq!(config.busy_timeout_ms, 100);

    let mut store = SqliteStore::new(config);
    store.init().await.unwrap();
    store.exec_batch("CREATE TABLE t (v INTEGER);").await.unwrap();
    store.close().await.unwrap();
    assert!(db_path.exists());
}

#[test]
fn missing_config_file_is_config_error() {
    let err = StoreConfig::load("/definitely/not/here.toml").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
