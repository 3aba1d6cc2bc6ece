//! Integration tests for the sqlmodel-schema crate.
//!
//! These tests feed model metadata in the shape the ORM produces (JSON and
//! TOML) through normalization and DDL generation.

use sqlmodel_schema::{ModelDefinition, TableSpec, generate_create_table, normalize};

const USER_MODEL: &str = r#"{
    "table": "user",
    "fields": [
        {"name": "id", "dbType": "INTEGER", "primaryKey": true, "autoIncrement": true},
        {"name": "email", "dbType": "VARCHAR(255)", "unique": true, "index": true},
        {"name": "nick"},
        {"name": "age", "type": "number"},
        {"name": "score", "dbType": "double", "defaultValue": 0},
        {"name": "bio", "dbType": "text", "require": true},
        {"name": "avatar", "dbType": "blob"}
    ],
    "indices": {"byNickAge": ["nick", "age"]}
}"#;

// ═══════════════════════════════════════════════════════════════════════
//  Normalization over a full model
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_column_has_a_canonical_type() {
    let model = ModelDefinition::from_json_str(USER_MODEL).unwrap();
    let spec = TableSpec::from_model(&model);

    let types: Vec<(&str, &str, &str)> = spec
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.db_type.as_str(), c.field_type.as_str()))
        .collect();

    assert_eq!(
        types,
        [
            ("id", "INTEGER", "number"),
            ("email", "VARCHAR(255)", "string"),
            ("nick", "VARCHAR(45)", "string"),
            ("age", "NUMBER", "number"),
            ("score", "NUMBER", "number"),
            ("bio", "TEXT", "string"),
            ("avatar", "BLOB", "blob"),
        ]
    );
    assert_eq!(spec.column("email").unwrap().max_length(), Some(255));
    assert_eq!(spec.column("nick").unwrap().max_length(), Some(45));
    assert_eq!(spec.column("bio").unwrap().max_length(), None);
}

#[test]
fn normalization_leaves_model_untouched() {
    let model = ModelDefinition::from_json_str(USER_MODEL).unwrap();
    let snapshot = model.clone();
    for field in &model.fields {
        let _ = normalize(field);
    }
    let _ = TableSpec::from_model(&model);
    assert_eq!(model, snapshot);
    assert!(model.fields[2].db_type.is_none());
}

// ═══════════════════════════════════════════════════════════════════════
//  DDL text
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn full_model_ddl() {
    let model = ModelDefinition::from_json_str(USER_MODEL).unwrap();
    let sql = generate_create_table(&TableSpec::from_model(&model));

    let expected = concat!(
        "CREATE TABLE `user` (\n",
        "  `id` INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,\n",
        "  `email` VARCHAR(255) UNIQUE,\n",
        "  `nick` VARCHAR(45),\n",
        "  `age` NUMBER,\n",
        "  `score` NUMBER DEFAULT '0',\n",
        "  `bio` TEXT NOT NULL,\n",
        "  `avatar` BLOB);",
        "CREATE INDEX `byNickAge_INDEX` on user(nick,age);",
        "CREATE INDEX `email_INDEX` on user(email);",
    );
    assert_eq!(sql, expected);
}

#[test]
fn toml_and_json_models_agree() {
    let json = ModelDefinition::from_json_str(
        r#"{"table": "tag", "fields": [{"name": "label", "dbType": "char(12)", "index": true}], "indices": {"byLabel": "label"}}"#,
    )
    .unwrap();
    let toml = ModelDefinition::from_toml_str(
        r#"
        table = "tag"

        [[fields]]
        name = "label"
        dbType = "char(12)"
        index = true

        [indices]
        byLabel = "label"
        "#,
    )
    .unwrap();

    assert_eq!(
        generate_create_table(&TableSpec::from_model(&json)),
        generate_create_table(&TableSpec::from_model(&toml))
    );
}

#[test]
fn statement_count_matches_index_count() {
    let model = ModelDefinition::from_json_str(USER_MODEL).unwrap();
    let sql = generate_create_table(&TableSpec::from_model(&model));
    assert_eq!(sql.matches(';').count(), 3);
    assert_eq!(sql.matches("CREATE INDEX").count(), 2);
}
