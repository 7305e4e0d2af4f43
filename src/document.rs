//! JSON save/load for diagrams.
//!
//! ```json
//! { "tables": [ { "id": "1", "name": "users", "x": 100, "y": 100,
//!                 "columns": [ { "id": "1", "name": "id", "type": "UUID",
//!                                "primary_key": true, "required": true } ] } ],
//!   "relationships": [ { "id": "1", "from_table": "users", "from_column": "id",
//!                        "to_table": "orders", "to_column": "user_id",
//!                        "type": "one-to-many" } ] }
//! ```

use crate::diagram::Diagram;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid diagram document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Duplicate table id: {0}")]
    DuplicateTableId(String),
    #[error("Duplicate column id {column} in table {table}")]
    DuplicateColumnId { table: String, column: String },
    #[error("Table {0} has a non-finite position")]
    NonFiniteCoordinate(String),
}

pub fn from_json(source: &str) -> Result<Diagram, DocumentError> {
    let diagram: Diagram = serde_json::from_str(source)?;
    validate(&diagram)?;
    Ok(diagram)
}

/// JSON has no NaN or infinity, so a node at such a position is refused
/// rather than written as `null`.
pub fn to_json(diagram: &Diagram) -> Result<String, DocumentError> {
    if let Some(table) = diagram
        .tables()
        .iter()
        .find(|t| !(t.position.x.is_finite() && t.position.y.is_finite()))
    {
        return Err(DocumentError::NonFiniteCoordinate(table.id.clone()));
    }
    Ok(serde_json::to_string_pretty(diagram)?)
}

pub fn load(path: impl AsRef<Path>) -> Result<Diagram, DocumentError> {
    let path = path.as_ref();
    log::info!(path = path.display().to_string(); "Loading diagram");
    let source = fs::read_to_string(path)?;
    from_json(&source)
}

pub fn save(path: impl AsRef<Path>, diagram: &Diagram) -> Result<(), DocumentError> {
    let path = path.as_ref();
    fs::write(path, to_json(diagram)?)?;
    log::info!(path = path.display().to_string(); "Saved diagram");
    Ok(())
}

fn validate(diagram: &Diagram) -> Result<(), DocumentError> {
    let mut table_ids = HashSet::new();
    for table in diagram.tables() {
        if !table_ids.insert(table.id.as_str()) {
            return Err(DocumentError::DuplicateTableId(table.id.clone()));
        }
        let mut column_ids = HashSet::new();
        for col in &table.columns {
            if !column_ids.insert(col.id.as_str()) {
                return Err(DocumentError::DuplicateColumnId {
                    table: table.id.clone(),
                    column: col.id.clone(),
                });
            }
        }
    }

    let index = diagram.name_index();
    for rel in diagram.relationships() {
        for (table, column) in [
            (&rel.from_table, &rel.from_column),
            (&rel.to_table, &rel.to_column),
        ] {
            let Some(node) = index.get(table.as_str()) else {
                continue;
            };
            if node.column(column).is_none() {
                log::warn!(
                    relationship = rel.id.as_str(),
                    table = table.as_str(),
                    column = column.as_str();
                    "Relationship refers to a column the table does not have"
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cardinality, Position};

    #[test]
    fn test_parse_document() {
        let input = r#"{
            "tables": [
                { "id": "1", "name": "users", "x": 10, "y": 20.5,
                  "columns": [ { "id": "1", "name": "id", "type": "UUID", "primary_key": true } ] },
                { "id": "2", "name": "orders", "x": 300, "y": 20 }
            ],
            "relationships": [
                { "id": "r1", "from_table": "users", "from_column": "id",
                  "to_table": "orders", "to_column": "user_id", "type": "one-to-many" }
            ]
        }"#;
        let diagram = from_json(input).unwrap();

        let users = diagram.table("1").unwrap();
        assert_eq!(users.position, Position::new(10.0, 20.5));
        assert!(users.columns[0].primary_key);
        assert!(!users.columns[0].required);
        assert!(diagram.table("2").unwrap().columns.is_empty());
        assert_eq!(diagram.relationships()[0].cardinality, Cardinality::OneToMany);
    }

    #[test]
    fn test_unknown_cardinality_rejected() {
        let input = r#"{ "relationships": [ { "id": "1", "from_table": "a", "from_column": "b",
            "to_table": "c", "to_column": "d", "type": "some-to-some" } ] }"#;
        assert!(matches!(from_json(input), Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_duplicate_table_id() {
        let input = r#"{ "tables": [
            { "id": "1", "name": "a", "x": 0, "y": 0 },
            { "id": "1", "name": "b", "x": 0, "y": 0 } ] }"#;
        match from_json(input) {
            Err(DocumentError::DuplicateTableId(id)) => assert_eq!(id, "1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_column_id() {
        let input = r#"{ "tables": [ { "id": "t", "name": "a", "x": 0, "y": 0, "columns": [
            { "id": "c", "name": "x", "type": "INT" },
            { "id": "c", "name": "y", "type": "INT" } ] } ] }"#;
        assert!(matches!(
            from_json(input),
            Err(DocumentError::DuplicateColumnId { .. })
        ));
    }

    #[test]
    fn test_unknown_relationship_column_still_loads() {
        let input = r#"{ "tables": [ { "id": "1", "name": "a", "x": 0, "y": 0 },
                                     { "id": "2", "name": "b", "x": 300, "y": 0 } ],
            "relationships": [ { "id": "r", "from_table": "a", "from_column": "id",
                "to_table": "b", "to_column": "a_id", "type": "one-to-one" } ] }"#;
        let diagram = from_json(input).unwrap();
        assert_eq!(diagram.connectors().len(), 1);
    }

    #[test]
    fn test_non_finite_position_not_serialized() {
        let mut diagram = Diagram::sample();
        diagram.move_table("1", f64::INFINITY, f64::NAN);
        match to_json(&diagram) {
            Err(DocumentError::NonFiniteCoordinate(id)) => assert_eq!(id, "1"),
            other => panic!("unexpected result: {other:?}"),
        }

        diagram.move_table("1", -12345.5, 0.0);
        let loaded = from_json(&to_json(&diagram).unwrap()).unwrap();
        assert_eq!(loaded, diagram);
    }

    #[test]
    fn test_save_keeps_file_on_non_finite_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        save(&path, &Diagram::sample()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut diagram = Diagram::sample();
        diagram.move_table("2", 0.0, f64::NEG_INFINITY);
        assert!(matches!(
            save(&path, &diagram),
            Err(DocumentError::NonFiniteCoordinate(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");

        let mut diagram = Diagram::sample();
        diagram.move_table("3", 640.0, 20.0);
        save(&path, &diagram).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, diagram);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("nope.json")),
            Err(DocumentError::Io(_))
        ));
    }
}
