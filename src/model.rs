//! Data types shared by the diagram, the renderer and the document format.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Top-left corner of a node on the canvas. Unconstrained: nodes may overlap
/// or sit outside the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    /// Free-text type label, never validated.
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub foreign_key: bool,
    #[serde(default)]
    pub required: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            typ: typ.into(),
            primary_key: false,
            foreign_key: false,
            required: false,
        }
    }

    pub fn pk(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn fk(mut self) -> Self {
        self.foreign_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl TableNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Position::new(x, y),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Descriptive cardinality tag. Nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    /// Label drawn at the midpoint of a connector.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToMany => "N:M",
        }
    }
}

/// Directed association between a column of one table and a column of
/// another. Endpoints refer to tables and columns by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    #[serde(rename = "type")]
    pub cardinality: Cardinality,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        from: (&str, &str),
        to: (&str, &str),
        cardinality: Cardinality,
    ) -> Self {
        Self {
            id: id.into(),
            from_table: from.0.to_string(),
            from_column: from.1.to_string(),
            to_table: to.0.to_string(),
            to_column: to.1.to_string(),
            cardinality,
        }
    }
}
