use crate::connector::{self, Connector};
use crate::ddl::{self, DdlOptions};
use crate::model::{Cardinality, Column, Position, Relationship, TableNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table nodes plus the relationships drawn between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    tables: Vec<TableNode>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

/// Counts shown in the statistics panel. Always computed from the current
/// collections, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaStats {
    pub tables: usize,
    pub relationships: usize,
    pub columns: usize,
}

impl Diagram {
    pub fn new(tables: Vec<TableNode>, relationships: Vec<Relationship>) -> Self {
        Self {
            tables,
            relationships,
        }
    }

    /// The starter schema: `users`, `orders` and `products`, with
    /// `users.id -> orders.user_id` as the only relationship.
    pub fn sample() -> Self {
        let users = TableNode::new("1", "users", 100.0, 100.0)
            .with_column(Column::new("1", "id", "UUID").pk().not_null())
            .with_column(Column::new("2", "email", "VARCHAR(255)").not_null())
            .with_column(Column::new("3", "first_name", "VARCHAR(100)").not_null())
            .with_column(Column::new("4", "last_name", "VARCHAR(100)").not_null())
            .with_column(Column::new("5", "created_at", "TIMESTAMP").not_null());

        let orders = TableNode::new("2", "orders", 400.0, 100.0)
            .with_column(Column::new("6", "id", "UUID").pk().not_null())
            .with_column(Column::new("7", "user_id", "UUID").fk().not_null())
            .with_column(Column::new("8", "total_amount", "DECIMAL(10,2)").not_null())
            .with_column(Column::new("9", "status", "VARCHAR(50)").not_null())
            .with_column(Column::new("10", "created_at", "TIMESTAMP").not_null());

        let products = TableNode::new("3", "products", 100.0, 350.0)
            .with_column(Column::new("11", "id", "UUID").pk().not_null())
            .with_column(Column::new("12", "name", "VARCHAR(255)").not_null())
            .with_column(Column::new("13", "price", "DECIMAL(10,2)").not_null())
            .with_column(Column::new("14", "category_id", "UUID").fk().not_null())
            .with_column(Column::new("15", "stock_quantity", "INTEGER").not_null());

        let relationships = vec![Relationship::new(
            "1",
            ("users", "id"),
            ("orders", "user_id"),
            Cardinality::OneToMany,
        )];

        Self::new(vec![users, orders, products], relationships)
    }

    pub fn tables(&self) -> &[TableNode] {
        &self.tables
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn table(&self, id: &str) -> Option<&TableNode> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<&TableNode> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Replace the position of the node with `id`. No bounds checks and no
    /// collision handling. Returns `false` (and changes nothing) if no node
    /// has that id.
    pub fn move_table(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.tables.iter_mut().find(|t| t.id == id) {
            Some(table) => {
                table.position = Position::new(x, y);
                true
            }
            None => {
                log::trace!(table_id = id; "Move requested for unknown table");
                false
            }
        }
    }

    /// Rename a node and rewrite the relationship endpoints that currently
    /// resolve to it, so existing connectors keep resolving. Endpoints that
    /// name a different node sharing the old name are left alone.
    pub fn rename_table(&mut self, id: &str, new_name: &str) -> bool {
        let Some(old_name) = self.table(id).map(|t| t.name.clone()) else {
            return false;
        };
        let owns_name = self
            .name_index()
            .get(old_name.as_str())
            .is_some_and(|t| t.id == id);

        if let Some(table) = self.tables.iter_mut().find(|t| t.id == id) {
            table.name = new_name.to_string();
        }

        let mut rewritten = 0;
        if owns_name {
            for rel in &mut self.relationships {
                if rel.from_table == old_name {
                    rel.from_table = new_name.to_string();
                    rewritten += 1;
                }
                if rel.to_table == old_name {
                    rel.to_table = new_name.to_string();
                    rewritten += 1;
                }
            }
        }
        log::debug!(
            table_id = id,
            old_name = old_name.as_str(),
            new_name = new_name,
            endpoints = rewritten;
            "Renamed table"
        );
        true
    }

    pub fn generate_schema_text(&self) -> String {
        self.generate_schema_text_with(&DdlOptions::default())
    }

    pub fn generate_schema_text_with(&self, options: &DdlOptions) -> String {
        ddl::generate_schema(&self.tables, options)
    }

    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            tables: self.tables.len(),
            relationships: self.relationships.len(),
            columns: self.tables.iter().map(|t| t.columns.len()).sum(),
        }
    }

    /// Name -> node map. With duplicate names the first node in collection
    /// order wins.
    pub fn name_index(&self) -> HashMap<&str, &TableNode> {
        let mut index = HashMap::with_capacity(self.tables.len());
        for table in &self.tables {
            index.entry(table.name.as_str()).or_insert(table);
        }
        index
    }

    /// Connectors for every relationship whose endpoints both resolve.
    pub fn connectors(&self) -> Vec<Connector> {
        let index = self.name_index();
        self.relationships
            .iter()
            .filter_map(|rel| connector::resolve(rel, &index))
            .collect()
    }
}
