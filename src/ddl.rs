//! Schema text generation: one `CREATE TABLE` statement per table node.

use crate::model::{Column, TableNode};
use serde::Deserialize;
use std::borrow::Cow;

/// Options for [`generate_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DdlOptions {
    /// Wrap table and column names in double quotes. Off by default, in which
    /// case names are emitted verbatim with no escaping at all.
    pub quote_identifiers: bool,
}

/// Generate the schema text for `tables`, in slice order, separated by a
/// blank line.
pub fn generate_schema(tables: &[TableNode], options: &DdlOptions) -> String {
    tables
        .iter()
        .map(|table| create_table(table, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn create_table(table: &TableNode, options: &DdlOptions) -> String {
    let columns = table
        .columns
        .iter()
        .map(|col| column_definition(col, options))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        identifier(&table.name, options),
        columns
    )
}

fn column_definition(col: &Column, options: &DdlOptions) -> String {
    let mut def = format!("  {} {}", identifier(&col.name, options), col.typ);
    if col.primary_key {
        def.push_str(" PRIMARY KEY");
    } else if col.required {
        def.push_str(" NOT NULL");
    }
    def
}

fn identifier<'a>(name: &'a str, options: &DdlOptions) -> Cow<'a, str> {
    if options.quote_identifiers {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(name)
    }
}
