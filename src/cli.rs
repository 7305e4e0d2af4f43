//! Command-line front end: argument definitions and the command runner.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use crate::svg::SvgRenderer;
use crate::{AppConfig, Diagram, ErdError, document};

/// ER diagram canvas: print schema SQL, render SVG, inspect or move tables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Diagram document (JSON). The built-in sample schema is used when omitted.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print CREATE TABLE statements for every table
    Sql {
        /// Quote table and column names (also enabled by `[ddl]` in the config)
        #[arg(long)]
        quote_identifiers: bool,
    },
    /// Render the diagram to SVG
    Svg {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print table, relationship and column counts
    Stats,
    /// Move a table and write the updated document
    Move {
        id: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_coordinate)]
        x: f64,
        #[arg(allow_negative_numbers = true, value_parser = parse_coordinate)]
        y: f64,
        /// Where to write the document (default: the input file, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_coordinate(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate must be finite, got {s}"))
    }
}

/// Run one command, writing anything meant for stdout to `out`.
///
/// # Errors
///
/// Returns `ErdError` for configuration or document errors, I/O failures and
/// moves that name an unknown table.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), ErdError> {
    let mut config = AppConfig::load_or_default(args.config.as_ref())?;
    let mut diagram = match &args.input {
        Some(path) => document::load(path)?,
        None => Diagram::sample(),
    };

    match &args.command {
        Command::Sql { quote_identifiers } => {
            config.ddl.quote_identifiers |= *quote_identifiers;
            writeln!(out, "{}", diagram.generate_schema_text_with(&config.ddl))?;
        }
        Command::Svg { output } => {
            let svg = SvgRenderer::new(config.render).render(&diagram);
            match output {
                Some(path) => {
                    fs::write(path, svg)?;
                    info!(output_file = path.display().to_string(); "SVG exported");
                }
                None => write!(out, "{svg}")?,
            }
        }
        Command::Stats => {
            let stats = diagram.stats();
            writeln!(out, "Total Tables        {}", stats.tables)?;
            writeln!(out, "Total Relationships {}", stats.relationships)?;
            writeln!(out, "Total Columns       {}", stats.columns)?;
        }
        Command::Move { id, x, y, output } => {
            if !x.is_finite() || !y.is_finite() {
                return Err(ErdError::NonFiniteCoordinate(*x, *y));
            }
            if !diagram.move_table(id, *x, *y) {
                return Err(ErdError::UnknownTable(id.clone()));
            }
            match output.as_ref().or(args.input.as_ref()) {
                Some(path) => document::save(path, &diagram)?,
                None => writeln!(out, "{}", document::to_json(&diagram)?)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_negative_coordinates() {
        let args = Args::try_parse_from(["erdboard", "move", "1", "-20.5", "-3"]).unwrap();
        match args.command {
            Command::Move { id, x, y, output } => {
                assert_eq!(id, "1");
                assert_eq!((x, y), (-20.5, -3.0));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_finite_coordinates() {
        for bad in ["inf", "-inf", "NaN", "infinity"] {
            assert!(
                Args::try_parse_from(["erdboard", "move", "1", bad, "0"]).is_err(),
                "{bad} accepted"
            );
        }
        assert!(Args::try_parse_from(["erdboard", "move", "1", "0", "abc"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["erdboard", "stats", "-i", "doc.json", "--log-level", "off"])
                .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("doc.json")));
        assert_eq!(args.log_level, "off");
    }
}
