use crate::config::ConfigError;
use crate::document::DocumentError;

#[derive(Debug, thiserror::Error)]
pub enum ErdError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown table id: {0}")]
    UnknownTable(String),
    #[error("Coordinates must be finite, got ({0}, {1})")]
    NonFiniteCoordinate(f64, f64),
}
