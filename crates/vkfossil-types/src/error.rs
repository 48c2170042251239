use thiserror::Error;

/// Errors produced when parsing foundation types from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown object kind: {0}")]
    UnknownKind(String),
}
