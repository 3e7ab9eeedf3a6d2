//! Error taxonomy for the calculation engine.
//!
//! Unknown type, item, ability and nature names are not errors: they resolve
//! to neutral values at the ingestion boundary and are logged at debug level.

use thiserror::Error;

/// Errors raised by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{kind} not found: {key}")]
    NotFound { kind: LookupKind, key: String },
}

impl CalcError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidArgument(message.into())
    }

    pub(crate) fn not_found(kind: LookupKind, key: impl Into<String>) -> Self {
        CalcError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

/// Which collaborator lookup missed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKind {
    BaseStats,
    Types,
    Move,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LookupKind::BaseStats => "base stats",
            LookupKind::Types => "types",
            LookupKind::Move => "move",
        })
    }
}

/// Configuration loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
