use std::path::PathBuf;

use poke_calc::{CalcError, ConfigError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
