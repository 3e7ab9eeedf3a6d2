pub mod damage;
pub mod speed;
pub mod stats;

use std::fs;
use std::path::Path;

use poke_calc::MemoryDex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RunnerError;

pub fn read_file(path: &Path) -> Result<String, RunnerError> {
    fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_dex(path: &Path) -> Result<MemoryDex, RunnerError> {
    Ok(MemoryDex::from_json(&read_file(path)?)?)
}

/// Parse JSON given inline (starting with `{`) or as a file path.
pub fn read_json<T: DeserializeOwned>(arg: &str) -> Result<T, RunnerError> {
    let text = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        read_file(Path::new(arg))?
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), RunnerError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
