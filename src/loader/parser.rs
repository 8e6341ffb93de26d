use serde::de::DeserializeOwned;
use std::fs;

use crate::error::{Error, Result};

/// Reads the file at `file_path` and parses it as JSON into `T`.
///
/// Fails with `Error::IoError` when the file cannot be read and with
/// `Error::DeserializationError` when its content does not match `T`.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    parse_json_str(&data)
}

pub fn parse_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    let parsed_data: T = serde_json::from_str(data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}
