//! Flatten an engine response read as JSON

use super::CliError;
use crate::{flatten, flatten_response, Value};

/// Options for the flatten command
#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
    /// Response JSON
    pub input: Option<String>,
    /// Treat the input as a `{data, errors}` envelope
    pub envelope: bool,
}

/// Execute a calltree flatten operation
pub fn execute_flatten(options: &FlattenOptions) -> Result<serde_json::Value, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let response = Value::from(serde_json::from_str::<serde_json::Value>(json_str)?);

    let leaf = if options.envelope {
        flatten_response(response)?
    } else {
        flatten(response)?
    };
    Ok(leaf.into())
}
