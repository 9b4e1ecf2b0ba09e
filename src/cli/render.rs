//! Render a JSON-described call chain as query text
//!
//! A chain is a JSON array of calls, root first:
//!
//! ```text
//! [
//!   {"operation": "container"},
//!   {"operation": "from", "args": {"address": "alpine"}},
//!   {"operation": "stdout"}
//! ]
//! ```

use super::CliError;
use crate::{serialize, Arguments, QueryTree, Value};

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Call chain JSON
    pub input: Option<String>,
}

/// Builds a query tree from a parsed call chain.
pub fn parse_chain(chain: serde_json::Value) -> Result<QueryTree, CliError> {
    let serde_json::Value::Array(calls) = chain else {
        return Err(CliError::InvalidChain("expected an array of calls".into()));
    };

    let mut tree = QueryTree::new();
    for (index, call) in calls.into_iter().enumerate() {
        let serde_json::Value::Object(mut call) = call else {
            return Err(CliError::InvalidChain(format!("call {} is not an object", index)));
        };

        let operation = match call.remove("operation") {
            Some(serde_json::Value::String(op)) => op,
            _ => {
                return Err(CliError::InvalidChain(format!(
                    "call {} has no string `operation`",
                    index
                )));
            }
        };

        let args = match call.remove("args").map(Value::from) {
            None | Some(Value::Null) => Arguments::new(),
            Some(Value::Object(args)) => args,
            Some(other) => {
                return Err(CliError::InvalidChain(format!(
                    "`args` of `{}` must be an object, got {}",
                    operation,
                    other.type_name()
                )));
            }
        };

        tree = tree.select_with(operation, args);
    }
    Ok(tree)
}

/// Execute a calltree render operation
pub fn execute_render(options: &RenderOptions) -> Result<String, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let chain: serde_json::Value = serde_json::from_str(json_str)?;
    let tree = parse_chain(chain)?;
    Ok(serialize(&tree)?)
}
