//! Extracting the requested value from a nested engine response.
//!
//! A response mirrors the query: one nesting level per call.
//!
//! ```
//! use calltree::{flatten, Value};
//! use serde_json::json;
//!
//! let response = Value::from(json!({
//!     "container": {"from": {"exec": {"stdout": {"contents": "ok"}}}}
//! }));
//!
//! let leaf = flatten(response).unwrap();
//! assert_eq!(leaf, Value::from(json!({"contents": "ok"})));
//! ```
//!
//! A single-key object holding a scalar is returned whole below the top
//! level. Only a top-level `{key: scalar}` unwraps to the scalar:
//!
//! ```
//! use calltree::{flatten, Value};
//! use serde_json::json;
//!
//! let nested = Value::from(json!({"container": {"exitCode": 0}}));
//! assert_eq!(flatten(nested).unwrap(), Value::from(json!({"exitCode": 0})));
//!
//! let top = Value::from(json!({"exitCode": 0}));
//! assert_eq!(flatten(top).unwrap(), Value::Integer(0));
//! ```

use tracing::trace;

use crate::{
    error::QueryError,
    value::{Map, Value},
};

/// Walks down single-key levels and returns the value at the bottom.
///
/// Descent stops at the first level with more than one key (that mapping is
/// returned), at a scalar or list (returned as-is), or at a single-key
/// mapping holding a scalar, which is returned whole rather than unwrapped.
///
/// Fails with [`QueryError::InvalidResponse`] if the response is not a
/// mapping or an empty mapping is reached.
pub fn flatten(response: Value) -> Result<Value, QueryError> {
    let mut level = match response {
        Value::Object(map) => map,
        other => {
            return Err(QueryError::InvalidResponse(format!(
                "expected an object, got {}",
                other.type_name()
            )));
        }
    };
    let mut depth = 0;

    loop {
        if level.len() > 1 {
            trace!(depth, keys = level.len(), "stopping at multi-key level");
            return Ok(Value::Object(level));
        }

        let Some((key, child)) = level.pop() else {
            return Err(QueryError::InvalidResponse(format!(
                "empty object at depth {}",
                depth
            )));
        };

        match child {
            Value::Object(inner) if descends(&inner) => {
                trace!(%key, depth, "descending");
                level = inner;
                depth += 1;
            }
            Value::Object(inner) if inner.is_empty() => {
                return Err(QueryError::InvalidResponse(format!(
                    "`{}` holds an empty object",
                    key
                )));
            }
            leaf => {
                trace!(%key, depth, kind = leaf.type_name(), "reached leaf");
                return Ok(leaf);
            }
        }
    }
}

// A mapping is another call level when its only value is itself a mapping.
fn descends(map: &Map) -> bool {
    map.len() == 1 && map.values().next().is_some_and(Value::is_object)
}

/// Unwraps an engine response envelope and flattens its `data`.
///
/// The envelope is `{"data": ..., "errors": [...]}`. Any entry in `errors`
/// turns the whole response into [`QueryError::Engine`], carrying each
/// error's `message` (or the raw error when it has none).
///
/// ```
/// use calltree::{flatten_response, QueryError, Value};
/// use serde_json::json;
///
/// let failed = Value::from(json!({
///     "data": null,
///     "errors": [{"message": "image not found"}]
/// }));
///
/// assert_eq!(
///     flatten_response(failed),
///     Err(QueryError::Engine(vec!["image not found".to_string()]))
/// );
/// ```
pub fn flatten_response(envelope: Value) -> Result<Value, QueryError> {
    let mut envelope = match envelope {
        Value::Object(map) => map,
        other => {
            return Err(QueryError::InvalidResponse(format!(
                "expected a response envelope object, got {}",
                other.type_name()
            )));
        }
    };

    match envelope.shift_remove("errors") {
        None | Some(Value::Null) => {}
        Some(Value::List(errors)) if errors.is_empty() => {}
        Some(Value::List(errors)) => {
            return Err(QueryError::Engine(
                errors.into_iter().map(error_message).collect(),
            ));
        }
        Some(other) => {
            return Err(QueryError::InvalidResponse(format!(
                "`errors` must be a list, got {}",
                other.type_name()
            )));
        }
    }

    match envelope.shift_remove("data") {
        None | Some(Value::Null) => Err(QueryError::InvalidResponse(
            "response carries no data".into(),
        )),
        Some(data) => flatten(data),
    }
}

fn error_message(error: Value) -> String {
    if let Some(message) = error.as_object().and_then(|e| e.get("message")).and_then(Value::as_str) {
        return message.to_string();
    }
    serde_json::Value::from(error).to_string()
}
