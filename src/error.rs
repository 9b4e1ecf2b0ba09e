/// Errors raised while building, rendering or flattening a query.
///
/// All of them are local and synchronous: nothing is partially rendered or
/// partially flattened when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// An argument or operation the query text cannot express
    /// (missing required value, bad identifier, non-finite number, empty tree)
    InvalidArgument(String),

    /// A response that is empty, not a mapping, or otherwise malformed
    InvalidResponse(String),

    /// Errors reported by the engine in the response envelope
    Engine(Vec<String>),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            QueryError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            QueryError::Engine(messages) => write!(f, "Engine error: {}", messages.join("; ")),
        }
    }
}

impl std::error::Error for QueryError {}
