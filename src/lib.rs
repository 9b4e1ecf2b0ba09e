pub mod api;
pub mod cli;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod serializer;
pub mod tree;
pub mod value;

pub use api::{Client, Container, Directory, ExecOpts, File};
pub use error::QueryError;
pub use flatten::{flatten, flatten_response};
pub use serializer::{serialize, QueryPrinter};
pub use tree::{Node, QueryTree};
pub use value::{Arguments, Map, Value};
