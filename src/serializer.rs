//! Rendering a [`QueryTree`] as engine query text.
//!
//! Each call opens one brace level, so a chain of `n` calls renders with `n`
//! nested brace pairs and the last call closes without an empty selection:
//!
//! ```text
//! {container{from(address:"alpine"){exec(args:["apk","add","curl"]){stdout}}}}
//! ```
//!
//! Arguments render as `name:value` pairs in the order they were added.
//! Strings are double-quoted, lists are bracketed, numbers and booleans are
//! bare literals and nested objects render as `{key:value,...}`. No
//! whitespace is emitted anywhere.
//!
//! # Examples
//!
//! ```
//! use calltree::{serialize, QueryTree};
//!
//! let tree = QueryTree::new().select("container").select("id");
//! assert_eq!(serialize(&tree).unwrap(), "{container{id}}");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    error::QueryError,
    tree::{Node, QueryTree},
    value::{Map, Value},
};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("identifier pattern compiles"));

/// Renders query trees as query text. See [`serialize`].
pub struct QueryPrinter;

impl QueryPrinter {
    pub fn new() -> Self {
        QueryPrinter
    }

    /// Renders `tree`, failing on an empty tree or an argument the query text
    /// cannot express.
    pub fn print(&self, tree: &QueryTree) -> Result<String, QueryError> {
        let nodes = tree.nodes();
        if nodes.is_empty() {
            return Err(QueryError::InvalidArgument(
                "cannot render a query tree without calls".into(),
            ));
        }

        let mut out = String::new();
        for node in &nodes {
            out.push('{');
            out.push_str(&self.print_node(node)?);
        }
        out.push_str(&"}".repeat(nodes.len()));

        debug!(calls = nodes.len(), query = %out, "rendered query");
        Ok(out)
    }

    fn print_node(&self, node: &Node) -> Result<String, QueryError> {
        check_identifier(&node.operation, "operation")?;

        if node.args.is_empty() {
            return Ok(node.operation.clone());
        }

        let args = self.print_pairs(&node.args, &node.operation)?;
        Ok(format!("{}({})", node.operation, args))
    }

    fn print_value(&self, value: &Value, context: &str) -> Result<String, QueryError> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Integer(n) => Ok(n.to_string()),
            Value::Float(n) if n.is_finite() => Ok(n.to_string()),
            Value::Float(n) => Err(QueryError::InvalidArgument(format!(
                "`{}` is not a finite number: {}",
                context, n
            ))),
            Value::String(s) => Ok(format!("\"{}\"", self.escape_string(s))),
            Value::List(items) => {
                let items = items
                    .iter()
                    .map(|v| self.print_value(v, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", items.join(",")))
            }
            Value::Object(map) => Ok(format!("{{{}}}", self.print_pairs(map, context)?)),
        }
    }

    fn print_pairs(&self, map: &Map, context: &str) -> Result<String, QueryError> {
        let pairs = map
            .iter()
            .map(|(name, value)| -> Result<String, QueryError> {
                check_identifier(name, context)?;
                let path = format!("{}.{}", context, name);
                Ok(format!("{}:{}", name, self.print_value(value, &path)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pairs.join(","))
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

impl Default for QueryPrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn check_identifier(name: &str, context: &str) -> Result<(), QueryError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(QueryError::InvalidArgument(format!(
            "`{}` is not a valid name (in `{}`)",
            name, context
        )))
    }
}

/// Renders a query tree as query text.
///
/// Fails with [`QueryError::InvalidArgument`] when the tree is empty, when an
/// operation or argument name is not an identifier, or when a float is NaN or
/// infinite. Nothing is returned on failure.
pub fn serialize(tree: &QueryTree) -> Result<String, QueryError> {
    QueryPrinter::new().print(tree)
}
