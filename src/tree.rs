//! The query tree: an immutable chain of operation calls.
//!
//! Every call appends one [`Node`] and hands back a new [`QueryTree`]
//! positioned at that node. The tree it was called on is left untouched, so
//! an intermediate tree can be kept and extended in several directions:
//!
//! ```
//! use calltree::{Arguments, QueryTree, Value};
//!
//! let image = QueryTree::new()
//!     .select("container")
//!     .select_with("from", Arguments::from([("address".to_string(), Value::from("alpine"))]));
//!
//! let stdout = image.select("stdout");
//! let stderr = image.select("stderr");
//!
//! assert_eq!(image.len(), 2);
//! assert_eq!(stdout.leaf().unwrap().operation, "stdout");
//! assert_eq!(stderr.leaf().unwrap().operation, "stderr");
//! ```
//!
//! Nodes are shared between branches through reference-counted parent
//! links; appending never copies the prefix.

use std::sync::Arc;

use tracing::trace;

use crate::value::Arguments;

/// One operation call: its name and its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Operation identifier, e.g. `container` or `exec`
    pub operation: String,

    /// Arguments in insertion order; empty when the call takes none
    pub args: Arguments,
}

impl Node {
    pub fn new(operation: impl Into<String>, args: Arguments) -> Self {
        Node {
            operation: operation.into(),
            args,
        }
    }
}

struct Link {
    node: Node,
    parent: Option<Arc<Link>>,
    depth: usize,
}

// Unlinks parents one at a time so a long chain never recurses on drop.
// Stops at the first parent another branch still holds.
impl Drop for Link {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(link) = parent {
            parent = match Arc::into_inner(link) {
                Some(mut owned) => owned.parent.take(),
                None => None,
            };
        }
    }
}

/// Path of calls from the query root to the current position.
///
/// Cloning is cheap and the tree is `Send + Sync`, so branches can be built
/// and rendered on different threads.
#[derive(Clone, Default)]
pub struct QueryTree {
    tip: Option<Arc<Link>>,
}

impl QueryTree {
    /// Creates the empty root, before any call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call without arguments.
    pub fn select(&self, operation: impl Into<String>) -> QueryTree {
        self.select_with(operation, Arguments::new())
    }

    /// Appends a call carrying `args`.
    pub fn select_with(&self, operation: impl Into<String>, args: Arguments) -> QueryTree {
        let node = Node::new(operation, args);
        let depth = self.len() + 1;
        trace!(operation = %node.operation, args = node.args.len(), depth, "appending call");

        QueryTree {
            tip: Some(Arc::new(Link {
                node,
                parent: self.tip.clone(),
                depth,
            })),
        }
    }

    /// Number of calls in the chain.
    pub fn len(&self) -> usize {
        self.tip.as_ref().map_or(0, |link| link.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.tip.is_none()
    }

    /// The most recent call, if any.
    pub fn leaf(&self) -> Option<&Node> {
        self.tip.as_deref().map(|link| &link.node)
    }

    /// Calls from the root to the leaf, in call order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes = Vec::with_capacity(self.len());
        let mut cursor = self.tip.as_deref();
        while let Some(link) = cursor {
            nodes.push(&link.node);
            cursor = link.parent.as_deref();
        }
        nodes.reverse();
        nodes
    }
}

impl std::fmt::Debug for QueryTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.nodes()).finish()
    }
}

impl PartialEq for QueryTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.nodes() == other.nodes()
    }
}
