//! Typed entry points over [`QueryTree`].
//!
//! Each wrapper holds the tree built so far and each method appends the
//! matching engine operation. Methods take `&self` and return a new wrapper,
//! so any intermediate value can be reused as a branch point:
//!
//! ```
//! use calltree::api::{Client, ExecOpts};
//! use calltree::serialize;
//!
//! let image = Client::new().container().from("alpine");
//! let pkg = image.exec(ExecOpts::with_args(["apk", "add", "curl"])).unwrap();
//! let result = pkg.stdout();
//!
//! assert_eq!(
//!     serialize(result.query_tree()).unwrap(),
//!     r#"{container{from(address:"alpine"){exec(args:["apk","add","curl"]){stdout}}}}"#
//! );
//! ```
//!
//! Argument records such as [`ExecOpts`] are checked when the call is
//! appended. Only shape is checked here; whether an image exists or a command
//! runs is up to the engine.

use crate::{
    error::QueryError,
    tree::QueryTree,
    value::{Arguments, Value},
};

fn single(name: &str, value: Value) -> Arguments {
    Arguments::from([(name.to_string(), value)])
}

/// Root of every query.
#[derive(Debug, Clone, Default)]
pub struct Client {
    tree: QueryTree,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> Container {
        Container {
            tree: self.tree.select("container"),
        }
    }

    /// `container` with options, e.g. resuming from a container id.
    pub fn container_with(&self, opts: ContainerOpts) -> Container {
        Container {
            tree: self.tree.select_with("container", opts.into_arguments()),
        }
    }

    pub fn directory(&self) -> Directory {
        Directory {
            tree: self.tree.select("directory"),
        }
    }

    pub fn git(&self, url: impl Into<String>) -> GitRepository {
        GitRepository {
            tree: self.tree.select_with("git", single("url", Value::String(url.into()))),
        }
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}

/// Options for [`Client::container_with`].
#[derive(Debug, Clone, Default)]
pub struct ContainerOpts {
    pub id: Option<String>,
}

impl ContainerOpts {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn into_arguments(self) -> Arguments {
        let mut args = Arguments::new();
        if let Some(id) = self.id {
            args.insert("id".into(), id.into());
        }
        args
    }
}

/// Arguments of `exec`. `args` is required.
#[derive(Debug, Clone, Default)]
pub struct ExecOpts {
    pub args: Option<Vec<String>>,
    pub stdin: Option<String>,
    pub redirect_stdout: Option<String>,
    pub redirect_stderr: Option<String>,
}

impl ExecOpts {
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExecOpts {
            args: Some(args.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn redirect_stdout(mut self, path: impl Into<String>) -> Self {
        self.redirect_stdout = Some(path.into());
        self
    }

    pub fn redirect_stderr(mut self, path: impl Into<String>) -> Self {
        self.redirect_stderr = Some(path.into());
        self
    }

    fn into_arguments(self) -> Result<Arguments, QueryError> {
        let args = match self.args {
            Some(args) if !args.is_empty() => args,
            Some(_) => {
                return Err(QueryError::InvalidArgument(
                    "exec: `args` must name a command".into(),
                ));
            }
            None => {
                return Err(QueryError::InvalidArgument(
                    "exec: missing required argument `args`".into(),
                ));
            }
        };

        let mut out = single("args", Value::from(args));
        if let Some(stdin) = self.stdin {
            out.insert("stdin".into(), stdin.into());
        }
        if let Some(path) = self.redirect_stdout {
            out.insert("redirectStdout".into(), path.into());
        }
        if let Some(path) = self.redirect_stderr {
            out.insert("redirectStderr".into(), path.into());
        }
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    tree: QueryTree,
}

impl Container {
    /// Initializes the container from an image address.
    pub fn from(&self, address: impl Into<String>) -> Container {
        Container {
            tree: self.tree.select_with("from", single("address", Value::String(address.into()))),
        }
    }

    /// Runs a command in the container.
    ///
    /// Fails with [`QueryError::InvalidArgument`] if `opts.args` is missing
    /// or empty.
    pub fn exec(&self, opts: ExecOpts) -> Result<Container, QueryError> {
        Ok(Container {
            tree: self.tree.select_with("exec", opts.into_arguments()?),
        })
    }

    pub fn with_env_variable(&self, name: impl Into<String>, value: impl Into<String>) -> Container {
        let mut args = single("name", Value::String(name.into()));
        args.insert("value".into(), Value::String(value.into()));
        Container {
            tree: self.tree.select_with("withEnvVariable", args),
        }
    }

    pub fn with_workdir(&self, path: impl Into<String>) -> Container {
        Container {
            tree: self.tree.select_with("withWorkdir", single("path", Value::String(path.into()))),
        }
    }

    pub fn stdout(&self) -> File {
        File {
            tree: self.tree.select("stdout"),
        }
    }

    pub fn stderr(&self) -> File {
        File {
            tree: self.tree.select("stderr"),
        }
    }

    pub fn exit_code(&self) -> QueryTree {
        self.tree.select("exitCode")
    }

    pub fn id(&self) -> QueryTree {
        self.tree.select("id")
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}

#[derive(Debug, Clone)]
pub struct Directory {
    tree: QueryTree,
}

impl Directory {
    pub fn file(&self, path: impl Into<String>) -> File {
        File {
            tree: self.tree.select_with("file", single("path", Value::String(path.into()))),
        }
    }

    pub fn with_new_file(&self, path: impl Into<String>, contents: impl Into<String>) -> Directory {
        let mut args = single("path", Value::String(path.into()));
        args.insert("contents".into(), Value::String(contents.into()));
        Directory {
            tree: self.tree.select_with("withNewFile", args),
        }
    }

    pub fn entries(&self) -> QueryTree {
        self.tree.select("entries")
    }

    pub fn id(&self) -> QueryTree {
        self.tree.select("id")
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}

#[derive(Debug, Clone)]
pub struct File {
    tree: QueryTree,
}

impl File {
    pub fn contents(&self) -> QueryTree {
        self.tree.select("contents")
    }

    pub fn size(&self) -> QueryTree {
        self.tree.select("size")
    }

    pub fn id(&self) -> QueryTree {
        self.tree.select("id")
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}

/// A remote git repository.
#[derive(Debug, Clone)]
pub struct GitRepository {
    tree: QueryTree,
}

impl GitRepository {
    pub fn branch(&self, name: impl Into<String>) -> GitRef {
        GitRef {
            tree: self.tree.select_with("branch", single("name", Value::String(name.into()))),
        }
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}

/// A branch of a [`GitRepository`].
#[derive(Debug, Clone)]
pub struct GitRef {
    tree: QueryTree,
}

impl GitRef {
    pub fn tree(&self) -> Directory {
        Directory {
            tree: self.tree.select("tree"),
        }
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.tree
    }
}
