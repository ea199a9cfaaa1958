//! Remote operation descriptor

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical named call to a collaborating service
///
/// Transport details (verbs, paths, serialization) are not part of the descriptor;
/// adapters resolve them from the name.
///
/// # Examples
///
/// ```
/// use domain::RemoteOperation;
///
/// let op = RemoteOperation::new("getUserById").with_arg("42");
/// assert_eq!(op.name(), "getUserById");
/// assert_eq!(op.first_arg(), Some("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOperation {
    name: String,
    #[serde(default)]
    args: Vec<String>,
}

impl RemoteOperation {
    /// Create an operation without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create an operation with an ordered argument list
    pub fn with_args<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in call order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// First argument, if any
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}
