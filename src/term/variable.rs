//! Variable representation for terms and rule patterns

use std::fmt;
use std::sync::Arc;

/// Id carried by parser-produced variables before a rule or query is renamed.
pub const SENTINEL_ID: i64 = -1;

/// A logic variable: a source-level name tagged with an instantiation id.
///
/// The name is preserved for display; the id distinguishes the variables of
/// one rule instantiation from every other instantiation of the same rule
/// during a proof. Two variables are equal only if both components match.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: Arc<str>,
    id: i64,
}

impl Variable {
    /// Create a variable with an explicit instantiation id.
    pub fn new(name: impl Into<Arc<str>>, id: i64) -> Self {
        Variable {
            name: name.into(),
            id,
        }
    }

    /// Create a parser-level variable carrying the sentinel id.
    pub fn sentinel(name: impl Into<Arc<str>>) -> Self {
        Variable::new(name, SENTINEL_ID)
    }

    /// Get the source-level name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the instantiation id
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The same source name under a different instantiation id.
    pub fn with_id(&self, id: i64) -> Self {
        Variable {
            name: self.name.clone(),
            id,
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
