use std::fmt;

/// A single validation finding: where it happened and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Path from the root value to the offending field. Empty for issues on
    /// the root value itself.
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    /// Issue on the value currently being validated.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Issue on a named field of the current value.
    pub fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.into()],
            message: message.into(),
        }
    }

    /// Prefixes the path with an enclosing field name.
    pub fn nested(mut self, field: &str) -> Self {
        self.path.insert(0, field.to_string());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}
