//! Element errors

/// Errors raised by element operations and native hosts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Attribute name rejected by the host's naming rules
    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    /// Selector or path expression could not be evaluated.
    ///
    /// Search operations absorb this into an empty node set.
    #[error("Query evaluation failed for {query:?}: {message}")]
    QueryEvaluation { query: String, message: String },

    /// Inline style write rejected by the host
    #[error("Invalid style assignment: {0}")]
    InvalidStyleAssignment(String),

    /// Element factory rejected the tag name
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),
}

impl DomError {
    /// Build a query evaluation error
    pub fn query(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryEvaluation {
            query: query.into(),
            message: message.into(),
        }
    }
}

/// Result alias for element operations
pub type Result<T> = std::result::Result<T, DomError>;
