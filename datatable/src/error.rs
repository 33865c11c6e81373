//! Error types

/// Error raised while building or validating column definitions.
///
/// These are configuration mistakes. They surface from the builder or from
/// `validate_columns`; a table that receives a bad set skips the cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnDefError {
    /// Neither an accessor key nor an accessor function was given.
    #[error("Column {id:?} has no accessor: set either an accessor key or an accessor function")]
    MissingAccessor { id: Option<String> },

    /// Both an accessor key and an accessor function were given.
    #[error("Column {id:?} has both an accessor key and an accessor function")]
    ConflictingAccessor { id: Option<String> },

    /// The accessor key is an empty string.
    #[error("Column {id:?} has an empty accessor key")]
    EmptyAccessorKey { id: Option<String> },

    /// Two columns resolve to the same id.
    #[error("Duplicate column id '{id}' at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

/// Error returned by a column-definition source.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SourceError {
    /// Error message
    pub message: String,
}

impl SourceError {
    /// Create a new source error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
