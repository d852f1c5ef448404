use thiserror::Error;

/// Reasons the read-only check rejects a piece of query text.
///
/// Returned as a value from `guard::validate`; callers can show the message
/// and let the user edit and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing left after stripping leading comments and whitespace.
    #[error("the query is empty")]
    Empty,
    /// A `;` separates more than one statement.
    #[error("multiple statements are not allowed")]
    MultipleStatements,
    /// The leading keyword is not a read statement.
    #[error("only read statements are permitted: SELECT, SHOW, DESCRIBE/DESC, EXPLAIN or WITH")]
    NotReadOnly,
}

/// A failure reported by the database driver. Carries the driver's message
/// text only; the driver seam has no richer error structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DriverError(pub String);

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        DriverError(message.into())
    }
}

/// Errors surfaced by [`Controller`](crate::Controller) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text failed the read-only check and was never sent to the
    /// database.
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    /// The driver cannot represent a TIME value past 24 hours.
    #[error("the driver failed on a TIME column above 24 hours; select it as TIME_FORMAT(col, '%H:%i:%s') or CAST(col AS CHAR(10)) instead")]
    TimeOverflow,
    /// The database reported a failure while running the statement.
    #[error("query execution failed: {0}")]
    Execution(String),
    /// A failure outside statement execution itself, such as a schema
    /// lookup going wrong while rewriting.
    #[error("unexpected error while executing the query: {0}")]
    Unexpected(String),
    /// No saved query carries the requested id.
    #[error("no saved query with id {0}")]
    UnknownQuery(String),
}

impl Error {
    /// Classifies a driver failure raised while executing a statement.
    ///
    /// The one driver message recovered specifically is the time-of-day
    /// overflow signature; everything else becomes a generic execution
    /// failure.
    pub(crate) fn from_execution(err: DriverError) -> Self {
        if err.0.to_lowercase().contains("invalid time(hours)") {
            Error::TimeOverflow
        } else {
            Error::Execution(err.0)
        }
    }
}
