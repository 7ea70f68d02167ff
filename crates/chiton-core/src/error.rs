use thiserror::Error;

use crate::geom::Cell;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building risk maps or searching them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input rows are ragged, empty, or contain something other than 1–9.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A caller-supplied argument is out of its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The frontier ran dry before the target was reached.
    #[error("target {to} is unreachable from {from}")]
    UnreachableTarget { from: Cell, to: Cell },
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
