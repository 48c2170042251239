use crate::node::NodeTag;

/// Errors raised while walking an argument tree.
///
/// A cursor error means the decoder and the capture disagree about the
/// layout of a call. It is never recovered from per object: the batch that
/// hit it is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The node at `position` has a different tag than the field expects.
    #[error("shape mismatch at argument {position}: expected {expected}, found {found}")]
    ShapeMismatch {
        position: usize,
        expected: NodeTag,
        found: NodeTag,
    },

    /// The decoder asked for more fields than the aggregate holds.
    #[error("argument list exhausted at position {position}")]
    Exhausted { position: usize },

    /// An unsigned value does not fit the field's width.
    #[error("value {value} at argument {position} does not fit in 32 bits")]
    IntegerOverflow { position: usize, value: u64 },

    /// The decoder finished before consuming every field.
    #[error("{remaining} trailing arguments after position {consumed}")]
    Trailing { consumed: usize, remaining: usize },
}

/// Result alias for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors from loading a capture document.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The document is not a valid capture.
    #[error("malformed capture: {0}")]
    Malformed(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for capture loading.
pub type CaptureResult<T> = Result<T, CaptureError>;
