use std::fmt;

use vkfossil_capture::CursorError;
use vkfossil_hash::HasherError;
use vkfossil_types::{ExternalHandle, ObjectKind};

use crate::vk::StructureType;

/// Errors from decoding a create-info tree into a descriptor.
///
/// Every variant means the capture cannot be exported as it stands. None of
/// them is recovered from per object.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The argument tree does not have the layout the decoder expects.
    #[error(transparent)]
    Shape(#[from] CursorError),

    /// `sType` does not name the struct being decoded.
    #[error("unexpected structure type: expected {expected:?}, found {found:?}")]
    UnexpectedStructureType {
        expected: StructureType,
        found: StructureType,
    },

    /// `pNext` is not null. Extension chains cannot be represented.
    #[error("unsupported pNext chain")]
    UnexpectedNext,

    /// A count field disagrees with the arity of the array it describes.
    #[error("{field}: count is {declared} but the array holds {actual} elements")]
    CountMismatch {
        field: &'static str,
        declared: u64,
        actual: usize,
    },

    /// A non-zero count paired with a null array pointer.
    #[error("{field}: array is null but its count is non-zero")]
    MissingArray { field: &'static str },

    /// A handle field refers to an object that was never recorded.
    #[error("{kind} handle {handle} was never created")]
    MissingDependency {
        kind: ObjectKind,
        handle: ExternalHandle,
    },

    /// A buffer index past the end of the pool.
    #[error("buffer index {index} out of range (pool holds {len} buffers)")]
    BufferOutOfRange { index: u64, len: usize },

    /// A buffer whose size disagrees with its declared size field.
    #[error("buffer {index}: declared {declared} bytes, pool holds {actual}")]
    BufferSizeMismatch {
        index: u64,
        declared: u64,
        actual: usize,
    },

    /// The descriptor could not be hashed.
    #[error(transparent)]
    Hash(#[from] HasherError),

    /// A table already holds as many entries as a dense index can address.
    #[error("{kind} table is full")]
    TableFull { kind: ObjectKind },

    /// The call record has fewer top-level arguments than its kind requires.
    #[error("missing top-level argument {index}")]
    MissingArgument { index: usize },
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ShapeMismatch,
    MissingDependency,
    BufferMismatch,
}

impl DecodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDependency { .. } => ErrorCategory::MissingDependency,
            Self::BufferOutOfRange { .. } | Self::BufferSizeMismatch { .. } => {
                ErrorCategory::BufferMismatch
            }
            _ => ErrorCategory::ShapeMismatch,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch => write!(f, "shape mismatch"),
            Self::MissingDependency => write!(f, "missing dependency"),
            Self::BufferMismatch => write!(f, "buffer mismatch"),
        }
    }
}

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
