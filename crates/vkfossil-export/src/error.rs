use thiserror::Error;
use vkfossil_capture::CaptureDriver;
use vkfossil_state::{CallKind, DecodeError};

use crate::status::ExportStatus;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export a {0} capture: only Vulkan captures carry exportable state")]
    UnsupportedDriver(CaptureDriver),

    #[error("record {record} ({call}): {source}")]
    Decode {
        record: usize,
        call: CallKind,
        source: DecodeError,
    },

    /// The recorded state could not be written out as JSON. This happens
    /// after decoding succeeded, so it is reported with write failures.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// The status reported to the caller for this failure.
    pub fn status(&self) -> ExportStatus {
        match self {
            Self::UnsupportedDriver(_) | Self::Decode { .. } => ExportStatus::IncompatibleInput,
            Self::Serialization(_) | Self::Io(_) => ExportStatus::IoFailure,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
