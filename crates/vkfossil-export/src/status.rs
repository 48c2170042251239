use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Outcome of an export, as reported to whoever asked for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportStatus {
    Succeeded,
    /// The capture is not something this exporter can represent: wrong
    /// driver, malformed argument tree, missing dependency or buffer.
    IncompatibleInput,
    /// The blob could not be written.
    IoFailure,
}

impl ExportStatus {
    pub fn from_result<T>(result: &Result<T, ExportError>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(err) => err.status(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Process exit code for command-line use.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::IncompatibleInput => 2,
            Self::IoFailure => 3,
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::IncompatibleInput => write!(f, "incompatible input"),
            Self::IoFailure => write!(f, "I/O failure"),
        }
    }
}
