use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffers::BufferPool;
use crate::error::{CaptureError, CaptureResult};
use crate::node::ArgNode;

/// Graphics API a capture was recorded against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureDriver {
    Vulkan,
    D3D11,
    D3D12,
    OpenGL,
    Unknown,
}

impl fmt::Display for CaptureDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vulkan => write!(f, "Vulkan"),
            Self::D3D11 => write!(f, "D3D11"),
            Self::D3D12 => write!(f, "D3D12"),
            Self::OpenGL => write!(f, "OpenGL"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One captured API call: its name and its ordered top-level arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub name: String,
    pub args: Vec<ArgNode>,
}

impl CallRecord {
    pub fn new(name: impl Into<String>, args: Vec<ArgNode>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The `index`-th top-level argument, if present.
    pub fn arg(&self, index: usize) -> Option<&ArgNode> {
        self.args.get(index)
    }
}

/// A captured call stream plus the binary buffers it references.
///
/// Records are kept in capture order. Objects are created before anything
/// refers to them in a well-formed capture, and decoding relies on that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    pub driver: CaptureDriver,
    pub records: Vec<CallRecord>,
    #[serde(default)]
    pub buffers: BufferPool,
}

impl Capture {
    /// Create an empty capture for the given driver.
    pub fn new(driver: CaptureDriver) -> Self {
        Self {
            driver,
            records: Vec::new(),
            buffers: BufferPool::new(),
        }
    }

    /// Append a record at the end of the stream.
    pub fn push(&mut self, record: CallRecord) {
        self.records.push(record);
    }

    /// Number of records in the stream.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the stream has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parse a capture from its JSON form.
    pub fn from_json(data: &[u8]) -> CaptureResult<Self> {
        serde_json::from_slice(data).map_err(|e| CaptureError::Malformed(e.to_string()))
    }

    /// Render the capture as JSON.
    pub fn to_json(&self) -> CaptureResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CaptureError::Malformed(e.to_string()))
    }

    /// Read and parse a JSON capture from disk.
    pub fn load(path: &Path) -> CaptureResult<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}
