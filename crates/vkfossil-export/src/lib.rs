//! Batch export of captured Vulkan state.
//!
//! Decodes every create call of a [`Capture`](vkfossil_capture::Capture)
//! into a [`Recorder`](vkfossil_state::Recorder) and writes the deduplicated
//! tables as one JSON blob.
//!
//! # Architecture
//!
//! - **BatchDriver**: walks the record stream, skipping calls it has no
//!   decoder for and stopping at the first one that fails
//! - **StateBlob**: the serialized document, one array per object kind
//! - **Exporter**: driver, then serialization, then an atomic write
//! - **ExportStatus**: the three-way outcome hosts report

pub mod blob;
pub mod config;
pub mod driver;
pub mod error;
pub mod exporter;
pub mod registration;
pub mod status;

#[cfg(test)]
pub(crate) mod fixtures;

pub use blob::{BlobEntry, StateBlob, BLOB_VERSION};
pub use config::ExportConfig;
pub use driver::{BatchDriver, BatchReport};
pub use error::{ExportError, ExportResult};
pub use exporter::{export_capture, write_atomic, ExportSummary, Exporter};
pub use registration::{ConverterInfo, FOSSILIZE_CONVERTER};
pub use status::ExportStatus;
