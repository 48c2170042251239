//! Decoded Vulkan object state.
//!
//! This crate turns captured create-info argument trees into strongly typed
//! descriptors and collects them in a [`Recorder`]: one deduplicated table
//! per object kind, plus the map from captured handles to table positions.
//!
//! # Pieces
//!
//! - [`descriptor`] -- fixed-layout descriptor structs, borrowing from an
//!   [`Arena`](vkfossil_arena::Arena)
//! - [`vk`] -- Vulkan enum and flag newtypes
//! - [`Decoder`] / [`decode_call`] -- create-info decoding, one routine per
//!   object kind
//! - [`Recorder`] -- content-hash deduplication and handle resolution
//!
//! # Rules
//!
//! 1. Records are decoded in capture order; a handle must be recorded before
//!    anything refers to it.
//! 2. Handle fields are stored as dense indices, so equal objects hash
//!    equally whatever their captured handle values.
//! 3. Entries are never removed or reordered once registered.

pub mod call;
pub mod decode;
pub mod descriptor;
pub mod error;
pub mod recorder;
pub mod vk;

pub use call::CallKind;
pub use decode::{decode_call, DecodeOptions, Decoder, RecordedObject};
pub use error::{DecodeError, DecodeResult, ErrorCategory};
pub use recorder::{HandlePolicy, ObjectTable, Recorder, RegistryEntry, StateDescriptor};
