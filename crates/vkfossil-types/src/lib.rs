//! Foundation types for vkfossil.
//!
//! This crate provides the identifiers shared by every other vkfossil crate:
//! how captured objects are named on the way in, and how deduplicated
//! objects are addressed on the way out.
//!
//! # Key Types
//!
//! - [`ObjectHash`] -- Content hash of a resolved descriptor (BLAKE3)
//! - [`ObjectKind`] -- Which persistent Vulkan object a descriptor describes
//! - [`ExternalHandle`] -- Opaque handle value as captured
//! - [`DenseIndex`] -- Stable position of a deduplicated registry entry
//! - [`ObjectRef`] -- A descriptor field pointing at another registered object

pub mod error;
pub mod handle;
pub mod kind;
pub mod object;

pub use error::TypeError;
pub use handle::{DenseIndex, ExternalHandle, ObjectRef};
pub use kind::ObjectKind;
pub use object::ObjectHash;
