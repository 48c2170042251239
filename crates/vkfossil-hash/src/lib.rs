//! Content hashing for vkfossil.
//!
//! Provides domain-separated BLAKE3 hashing of resolved descriptors. The
//! hash is the registry's deduplication key, so its encoding is part of the
//! export format: changing field order or encoding requires a new domain
//! version tag.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
