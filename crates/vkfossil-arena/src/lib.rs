//! Arena allocation for decoded descriptors.
//!
//! Every pointer-bearing part of a descriptor (arrays, entry-point names,
//! fixed-function state blocks, shader code) is allocated here and borrowed
//! by the descriptor for the arena's lifetime.

pub mod arena;

pub use arena::Arena;
