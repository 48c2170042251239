use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Opaque object handle as it appeared at capture time.
///
/// Non-dispatchable Vulkan handles are 64-bit values; `0` is
/// `VK_NULL_HANDLE`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalHandle(u64);

impl ExternalHandle {
    /// `VK_NULL_HANDLE`.
    pub const NULL: Self = Self(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ExternalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternalHandle({:#x})", self.0)
    }
}

impl fmt::Display for ExternalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for ExternalHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Position of a deduplicated entry within its kind's registry table.
///
/// Dense indices are assigned monotonically from zero in registration order
/// and never change once assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DenseIndex(u32);

impl DenseIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DenseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A descriptor field that refers to another registered object.
///
/// References are stored by dense index, never by captured handle value, so
/// that two captures creating the same objects under different handles hash
/// identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    /// The captured handle was `VK_NULL_HANDLE`.
    #[default]
    Null,
    /// Resolved to an entry of the referenced kind.
    Index(DenseIndex),
    /// Never bound when the reference was decoded; carries the raw captured
    /// value. Only produced when unresolved handles are passed through.
    Unresolved(u64),
}

impl ObjectRef {
    pub fn index(&self) -> Option<DenseIndex> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<DenseIndex> for ObjectRef {
    fn from(index: DenseIndex) -> Self {
        Self::Index(index)
    }
}

// Human-readable formats get `null`, a bare index, or `{"unresolved": raw}`.
// Binary formats (the hash input) keep an explicit variant tag so that a null
// reference can never collide with index 0.
impl Serialize for ObjectRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            match self {
                Self::Null => serializer.serialize_none(),
                Self::Index(index) => serializer.serialize_u32(index.get()),
                Self::Unresolved(raw) => {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("unresolved", raw)?;
                    map.end()
                }
            }
        } else {
            match self {
                Self::Null => serializer.serialize_unit_variant("ObjectRef", 0, "Null"),
                Self::Index(index) => {
                    serializer.serialize_newtype_variant("ObjectRef", 1, "Index", &index.get())
                }
                Self::Unresolved(raw) => {
                    serializer.serialize_newtype_variant("ObjectRef", 2, "Unresolved", raw)
                }
            }
        }
    }
}
