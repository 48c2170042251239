use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of a captured call's argument tree.
///
/// The tree carries no schema beyond the tag and the arity of aggregates:
/// which field a node represents is known only from its position, and the
/// decoder for each call kind is the sole authority on that layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgNode {
    /// An absent value: a null pointer, or an empty `pNext` chain.
    Null,
    /// Unsigned scalar: integers, enums, flags, `VkBool32`, handles and
    /// buffer indices all travel as raw unsigned values.
    #[serde(rename = "uint")]
    UInt(u64),
    Float(f64),
    String(String),
    /// Structs and arrays alike: an ordered list of child nodes.
    Aggregate(Vec<ArgNode>),
}

/// The tag of an [`ArgNode`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Null,
    UInt,
    Float,
    String,
    Aggregate,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::UInt => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Aggregate => write!(f, "aggregate"),
        }
    }
}

impl ArgNode {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn uint(value: u64) -> Self {
        Self::UInt(value)
    }

    pub fn float(value: f64) -> Self {
        Self::Float(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn aggregate(children: Vec<ArgNode>) -> Self {
        Self::Aggregate(children)
    }

    /// A signed 32-bit value as captured: its two's complement bit pattern.
    pub fn int(value: i32) -> Self {
        Self::UInt(u64::from(value as u32))
    }

    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Null => NodeTag::Null,
            Self::UInt(_) => NodeTag::UInt,
            Self::Float(_) => NodeTag::Float,
            Self::String(_) => NodeTag::String,
            Self::Aggregate(_) => NodeTag::Aggregate,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Children of an aggregate; `None` for leaves.
    pub fn children(&self) -> Option<&[ArgNode]> {
        match self {
            Self::Aggregate(children) => Some(children),
            _ => None,
        }
    }

    /// Number of nodes in the subtree rooted here, including this one.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Aggregate(children) => 1 + children.iter().map(Self::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}
