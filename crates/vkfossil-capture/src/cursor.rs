//! Sequential reader over an argument list.
//!
//! An [`ArgCursor`] walks the children of one aggregate in order. Every
//! scalar accessor consumes exactly one node; array and struct accessors
//! consume the aggregate node and hand back its children without descending
//! into them, so nested structures are read with a fresh cursor.

use vkfossil_types::ExternalHandle;

use crate::error::{CursorError, CursorResult};
use crate::node::{ArgNode, NodeTag};

/// Position-tracking reader over an ordered sequence of argument nodes.
#[derive(Clone, Debug)]
pub struct ArgCursor<'n> {
    nodes: &'n [ArgNode],
    pos: usize,
}

impl<'n> ArgCursor<'n> {
    /// Cursor over an explicit node sequence.
    pub fn new(nodes: &'n [ArgNode]) -> Self {
        Self { nodes, pos: 0 }
    }

    /// Cursor over the children of an aggregate node.
    pub fn over(node: &'n ArgNode) -> CursorResult<Self> {
        match node {
            ArgNode::Aggregate(children) => Ok(Self::new(children)),
            other => Err(CursorError::ShapeMismatch {
                position: 0,
                expected: NodeTag::Aggregate,
                found: other.tag(),
            }),
        }
    }

    /// Index of the next node to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of nodes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.nodes.len() - self.pos
    }

    /// Peek at the next node without consuming it.
    pub fn peek(&self) -> Option<&'n ArgNode> {
        self.nodes.get(self.pos)
    }

    /// Check that every node was consumed.
    pub fn finish(self) -> CursorResult<()> {
        if self.pos == self.nodes.len() {
            Ok(())
        } else {
            Err(CursorError::Trailing {
                consumed: self.pos,
                remaining: self.remaining(),
            })
        }
    }

    fn next(&mut self) -> CursorResult<(usize, &'n ArgNode)> {
        let position = self.pos;
        let node = self
            .nodes
            .get(position)
            .ok_or(CursorError::Exhausted { position })?;
        self.pos += 1;
        Ok((position, node))
    }

    fn mismatch(position: usize, expected: NodeTag, found: &ArgNode) -> CursorError {
        CursorError::ShapeMismatch {
            position,
            expected,
            found: found.tag(),
        }
    }

    // -----------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------

    pub fn read_u64(&mut self) -> CursorResult<u64> {
        match self.next()? {
            (_, ArgNode::UInt(value)) => Ok(*value),
            (position, node) => Err(Self::mismatch(position, NodeTag::UInt, node)),
        }
    }

    /// Read an unsigned value that must fit in 32 bits.
    pub fn read_u32(&mut self) -> CursorResult<u32> {
        let position = self.pos;
        let value = self.read_u64()?;
        u32::try_from(value).map_err(|_| CursorError::IntegerOverflow { position, value })
    }

    /// Read a signed 32-bit value stored as its two's complement bits.
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a `VkBool32`. The raw value is kept: anything non-zero is true
    /// to the driver, but the exact value is part of the object's identity.
    pub fn read_bool32(&mut self) -> CursorResult<u32> {
        self.read_u32()
    }

    pub fn read_float(&mut self) -> CursorResult<f64> {
        match self.next()? {
            (_, ArgNode::Float(value)) => Ok(*value),
            (position, node) => Err(Self::mismatch(position, NodeTag::Float, node)),
        }
    }

    pub fn read_f32(&mut self) -> CursorResult<f32> {
        Ok(self.read_float()? as f32)
    }

    /// Read a 32-bit enum or flags value into its typed wrapper.
    pub fn read_enum<T: From<u32>>(&mut self) -> CursorResult<T> {
        Ok(T::from(self.read_u32()?))
    }

    /// Read an opaque object handle as captured.
    pub fn read_handle(&mut self) -> CursorResult<ExternalHandle> {
        Ok(ExternalHandle::new(self.read_u64()?))
    }

    pub fn read_string(&mut self) -> CursorResult<&'n str> {
        match self.next()? {
            (_, ArgNode::String(value)) => Ok(value.as_str()),
            (position, node) => Err(Self::mismatch(position, NodeTag::String, node)),
        }
    }

    /// Consume a node that must be the null sentinel.
    pub fn read_null(&mut self) -> CursorResult<()> {
        match self.next()? {
            (_, ArgNode::Null) => Ok(()),
            (position, node) => Err(Self::mismatch(position, NodeTag::Null, node)),
        }
    }

    // -----------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------

    /// Consume an aggregate node and return its children.
    pub fn read_array(&mut self) -> CursorResult<&'n [ArgNode]> {
        match self.next()? {
            (_, ArgNode::Aggregate(children)) => Ok(children),
            (position, node) => Err(Self::mismatch(position, NodeTag::Aggregate, node)),
        }
    }

    /// Like [`read_array`](Self::read_array), but a null node yields `None`.
    pub fn read_nullable_array(&mut self) -> CursorResult<Option<&'n [ArgNode]>> {
        match self.next()? {
            (_, ArgNode::Null) => Ok(None),
            (_, ArgNode::Aggregate(children)) => Ok(Some(children)),
            (position, node) => Err(Self::mismatch(position, NodeTag::Aggregate, node)),
        }
    }

    /// Consume an embedded struct and return a cursor over its fields.
    pub fn read_struct(&mut self) -> CursorResult<ArgCursor<'n>> {
        self.read_array().map(ArgCursor::new)
    }

    /// Consume a pointer-to-struct; a null pointer yields `None`.
    pub fn read_optional_struct(&mut self) -> CursorResult<Option<ArgCursor<'n>>> {
        Ok(self.read_nullable_array()?.map(ArgCursor::new))
    }
}
