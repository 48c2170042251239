//! Captured call streams and the cursor used to decode them.
//!
//! A [`Capture`] is an ordered list of [`CallRecord`]s, each carrying a call
//! name and a schema-less [`ArgNode`] tree, plus a [`BufferPool`] holding the
//! binary payloads those trees refer to by index. Decoders walk argument
//! trees with an [`ArgCursor`].

pub mod buffers;
pub mod cursor;
pub mod error;
pub mod node;
pub mod record;

pub use buffers::BufferPool;
pub use cursor::ArgCursor;
pub use error::{CaptureError, CaptureResult, CursorError, CursorResult};
pub use node::{ArgNode, NodeTag};
pub use record::{CallRecord, Capture, CaptureDriver};
