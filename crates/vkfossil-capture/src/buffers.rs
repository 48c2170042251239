use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Index-addressed pool of raw byte buffers referenced from argument trees.
///
/// Shader bytecode and specialization data are not stored inline in the
/// tree; the tree carries an index into this pool instead. The pool belongs
/// to the capture and is only ever read by decoders.
///
/// In JSON form each buffer is a base64 string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferPool {
    buffers: Vec<Vec<u8>>,
}

impl BufferPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a buffer and return the index the tree should reference.
    pub fn push(&mut self, data: Vec<u8>) -> u64 {
        self.buffers.push(data);
        (self.buffers.len() - 1) as u64
    }

    /// Look up a buffer by the index stored in the argument tree.
    pub fn get(&self, index: u64) -> Option<&[u8]> {
        let index = usize::try_from(index).ok()?;
        self.buffers.get(index).map(Vec::as_slice)
    }

    /// Number of buffers in the pool.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if the pool holds no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Total payload bytes across all buffers.
    pub fn total_bytes(&self) -> u64 {
        self.buffers.iter().map(|b| b.len() as u64).sum()
    }
}

impl From<Vec<Vec<u8>>> for BufferPool {
    fn from(buffers: Vec<Vec<u8>>) -> Self {
        Self { buffers }
    }
}

impl Serialize for BufferPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.buffers.len()))?;
        for buffer in &self.buffers {
            seq.serialize_element(&STANDARD.encode(buffer))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for BufferPool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        let buffers = encoded
            .iter()
            .enumerate()
            .map(|(i, text)| {
                STANDARD
                    .decode(text)
                    .map_err(|e| D::Error::custom(format!("buffer {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { buffers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut pool = BufferPool::new();
        assert_eq!(pool.push(vec![1, 2, 3]), 0);
        assert_eq!(pool.push(vec![4]), 1);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.total_bytes(), 4);
    }

    #[test]
    fn get_out_of_range() {
        let pool = BufferPool::from(vec![vec![0xaa]]);
        assert_eq!(pool.get(0), Some(&[0xaa][..]));
        assert_eq!(pool.get(1), None);
        assert_eq!(pool.get(u64::MAX), None);
    }

    #[test]
    fn json_uses_base64() {
        let pool = BufferPool::from(vec![b"\x03\x02\x23\x07".to_vec(), Vec::new()]);
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json, serde_json::json!(["AwIjBw==", ""]));
        let parsed: BufferPool = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, pool);
    }

    #[test]
    fn json_rejects_bad_base64() {
        let err = serde_json::from_value::<BufferPool>(serde_json::json!(["@@@"])).unwrap_err();
        assert!(err.to_string().contains("buffer 0"));
    }
}
