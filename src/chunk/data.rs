//! Chunk data representation.

use bytes::Bytes;
use std::fmt;

use super::ChunkHash;

/// One emitted chunk: an owned byte body with its stream offset and an
/// optional digest.
///
/// Chunk bodies are copied out of the scanning buffer at emission, so a
/// `Chunk` never aliases driver memory and stays valid after the buffer is
/// refilled.
///
/// `Display` renders the external record shape `<digest_hex>,<length>`, or
/// the sentinel `INVALID HASH` when no digest is attached:
///
/// ```
/// use cdchunk::{Chunk, HashAlgorithm};
///
/// let body = &b"hello world"[..];
/// let chunk = Chunk::new(body).set_hash(HashAlgorithm::Md5.digest(body));
/// assert_eq!(
///     chunk.to_string(),
///     "5eb63bbbe01eeed093cb22bb8f5acdc3,11"
/// );
/// assert_eq!(Chunk::new(body).to_string(), "INVALID HASH");
/// ```
#[derive(Clone)]
pub struct Chunk {
    /// The chunk body.
    pub data: Bytes,

    /// The offset of the first body byte in the original stream.
    pub offset: Option<u64>,

    /// The digest of the body, when hashing is enabled.
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Creates a new chunk with the given body.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            offset: None,
            hash: None,
        }
    }

    /// Creates a new chunk with an offset.
    pub fn with_offset(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset: Some(offset),
            hash: None,
        }
    }

    /// Sets the offset for this chunk.
    pub fn set_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the digest for this chunk.
    pub fn set_hash(mut self, hash: ChunkHash) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Returns the length of the chunk body.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the chunk contains no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk body.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the offset in the original stream, if set.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns the digest of the chunk body, if computed.
    pub fn hash(&self) -> Option<ChunkHash> {
        self.hash
    }

    /// Consumes the chunk and returns the underlying body.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Splits the chunk into its body and digest.
    pub fn into_parts(self) -> (Bytes, Option<ChunkHash>) {
        (self.data, self.hash)
    }
}

impl From<Bytes> for Chunk {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hash {
            Some(hash) => write!(f, "{},{}", hash, self.len()),
            None => write!(f, "INVALID HASH"),
        }
    }
}

// Diagnostic dump: length, hex digest, raw body. Not used on the fast path.
impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chunk Size: {}", self.len())?;
        if let Some(hash) = self.hash {
            writeln!(f, "Chunk Hash: {}", hash)?;
        }
        write!(f, "Chunk Data: {:?}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;

    #[test]
    fn test_chunk_creation() {
        let chunk = Chunk::new(&b"hello"[..]);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.offset(), None);
        assert!(chunk.hash().is_none());
    }

    #[test]
    fn test_chunk_with_offset() {
        let chunk = Chunk::with_offset(&b"data"[..], 100);
        assert_eq!(chunk.offset(), Some(100));
        assert_eq!(chunk.len(), 4);
    }

    #[test]
    fn test_chunk_builder_pattern() {
        let hash = HashAlgorithm::Sha1.digest(b"test");
        let chunk = Chunk::new(&b"test"[..]).set_offset(50).set_hash(hash);
        assert_eq!(chunk.len(), 4);
        assert_eq!(chunk.offset(), Some(50));
        assert_eq!(chunk.hash(), Some(hash));
    }

    #[test]
    fn test_record_format() {
        let body = &b"data"[..];
        let chunk = Chunk::new(body).set_hash(HashAlgorithm::Sha256.digest(body));
        let record = chunk.to_string();
        let (hex_part, len_part) = record.split_once(',').unwrap();
        assert_eq!(hex_part.len(), 64);
        assert_eq!(len_part, "4");
    }

    #[test]
    fn test_record_sentinel_without_hash() {
        let chunk = Chunk::new(&b"data"[..]);
        assert_eq!(chunk.to_string(), "INVALID HASH");
    }

    #[test]
    fn test_debug_dump() {
        let body = &b"abc"[..];
        let chunk = Chunk::new(body).set_hash(HashAlgorithm::Md5.digest(body));
        let dump = format!("{:?}", chunk);
        assert!(dump.contains("Chunk Size: 3"));
        assert!(dump.contains("Chunk Hash: "));
        assert!(dump.contains("Chunk Data: "));
    }

    #[test]
    fn test_chunk_into_parts() {
        let hash = HashAlgorithm::Md5.digest(b"data");
        let chunk = Chunk::new(&b"data"[..]).set_hash(hash);
        let (data, extracted) = chunk.into_parts();
        assert_eq!(data.as_ref(), b"data");
        assert_eq!(extracted, Some(hash));
    }
}
