//! Chunk hash types.

use std::fmt;
use std::hash::{Hash as StdHash, Hasher};

use crate::hash::HashAlgorithm;

/// Largest digest width across the supported algorithms (SHA-256).
const MAX_DIGEST_LEN: usize = 32;

/// A digest attached to a chunk: an algorithm tag plus the fixed-width
/// digest bytes.
///
/// The digest is stored inline; its width is 16, 20, or 32 bytes depending
/// on the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHash {
    algorithm: HashAlgorithm,
    len: u8,
    bytes: [u8; MAX_DIGEST_LEN],
}

impl ChunkHash {
    /// Wraps a freshly computed digest.
    ///
    /// `digest` must be exactly as wide as the algorithm's digest; the
    /// adapter upholds this.
    pub(crate) fn from_digest(algorithm: HashAlgorithm, digest: &[u8]) -> Self {
        debug_assert_eq!(digest.len(), algorithm.digest_len());
        let mut bytes = [0u8; MAX_DIGEST_LEN];
        bytes[..digest.len()].copy_from_slice(digest);
        Self {
            algorithm,
            len: digest.len() as u8,
            bytes,
        }
    }

    /// Creates a hash from raw digest bytes.
    ///
    /// Returns `None` if the slice width does not match the algorithm.
    pub fn from_slice(algorithm: HashAlgorithm, slice: &[u8]) -> Option<Self> {
        if slice.len() != algorithm.digest_len() {
            return None;
        }
        Some(Self::from_digest(algorithm, slice))
    }

    /// Returns the algorithm that produced this digest.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the digest as a byte slice of the algorithm's width.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Returns the digest width in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`; every supported algorithm has a non-empty digest.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl AsRef<[u8]> for ChunkHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl StdHash for ChunkHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.as_bytes());
    }
}

impl fmt::Display for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let bytes = [0xABu8; 20];
        let hash = ChunkHash::from_slice(HashAlgorithm::Sha1, &bytes).unwrap();
        assert_eq!(hash.as_bytes(), &bytes[..]);
        assert_eq!(hash.len(), 20);
        assert_eq!(hash.algorithm(), HashAlgorithm::Sha1);

        // Wrong width for the algorithm
        assert!(ChunkHash::from_slice(HashAlgorithm::Sha1, &[0u8; 32]).is_none());
        assert!(ChunkHash::from_slice(HashAlgorithm::Md5, &[0u8; 20]).is_none());
    }

    #[test]
    fn test_to_hex() {
        let hash = ChunkHash::from_slice(HashAlgorithm::Md5, &[0xABu8; 16]).unwrap();
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_display_matches_hex() {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        let hash = ChunkHash::from_slice(HashAlgorithm::Sha256, &bytes).unwrap();
        assert!(hash.to_string().starts_with("0123456789abcdef"));
        assert_eq!(hash.to_string(), hash.to_hex());
    }

    #[test]
    fn test_equality_is_width_aware() {
        // Same leading bytes, different algorithms: never equal.
        let md5 = ChunkHash::from_slice(HashAlgorithm::Md5, &[0x42u8; 16]).unwrap();
        let sha1 = ChunkHash::from_slice(HashAlgorithm::Sha1, &[0x42u8; 20]).unwrap();
        assert_ne!(md5.as_bytes(), sha1.as_bytes());
        assert_ne!(md5.algorithm(), sha1.algorithm());
    }
}
