//! Uniform adapter over the supported digest algorithms.
//!
//! The chunking driver hashes each finalized chunk body exactly once, so the
//! adapter only offers one-shot digests; incremental hashing is not needed.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::chunk::ChunkHash;
use crate::error::ChunkError;

/// A digest algorithm applied to finalized chunk bodies.
///
/// The digest width depends on the algorithm: 16 bytes for MD5, 20 bytes for
/// SHA-1, 32 bytes for SHA-256.
///
/// # Example
///
/// ```
/// use cdchunk::HashAlgorithm;
///
/// let hash = HashAlgorithm::Sha256.digest(b"hello world");
/// assert_eq!(hash.len(), 32);
/// assert_eq!(
///     hash.to_hex(),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5, 16-byte digest.
    Md5,
    /// SHA-1, 20-byte digest.
    Sha1,
    /// SHA-256, 32-byte digest.
    Sha256,
}

impl HashAlgorithm {
    /// Returns the digest width in bytes.
    pub const fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Computes the digest of `data` in one shot.
    pub fn digest(&self, data: &[u8]) -> ChunkHash {
        match self {
            HashAlgorithm::Md5 => ChunkHash::from_digest(*self, &Md5::digest(data)),
            HashAlgorithm::Sha1 => ChunkHash::from_digest(*self, &Sha1::digest(data)),
            HashAlgorithm::Sha256 => ChunkHash::from_digest(*self, &Sha256::digest(data)),
        }
    }

    /// Parses the configuration spelling of an algorithm.
    ///
    /// Recognized values are `md5`, `sha1`, and `sha256`.
    pub(crate) fn parse(value: &str) -> Result<Self, ChunkError> {
        match value {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            _ => Err(ChunkError::InvalidValue {
                key: crate::config::HASHING_ALGO,
                value: value.to_string(),
            }),
        }
    }
}
