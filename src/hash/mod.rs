//! Chunk hashing over the supported digest algorithms.
//!
//! - [`HashAlgorithm`] - Selects MD5, SHA-1, or SHA-256 and computes digests

mod adapter;

pub use adapter::HashAlgorithm;
