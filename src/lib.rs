//! # cdchunk
//!
//! Streaming Content-Defined Chunking (CDC) for data deduplication.
//!
//! `cdchunk` transforms a byte stream into variable-length chunks whose
//! boundaries are decided by the content itself, so identical substrings
//! produce identical chunks regardless of where they sit in a file. Each
//! chunk carries a cryptographic digest, which is all a downstream store,
//! index, or comparator needs to spot duplicate regions across unrelated
//! inputs.
//!
//! ## Design Philosophy
//!
//! This crate intentionally maintains a narrow scope and focuses on doing
//! one thing well: **transform byte streams into hashed chunks**. It
//! deliberately does not:
//!
//! - Deduplicate, index, or persist chunks (user decides the storage layer)
//! - Manage concurrency (independent streams can be chunked on independent
//!   chunker instances)
//! - Reassemble streams from chunks (chunks are only emitted)
//!
//! ## Algorithms
//!
//! - **Rabin fingerprint chunking** - a rolling polynomial hash over a
//!   sliding window, with minimum/average/maximum block sizes
//! - **AE (Asymmetric Extremum) chunking** - a comparison-only local
//!   extremum detector parameterized by a single average block size
//! - **Fixed-size chunking** - the non-content-defined baseline
//!
//! All three are deterministic: the same input and parameters produce
//! byte-identical chunk boundaries and digests, no matter how the source
//! delivers its bytes.
//!
//! ## Digests
//!
//! Chunk bodies are hashed with MD5, SHA-1, or SHA-256. Each emitted chunk
//! renders as the record line `<digest_hex>,<length>` via `Display`.
//!
//! # Examples
//!
//! ## Configuration-driven entry
//!
//! ```
//! use std::io::Cursor;
//! use cdchunk::{chunk, ConfigFile};
//!
//! fn main() -> Result<(), cdchunk::ChunkError> {
//!     let config = ConfigFile::parse(
//!         "chunking_algo=rabins\n\
//!          hashing_algo=sha256\n\
//!          rabinc_window_size=48\n\
//!          rabinc_min_block_size=512\n\
//!          rabinc_avg_block_size=1024\n\
//!          rabinc_max_block_size=4096\n",
//!     )?;
//!
//!     let data: Vec<u8> = (0..100_000u32).map(|i| (i * 31 + 7) as u8).collect();
//!     let chunks = chunk(&config, Cursor::new(data))?;
//!
//!     assert!(!chunks.is_empty());
//!     let total: usize = chunks.iter().map(|c| c.len()).sum();
//!     assert_eq!(total, 100_000, "all bytes are chunked");
//!     Ok(())
//! }
//! ```
//!
//! ## Driving an algorithm directly
//!
//! ```
//! use std::io::Cursor;
//! use cdchunk::{AeChunker, AeParams, AeMode, Chunker, HashAlgorithm};
//!
//! let params = AeParams::new(8192, AeMode::Max)?;
//! let mut chunker = Chunker::new(AeChunker::new(params), Some(HashAlgorithm::Sha1));
//!
//! let mut chunks = Vec::new();
//! chunker.chunk_stream(&mut chunks, Cursor::new(vec![42u8; 65536]))?;
//! for c in &chunks {
//!     println!("{}", c); // <digest_hex>,<length>
//! }
//! # Ok::<(), cdchunk::ChunkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Public modules
mod cdc;
mod chunk;
mod chunker;
mod config;
mod error;
mod hash;

// Internal modules (implementation details)
mod buffer; // Thread-local scratch buffer reuse

//
// Public API surface
//
// The public API is intentionally minimal. Only essential types are exported
// to keep the surface area small and the API stable.
//

/// Chunk types and related utilities.
pub use chunk::{Chunk, ChunkHash};

/// Boundary detection algorithms and their shared capability.
pub use cdc::{AeChunker, AeMode, BoundaryFinder, FixedChunker, RabinChunker};

/// Streaming driver and one-call entry point.
pub use chunker::{chunk, Chunker, SCRATCH_BUFFER_SIZE};

/// Configuration file parsing and validated parameter sets.
pub use config::{
    AeParams, ChunkingAlgo, ConfigFile, FixedParams, RabinParams, DEFAULT_AE_AVG_BLOCK_SIZE,
    DEFAULT_FC_SIZE, DEFAULT_RABIN_AVG_BLOCK_SIZE, DEFAULT_RABIN_MAX_BLOCK_SIZE,
    DEFAULT_RABIN_MIN_BLOCK_SIZE, DEFAULT_RABIN_WINDOW_SIZE,
};

/// Error types for configuration and chunking operations.
pub use error::ChunkError;

/// Digest algorithm selection.
pub use hash::HashAlgorithm;
