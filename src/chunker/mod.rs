//! Streaming driver shared by all chunking algorithms.
//!
//! - [`Chunker`] - Pulls bounded buffers from a source, asks the algorithm
//!   for cut points, and emits hashed chunks
//! - [`chunk`] - One-call entry dispatching on a parsed configuration

mod engine;

pub use engine::{chunk, Chunker, SCRATCH_BUFFER_SIZE};
