//! Chunk boundary detection algorithms.
//!
//! This module contains the algorithms that decide where one chunk ends and
//! the next begins:
//!
//! - [`RabinChunker`] - Rolling polynomial fingerprint with min/avg/max bounds
//! - [`AeChunker`] - Asymmetric Extremum detector with a single avg parameter
//! - [`FixedChunker`] - Cuts at a fixed interval
//!
//! All algorithms implement [`BoundaryFinder`], the capability the streaming
//! driver is generic over.

mod ae;
mod fixed;
mod rabin;

pub use ae::{AeChunker, AeMode};
pub use fixed::FixedChunker;
pub use rabin::RabinChunker;

/// Boundary detection capability shared by all chunking algorithms.
///
/// The streaming driver feeds an implementation successive buffer slices and
/// turns the reported cut points into chunks. Implementations keep all
/// rolling state internally, so a chunk may span any number of buffers.
pub trait BoundaryFinder {
    /// Clears all rolling state ahead of a new stream.
    fn reset(&mut self);

    /// Scans `data` for the next cut point.
    ///
    /// Returns the number of bytes consumed from `data` by the chunk that
    /// just closed (so the caller can advance past them and re-enter with
    /// the remainder), or `None` if the buffer was exhausted without a cut.
    /// On `None` every byte of `data` has been absorbed into the rolling
    /// state and belongs to the open chunk.
    fn next_boundary(&mut self, data: &[u8]) -> Option<usize>;

    /// Reports the open tail at end of stream.
    ///
    /// Returns the length of the unfinished chunk, or `None` when the last
    /// buffer ended exactly on a cut. The tail has no minimum-length
    /// guarantee.
    fn finish(&mut self) -> Option<u64>;
}
