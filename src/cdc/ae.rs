//! Asymmetric Extremum (AE) chunking.
//!
//! AE places a cut a fixed distance after a local extremum, using only byte
//! comparisons; chunk sizes come out approximately exponentially distributed
//! around the configured average.
//!
//! Source: Y. Zhang et al., "AE: An Asymmetric Extremum Content Defined
//! Chunking Algorithm for Fast and Bandwidth-Efficient Data Deduplication",
//! IEEE INFOCOM 2015.

use super::BoundaryFinder;
use crate::config::AeParams;

/// Ratio between the average chunk size and the lookahead window: `e - 1`,
/// from the expected-size analysis in the AE paper.
const WINDOW_RATIO: f64 = 1.7183;

/// Which extremum ends the search for a cut point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeMode {
    /// Cut around a byte strictly smaller than its neighborhood.
    Min,
    /// Cut around a byte strictly greater than its neighborhood.
    Max,
}

impl AeMode {
    fn is_extreme(&self, candidate: u8, current: u8) -> bool {
        match self {
            AeMode::Min => candidate < current,
            AeMode::Max => candidate > current,
        }
    }
}

/// The candidate extremum within the open chunk.
#[derive(Debug, Clone, Copy)]
struct Extremum {
    value: u8,
    /// Position relative to the chunk start.
    pos: u64,
}

/// Content-defined chunker around local byte extrema.
///
/// Walking forward from the chunk start, the chunker tracks the strictest
/// extremum seen so far. When the lookahead window after the candidate fills
/// without producing a new extremum, the chunk closes at the end of that
/// window; the byte that closed it starts the next chunk.
#[derive(Debug, Clone)]
pub struct AeChunker {
    mode: AeMode,
    window_size: u64,
    /// Bytes scanned since the chunk start.
    pos: u64,
    extremum: Option<Extremum>,
}

impl AeChunker {
    /// Creates a chunker from validated parameters.
    pub fn new(params: AeParams) -> Self {
        let window_size = (params.avg_block_size() as f64 / WINDOW_RATIO).round() as u64;
        Self {
            mode: params.extreme_mode(),
            window_size: window_size.max(1),
            pos: 0,
            extremum: None,
        }
    }

    /// Returns the lookahead window size in bytes.
    pub fn window_size(&self) -> u64 {
        self.window_size
    }
}

impl BoundaryFinder for AeChunker {
    fn reset(&mut self) {
        self.pos = 0;
        self.extremum = None;
    }

    fn next_boundary(&mut self, data: &[u8]) -> Option<usize> {
        for (i, &b) in data.iter().enumerate() {
            let pos = self.pos + i as u64;
            match self.extremum {
                None => self.extremum = Some(Extremum { value: b, pos }),
                Some(ref mut e) => {
                    if self.mode.is_extreme(b, e.value) {
                        e.value = b;
                        e.pos = pos;
                    } else if pos == e.pos + self.window_size {
                        // The window after the candidate is full; the chunk
                        // ends just before this byte.
                        self.pos = 0;
                        self.extremum = None;
                        return Some(i);
                    }
                }
            }
        }
        self.pos += data.len() as u64;
        None
    }

    fn finish(&mut self) -> Option<u64> {
        if self.pos == 0 {
            return None;
        }
        Some(self.pos)
    }
}
