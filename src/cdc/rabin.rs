//! Rabin fingerprint chunking.
//!
//! Bytes are treated as coefficients of a polynomial over GF(2); the rolling
//! digest is that polynomial reduced modulo a fixed irreducible polynomial.
//! Two 256-entry tables keep the per-byte slide to a handful of XORs.

use super::BoundaryFinder;
use crate::config::RabinParams;

/// The fixed irreducible polynomial (degree 53), as used by restic and IPFS.
pub const POLYNOMIAL: u64 = 0x3DA3358B4DC173;

/// Top-byte fold shift: `deg(POLYNOMIAL) - 8`.
const POL_SHIFT: u32 = 45;

/// Degree of `p` as a GF(2) polynomial, or -1 for the zero polynomial.
fn deg(p: u64) -> i32 {
    63 - p.leading_zeros() as i32
}

/// Remainder of `x` divided by `p` over GF(2).
fn poly_mod(mut x: u64, p: u64) -> u64 {
    while deg(x) >= deg(p) {
        let shift = deg(x) - deg(p);
        x ^= p << shift;
    }
    x
}

/// Appends one byte to `hash` and reduces modulo `p`.
fn append_byte(hash: u64, b: u8, p: u64) -> u64 {
    poly_mod((hash << 8) | b as u64, p)
}

/// Content-defined chunker over a rolling Rabin fingerprint.
///
/// A cut is taken once at least `min_block_size` bytes are in the open chunk
/// and the digest's low bits (under the fingerprint mask derived from
/// `avg_block_size`) are all zero, or unconditionally at `max_block_size`.
/// The byte that satisfies the rule is the last byte of the closed chunk.
#[derive(Debug, Clone)]
pub struct RabinChunker {
    min_block_size: u64,
    max_block_size: u64,
    fingerprint_mask: u64,

    window: Vec<u8>,
    wpos: usize,
    digest: u64,
    count: u64,
    cut_fingerprint: u64,

    // out_table[b] = Hash(b || 0 ... 0) over a full window, so XORing it
    // cancels the contribution of the byte leaving the window.
    out_table: [u64; 256],
    // mod_table[b] = (b·x^k mod P) | b·x^k for k = deg(P): one XOR both
    // reduces the shifted digest and clears its top byte.
    mod_table: [u64; 256],
}

impl RabinChunker {
    /// Creates a chunker from validated parameters.
    ///
    /// Both lookup tables are built here, so every scan starts with them
    /// ready; no shared or lazily-initialized state is involved.
    pub fn new(params: RabinParams) -> Self {
        let window_size = params.window_size();

        let mut out_table = [0u64; 256];
        for (b, entry) in out_table.iter_mut().enumerate() {
            let mut hash = append_byte(0, b as u8, POLYNOMIAL);
            for _ in 0..window_size - 1 {
                hash = append_byte(hash, 0, POLYNOMIAL);
            }
            *entry = hash;
        }

        let k = deg(POLYNOMIAL);
        let mut mod_table = [0u64; 256];
        for (b, entry) in mod_table.iter_mut().enumerate() {
            let shifted = (b as u64) << k;
            *entry = poly_mod(shifted, POLYNOMIAL) | shifted;
        }

        let mut chunker = Self {
            min_block_size: params.min_block_size(),
            max_block_size: params.max_block_size(),
            fingerprint_mask: fingerprint_mask(params.avg_block_size()),
            window: vec![0u8; window_size as usize],
            wpos: 0,
            digest: 0,
            count: 0,
            cut_fingerprint: 0,
            out_table,
            mod_table,
        };
        chunker.reset();
        chunker
    }

    /// Returns the sliding window size in bytes.
    pub fn window_size(&self) -> u64 {
        self.window.len() as u64
    }

    /// Returns the digest recorded at the most recent cut.
    pub fn cut_fingerprint(&self) -> u64 {
        self.cut_fingerprint
    }

    fn append(&mut self, b: u8) {
        let index = (self.digest >> POL_SHIFT) as u8;
        self.digest = ((self.digest << 8) | b as u64) ^ self.mod_table[index as usize];
    }

    fn slide(&mut self, b: u8) {
        let out = self.window[self.wpos];
        self.window[self.wpos] = b;
        self.digest ^= self.out_table[out as usize];
        self.wpos = (self.wpos + 1) % self.window.len();
        self.append(b);
    }
}

impl BoundaryFinder for RabinChunker {
    fn reset(&mut self) {
        self.window.fill(0);
        self.wpos = 0;
        self.digest = 0;
        self.count = 0;
        // Slide in a sentinel byte so the initial digest is non-trivial.
        // The sentinel does not count toward the chunk length.
        self.slide(1);
    }

    fn next_boundary(&mut self, data: &[u8]) -> Option<usize> {
        for (i, &b) in data.iter().enumerate() {
            self.slide(b);
            self.count += 1;

            if (self.count >= self.min_block_size
                && (self.digest & self.fingerprint_mask) == 0)
                || self.count >= self.max_block_size
            {
                self.cut_fingerprint = self.digest;
                self.reset();
                return Some(i + 1);
            }
        }
        None
    }

    fn finish(&mut self) -> Option<u64> {
        if self.count == 0 {
            return None;
        }
        self.cut_fingerprint = self.digest;
        Some(self.count)
    }
}

/// Mask whose zero-test fires once per `avg` bytes on uniform digests.
///
/// Derived from the bit length of `avg`, so a non-power-of-two average is
/// rounded down to the previous power of two.
fn fingerprint_mask(avg: u64) -> u64 {
    let bits = 63 - avg.leading_zeros();
    (1u64 << bits) - 1
}
