//! Core streaming driver - pulls buffers from a source and emits chunks.
//!
//! The driver is generic over [`BoundaryFinder`], so the scan loop is the
//! same for every algorithm and no per-byte dispatch happens at runtime.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::cdc::{AeChunker, BoundaryFinder, FixedChunker, RabinChunker};
use crate::chunk::Chunk;
use crate::config::{ChunkingAlgo, ConfigFile};
use crate::error::ChunkError;
use crate::hash::HashAlgorithm;

/// Default scratch buffer size (40 MiB).
///
/// Reads are issued in blocks of this size; a large block keeps the read
/// syscall count low and makes a chunk spanning several refills rare.
pub const SCRATCH_BUFFER_SIZE: usize = 40 * 1024 * 1024;

/// A chunker that processes byte streams into content-defined chunks.
///
/// `Chunker` wires a boundary-finding algorithm to a byte source: it reads
/// blocks into a scratch buffer, re-enters the algorithm until the block is
/// exhausted, and copies each closed chunk's body out before the buffer is
/// refilled. A chunk that spans refills is carried in a staging buffer, so
/// boundaries never depend on how the source happens to deliver bytes.
///
/// All running state is reset at the top of each stream; after a stream is
/// finalized the same instance can chunk another.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use cdchunk::{AeChunker, AeParams, Chunker, HashAlgorithm};
///
/// let algo = AeChunker::new(AeParams::default());
/// let mut chunker = Chunker::new(algo, Some(HashAlgorithm::Sha256));
///
/// let mut chunks = Vec::new();
/// chunker.chunk_stream(&mut chunks, Cursor::new(vec![7u8; 100_000]))?;
///
/// let total: usize = chunks.iter().map(|c| c.len()).sum();
/// assert_eq!(total, 100_000);
/// # Ok::<(), cdchunk::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct Chunker<A> {
    algo: A,
    hashing: Option<HashAlgorithm>,
    buffer_size: usize,
    /// Body of the chunk currently open, for the part that came from
    /// already-recycled buffers.
    staged: Vec<u8>,
    offset: u64,
}

impl<A: BoundaryFinder> Chunker<A> {
    /// Creates a driver over `algo`.
    ///
    /// When `hashing` is `Some`, every emitted chunk carries the digest of
    /// its body; with `None` the chunks are emitted bare.
    pub fn new(algo: A, hashing: Option<HashAlgorithm>) -> Self {
        Self::with_buffer_size(algo, hashing, SCRATCH_BUFFER_SIZE)
    }

    /// Creates a driver with a custom scratch buffer size.
    ///
    /// Chunk boundaries do not depend on the buffer size; smaller buffers
    /// only exercise the refill path more often. Mostly useful for tests and
    /// memory-constrained callers.
    pub fn with_buffer_size(algo: A, hashing: Option<HashAlgorithm>, buffer_size: usize) -> Self {
        Self {
            algo,
            hashing,
            buffer_size: buffer_size.max(1),
            staged: Vec::new(),
            offset: 0,
        }
    }

    /// Returns the wrapped algorithm.
    pub fn algorithm(&self) -> &A {
        &self.algo
    }

    /// Opens `path` and chunks its contents.
    pub fn chunk_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Chunk>, ChunkError> {
        let file = File::open(path)?;
        let mut chunks = Vec::new();
        self.chunk_stream(&mut chunks, file)?;
        Ok(chunks)
    }

    /// Pulls bytes from `source` until exhaustion, appending chunks to
    /// `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::Io`] if the source fails mid-stream. Chunks
    /// appended before the failure remain in `sink` and are valid.
    pub fn chunk_stream<R: Read>(
        &mut self,
        sink: &mut Vec<Chunk>,
        mut source: R,
    ) -> Result<(), ChunkError> {
        self.algo.reset();
        self.staged.clear();
        self.offset = 0;

        let mut scratch = Buffer::take(self.buffer_size);
        loop {
            let buf = scratch.as_mut_slice();
            let len = read_block(&mut source, buf)?;
            if len == 0 {
                break;
            }
            trace!(len, "refilled scratch buffer");

            let mut rest = &buf[..len];
            while let Some(consumed) = self.algo.next_boundary(rest) {
                let (body, remainder) = rest.split_at(consumed);
                let chunk = self.emit(body);
                sink.push(chunk);
                rest = remainder;
            }
            // Buffer exhausted mid-chunk; keep the open chunk's bytes for
            // the cut that closes it.
            self.staged.extend_from_slice(rest);
        }

        if let Some(tail) = self.algo.finish() {
            debug_assert_eq!(tail as usize, self.staged.len());
            let chunk = self.emit(&[]);
            sink.push(chunk);
        }
        debug!(chunks = sink.len(), bytes = self.offset, "stream chunked");
        Ok(())
    }

    /// Copies the closed chunk's body out of driver memory and attaches the
    /// digest. The body is `staged ++ fresh`.
    fn emit(&mut self, fresh: &[u8]) -> Chunk {
        let data = if self.staged.is_empty() {
            Bytes::copy_from_slice(fresh)
        } else {
            let mut body = Vec::with_capacity(self.staged.len() + fresh.len());
            body.extend_from_slice(&self.staged);
            body.extend_from_slice(fresh);
            self.staged.clear();
            Bytes::from(body)
        };

        let hash = self.hashing.map(|algo| algo.digest(&data));
        let chunk_offset = self.offset;
        self.offset += data.len() as u64;
        Chunk {
            data,
            offset: Some(chunk_offset),
            hash,
        }
    }
}

/// Reads until `buf` is full or the source is exhausted.
fn read_block<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Chunks `source` according to a parsed configuration.
///
/// Dispatches once on `chunking_algo` and `hashing_algo`, then runs the
/// generic driver. Each returned chunk's `Display` is the record line
/// `<hex-digest>,<length>`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use cdchunk::{chunk, ConfigFile};
///
/// let config = ConfigFile::parse(
///     "chunking_algo=fixed\n\
///      hashing_algo=md5\n\
///      fc_size=4096\n",
/// )?;
/// let chunks = chunk(&config, Cursor::new(vec![0u8; 10_000]))?;
/// assert_eq!(chunks.len(), 3);
/// for record in &chunks {
///     println!("{}", record);
/// }
/// # Ok::<(), cdchunk::ChunkError>(())
/// ```
pub fn chunk<R: Read>(config: &ConfigFile, source: R) -> Result<Vec<Chunk>, ChunkError> {
    let hashing = config.hashing_algo()?;
    let mut sink = Vec::new();
    match config.chunking_algo()? {
        ChunkingAlgo::Fixed => {
            let algo = FixedChunker::new(config.fixed_params()?);
            Chunker::new(algo, Some(hashing)).chunk_stream(&mut sink, source)?;
        }
        ChunkingAlgo::Rabins => {
            let algo = RabinChunker::new(config.rabin_params()?);
            Chunker::new(algo, Some(hashing)).chunk_stream(&mut sink, source)?;
        }
        ChunkingAlgo::Ae => {
            let algo = AeChunker::new(config.ae_params()?);
            Chunker::new(algo, Some(hashing)).chunk_stream(&mut sink, source)?;
        }
    }
    Ok(sink)
}
