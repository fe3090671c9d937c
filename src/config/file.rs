//! Line-oriented `key=value` configuration file parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{
    AeParams, ChunkingAlgo, FixedParams, RabinParams, AE_AVG_BLOCK_SIZE, AE_EXTREME_MODE,
    CHUNKING_ALGO, FC_SIZE, HASHING_ALGO, RABINC_AVG_BLOCK_SIZE, RABINC_MAX_BLOCK_SIZE,
    RABINC_MIN_BLOCK_SIZE, RABINC_WINDOW_SIZE,
};
use crate::cdc::AeMode;
use crate::error::ChunkError;
use crate::hash::HashAlgorithm;

/// A parsed configuration file.
///
/// The format is line-oriented UTF-8: a line is blank, a comment beginning
/// with `#`, or `key=value`. Whitespace around `=` is not stripped, so
/// `key = value` does not define `key`. When a key appears more than once
/// the last occurrence wins.
///
/// Values are kept as raw strings; the typed getters parse on demand and
/// surface [`ChunkError::MissingKey`] / [`ChunkError::InvalidValue`] at
/// first access.
///
/// # Example
///
/// ```
/// use cdchunk::{ChunkingAlgo, ConfigFile};
///
/// let config = ConfigFile::parse(
///     "# deduplication run\n\
///      chunking_algo=ae\n\
///      hashing_algo=sha1\n\
///      ae_avg_block_size=4096\n\
///      ae_extreme_mode=max\n",
/// )?;
/// assert_eq!(config.chunking_algo()?, ChunkingAlgo::Ae);
/// # Ok::<(), cdchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    values: HashMap<String, String>,
}

impl ConfigFile {
    /// Reads and parses a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChunkError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading configuration");
        Self::parse(&text)
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidLine`] for a non-blank, non-comment line
    /// without a `=` delimiter.
    pub fn parse(text: &str) -> Result<Self, ChunkError> {
        let mut values = HashMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.to_string(), value.to_string());
                }
                None => return Err(ChunkError::InvalidLine { line: idx + 1 }),
            }
        }
        Ok(Self { values })
    }

    /// Returns the raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn require(&self, key: &'static str) -> Result<&str, ChunkError> {
        self.get(key).ok_or(ChunkError::MissingKey { key })
    }

    fn require_u64(&self, key: &'static str) -> Result<u64, ChunkError> {
        let value = self.require(key)?;
        value.parse().map_err(|_| ChunkError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }

    /// Returns the selected chunking algorithm.
    pub fn chunking_algo(&self) -> Result<ChunkingAlgo, ChunkError> {
        ChunkingAlgo::parse(self.require(CHUNKING_ALGO)?)
    }

    /// Returns the selected hashing algorithm.
    pub fn hashing_algo(&self) -> Result<HashAlgorithm, ChunkError> {
        HashAlgorithm::parse(self.require(HASHING_ALGO)?)
    }

    /// Returns the fixed-size chunk length.
    pub fn fc_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(FC_SIZE)
    }

    /// Returns the Rabin sliding window size.
    pub fn rabinc_window_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(RABINC_WINDOW_SIZE)
    }

    /// Returns the Rabin minimum block size.
    pub fn rabinc_min_block_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(RABINC_MIN_BLOCK_SIZE)
    }

    /// Returns the Rabin average block size.
    pub fn rabinc_avg_block_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(RABINC_AVG_BLOCK_SIZE)
    }

    /// Returns the Rabin maximum block size.
    pub fn rabinc_max_block_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(RABINC_MAX_BLOCK_SIZE)
    }

    /// Returns the AE average block size.
    pub fn ae_avg_block_size(&self) -> Result<u64, ChunkError> {
        self.require_u64(AE_AVG_BLOCK_SIZE)
    }

    /// Returns the AE extremum mode.
    pub fn ae_extreme_mode(&self) -> Result<AeMode, ChunkError> {
        let value = self.require(AE_EXTREME_MODE)?;
        match value {
            "min" => Ok(AeMode::Min),
            "max" => Ok(AeMode::Max),
            _ => Err(ChunkError::InvalidValue {
                key: AE_EXTREME_MODE,
                value: value.to_string(),
            }),
        }
    }

    /// Assembles and validates the fixed-size parameters.
    pub fn fixed_params(&self) -> Result<FixedParams, ChunkError> {
        FixedParams::new(self.fc_size()?)
    }

    /// Assembles and validates the Rabin parameters.
    pub fn rabin_params(&self) -> Result<RabinParams, ChunkError> {
        RabinParams::new(
            self.rabinc_window_size()?,
            self.rabinc_min_block_size()?,
            self.rabinc_avg_block_size()?,
            self.rabinc_max_block_size()?,
        )
    }

    /// Assembles and validates the AE parameters.
    pub fn ae_params(&self) -> Result<AeParams, ChunkError> {
        AeParams::new(self.ae_avg_block_size()?, self.ae_extreme_mode()?)
    }
}
