//! Configuration for chunking behavior.
//!
//! This module provides the configuration surface of the crate:
//!
//! - [`ConfigFile`] - Parses the line-oriented `key=value` configuration file
//! - [`RabinParams`], [`AeParams`], [`FixedParams`] - Validated parameter
//!   sets consumed by the chunker constructors
//! - [`ChunkingAlgo`] - The algorithm selected by `chunking_algo`
//!
//! # Example
//!
//! ```
//! use cdchunk::{ConfigFile, RabinParams};
//!
//! let config = ConfigFile::parse(
//!     "chunking_algo=rabins\n\
//!      hashing_algo=sha256\n\
//!      rabinc_window_size=48\n\
//!      rabinc_min_block_size=2048\n\
//!      rabinc_avg_block_size=4096\n\
//!      rabinc_max_block_size=8192\n",
//! )?;
//! let params: RabinParams = config.rabin_params()?;
//! assert_eq!(params.avg_block_size(), 4096);
//! # Ok::<(), cdchunk::ChunkError>(())
//! ```

mod file;

pub use file::ConfigFile;

use crate::cdc::AeMode;
use crate::error::ChunkError;

/// Configuration key selecting the chunking algorithm.
pub const CHUNKING_ALGO: &str = "chunking_algo";
/// Configuration key selecting the hashing algorithm.
pub const HASHING_ALGO: &str = "hashing_algo";
/// Configuration key for the fixed-size chunk length.
pub const FC_SIZE: &str = "fc_size";
/// Configuration key for the Rabin sliding window size.
pub const RABINC_WINDOW_SIZE: &str = "rabinc_window_size";
/// Configuration key for the Rabin minimum block size.
pub const RABINC_MIN_BLOCK_SIZE: &str = "rabinc_min_block_size";
/// Configuration key for the Rabin average block size.
pub const RABINC_AVG_BLOCK_SIZE: &str = "rabinc_avg_block_size";
/// Configuration key for the Rabin maximum block size.
pub const RABINC_MAX_BLOCK_SIZE: &str = "rabinc_max_block_size";
/// Configuration key for the AE average block size.
pub const AE_AVG_BLOCK_SIZE: &str = "ae_avg_block_size";
/// Configuration key for the AE extremum mode.
pub const AE_EXTREME_MODE: &str = "ae_extreme_mode";

/// Default Rabin sliding window size (bytes).
pub const DEFAULT_RABIN_WINDOW_SIZE: u64 = 64;
/// Default Rabin minimum block size (bytes).
pub const DEFAULT_RABIN_MIN_BLOCK_SIZE: u64 = 2048;
/// Default Rabin average block size (bytes).
pub const DEFAULT_RABIN_AVG_BLOCK_SIZE: u64 = 4096;
/// Default Rabin maximum block size (bytes).
pub const DEFAULT_RABIN_MAX_BLOCK_SIZE: u64 = 8192;
/// Default AE average block size (bytes).
pub const DEFAULT_AE_AVG_BLOCK_SIZE: u64 = 4096;
/// Default fixed chunk size (bytes).
pub const DEFAULT_FC_SIZE: u64 = 4096;

/// The chunking algorithm selected by the `chunking_algo` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkingAlgo {
    /// Fixed-size chunking.
    Fixed,
    /// Rabin fingerprint chunking.
    Rabins,
    /// Asymmetric Extremum chunking.
    Ae,
}

impl ChunkingAlgo {
    /// Parses the configuration spelling of an algorithm.
    ///
    /// Recognized values are `fixed`, `rabins`, and `ae`.
    pub(crate) fn parse(value: &str) -> Result<Self, ChunkError> {
        match value {
            "fixed" => Ok(ChunkingAlgo::Fixed),
            "rabins" => Ok(ChunkingAlgo::Rabins),
            "ae" => Ok(ChunkingAlgo::Ae),
            _ => Err(ChunkError::InvalidValue {
                key: CHUNKING_ALGO,
                value: value.to_string(),
            }),
        }
    }
}

/// Validated parameters for [`RabinChunker`](crate::RabinChunker).
///
/// Construction rejects inconsistent values, so a chunker built from a
/// `RabinParams` never has to re-check them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RabinParams {
    window_size: u64,
    min_block_size: u64,
    avg_block_size: u64,
    max_block_size: u64,
}

impl RabinParams {
    /// Creates a parameter set, validating consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the window or minimum is
    /// zero, the minimum exceeds the average, or the average exceeds the
    /// maximum.
    pub fn new(
        window_size: u64,
        min_block_size: u64,
        avg_block_size: u64,
        max_block_size: u64,
    ) -> Result<Self, ChunkError> {
        if window_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "window size must be at least 1",
            });
        }
        if min_block_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "minimum block size must be at least 1",
            });
        }
        if min_block_size > avg_block_size {
            return Err(ChunkError::InvalidConfig {
                message: "minimum block size cannot exceed the average",
            });
        }
        if avg_block_size > max_block_size {
            return Err(ChunkError::InvalidConfig {
                message: "average block size cannot exceed the maximum",
            });
        }
        Ok(Self {
            window_size,
            min_block_size,
            avg_block_size,
            max_block_size,
        })
    }

    /// Returns the sliding window size in bytes.
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    /// Returns the minimum block size in bytes.
    pub fn min_block_size(&self) -> u64 {
        self.min_block_size
    }

    /// Returns the target average block size in bytes.
    ///
    /// The cut-point mask is derived from the highest power of two not
    /// exceeding this value, so a non-power-of-two average is effectively
    /// rounded down.
    pub fn avg_block_size(&self) -> u64 {
        self.avg_block_size
    }

    /// Returns the maximum block size in bytes.
    pub fn max_block_size(&self) -> u64 {
        self.max_block_size
    }
}

impl Default for RabinParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_RABIN_WINDOW_SIZE,
            min_block_size: DEFAULT_RABIN_MIN_BLOCK_SIZE,
            avg_block_size: DEFAULT_RABIN_AVG_BLOCK_SIZE,
            max_block_size: DEFAULT_RABIN_MAX_BLOCK_SIZE,
        }
    }
}

/// Validated parameters for [`AeChunker`](crate::AeChunker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeParams {
    avg_block_size: u64,
    extreme_mode: AeMode,
}

impl AeParams {
    /// Creates a parameter set, validating consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the average is below 2.
    pub fn new(avg_block_size: u64, extreme_mode: AeMode) -> Result<Self, ChunkError> {
        if avg_block_size < 2 {
            return Err(ChunkError::InvalidConfig {
                message: "average block size must be at least 2",
            });
        }
        Ok(Self {
            avg_block_size,
            extreme_mode,
        })
    }

    /// Returns the target average block size in bytes.
    pub fn avg_block_size(&self) -> u64 {
        self.avg_block_size
    }

    /// Returns which extremum triggers a cut.
    pub fn extreme_mode(&self) -> AeMode {
        self.extreme_mode
    }
}

impl Default for AeParams {
    fn default() -> Self {
        Self {
            avg_block_size: DEFAULT_AE_AVG_BLOCK_SIZE,
            extreme_mode: AeMode::Max,
        }
    }
}

/// Validated parameters for [`FixedChunker`](crate::FixedChunker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedParams {
    size: u64,
}

impl FixedParams {
    /// Creates a parameter set, validating consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the size is zero.
    pub fn new(size: u64) -> Result<Self, ChunkError> {
        if size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "fixed chunk size must be at least 1",
            });
        }
        Ok(Self { size })
    }

    /// Returns the fixed chunk size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Default for FixedParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_FC_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rabin_params_validation() {
        assert!(RabinParams::new(48, 2048, 4096, 8192).is_ok());
        assert!(RabinParams::new(0, 2048, 4096, 8192).is_err());
        assert!(RabinParams::new(48, 0, 4096, 8192).is_err());
        assert!(RabinParams::new(48, 8192, 4096, 8192).is_err());
        assert!(RabinParams::new(48, 2048, 16384, 8192).is_err());
        // min == avg == max is allowed
        assert!(RabinParams::new(48, 4096, 4096, 4096).is_ok());
    }

    #[test]
    fn test_ae_params_validation() {
        assert!(AeParams::new(4096, AeMode::Max).is_ok());
        assert!(AeParams::new(2, AeMode::Min).is_ok());
        assert!(AeParams::new(1, AeMode::Max).is_err());
        assert!(AeParams::new(0, AeMode::Max).is_err());
    }

    #[test]
    fn test_fixed_params_validation() {
        assert!(FixedParams::new(1).is_ok());
        assert!(FixedParams::new(0).is_err());
    }

    #[test]
    fn test_chunking_algo_parse() {
        assert_eq!(
            ChunkingAlgo::parse("fixed").unwrap(),
            ChunkingAlgo::Fixed
        );
        assert_eq!(
            ChunkingAlgo::parse("rabins").unwrap(),
            ChunkingAlgo::Rabins
        );
        assert_eq!(ChunkingAlgo::parse("ae").unwrap(), ChunkingAlgo::Ae);
        assert!(ChunkingAlgo::parse("rabin").is_err());
    }

    #[test]
    fn test_defaults_are_consistent() {
        let rabin = RabinParams::default();
        assert!(RabinParams::new(
            rabin.window_size(),
            rabin.min_block_size(),
            rabin.avg_block_size(),
            rabin.max_block_size()
        )
        .is_ok());

        let ae = AeParams::default();
        assert!(AeParams::new(ae.avg_block_size(), ae.extreme_mode()).is_ok());
    }
}
