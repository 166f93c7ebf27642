// ## 📂 File: `src/stream/config.rs`

use thiserror::Error;

use crate::constants::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE_LIMIT};
use crate::crypto::types::TAG_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_block_size must be non-zero")]
    ZeroBlockSize,

    #[error("max_block_size {requested} exceeds limit {limit}")]
    BlockSizeTooLarge { requested: usize, limit: usize },
}

/// Stream sizing shared by both ends.
///
/// The block size is not carried on the wire: a reader configured smaller than
/// its writer rejects full blocks as oversized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum plaintext bytes sealed into one block.
    pub max_block_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { max_block_size: DEFAULT_BLOCK_SIZE }
    }
}

impl StreamConfig {
    pub fn new(max_block_size: Option<usize>) -> Self {
        Self { max_block_size: max_block_size.unwrap_or(DEFAULT_BLOCK_SIZE) }
    }

    pub fn with_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.max_block_size > MAX_BLOCK_SIZE_LIMIT {
            return Err(ConfigError::BlockSizeTooLarge {
                requested: self.max_block_size,
                limit: MAX_BLOCK_SIZE_LIMIT,
            });
        }
        Ok(())
    }

    /// Largest sealed payload a conforming writer emits under this config.
    pub fn max_sealed_len(&self) -> u64 {
        (self.max_block_size + TAG_LEN) as u64
    }
}
