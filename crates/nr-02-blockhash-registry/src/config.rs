//! # Blockhash Registry Configuration

use crate::domain::BlockhashError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of recent blocks whose hashes the block source serves directly.
pub const DIRECT_WINDOW: u64 = 256;

/// Blockhash registry configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockhashConfig {
    /// Blocks `n` with `current - n < direct_window` are read from the source.
    pub direct_window: u64,
}

impl Default for BlockhashConfig {
    fn default() -> Self {
        Self {
            direct_window: DIRECT_WINDOW,
        }
    }
}

impl BlockhashConfig {
    /// Create a config for testing (short window, short test chains).
    pub fn for_testing() -> Self {
        Self { direct_window: 16 }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), BlockhashError> {
        if self.direct_window == 0 {
            return Err(BlockhashError::InvalidConfig(
                "direct_window must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from environment variables (`NR_DIRECT_WINDOW`).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("NR_DIRECT_WINDOW") {
            match val.parse() {
                Ok(window) => config.direct_window = window,
                Err(_) => warn!("[nr-02] ignoring invalid NR_DIRECT_WINDOW={}", val),
            }
        }

        config
    }
}
