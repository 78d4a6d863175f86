//! # Registry Configuration
//!
//! Deposit bounds, time windows and the slashing split.

use crate::domain::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{tokens, Address, U256, SECONDS_PER_DAY, SECONDS_PER_YEAR, ZERO_ADDRESS};
use tracing::warn;

/// Lock between unregistering and deposit return.
pub const UNREGISTER_LOCK_SECS: u64 = 40 * SECONDS_PER_DAY;

/// Share of a slashed deposit paid to the convictor.
pub const CONVICTOR_SHARE_PERCENT: u8 = 50;

/// Blocks a convict commitment stays revealable.
pub const COMMITMENT_TTL_BLOCKS: u64 = 256;

/// Smallest accepted deposit (10^16 base units).
pub fn default_min_deposit() -> U256 {
    U256::exp10(16)
}

/// Largest accepted deposit during the first year (50 tokens).
pub fn default_max_deposit_first_year() -> U256 {
    tokens(50)
}

/// Registry protocol configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Deposits below this are rejected.
    pub min_deposit: U256,
    /// Deposit ceiling while the cap period runs.
    pub max_deposit_first_year: U256,
    /// Length of the capped period after deployment.
    pub deposit_cap_period_secs: u64,
    /// Length of the admin-removal period after deployment.
    pub admin_window_secs: u64,
    /// Lock applied on unregistration.
    pub unregister_lock_secs: u64,
    /// Percent of a slashed deposit paid to the convictor.
    pub convictor_share_percent: u8,
    /// Blocks after which a pending commitment can no longer be revealed.
    pub commitment_ttl_blocks: u64,
    /// Address allowed to remove nodes during the admin window.
    pub admin_key: Address,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_deposit: default_min_deposit(),
            max_deposit_first_year: default_max_deposit_first_year(),
            deposit_cap_period_secs: SECONDS_PER_YEAR,
            admin_window_secs: SECONDS_PER_YEAR,
            unregister_lock_secs: UNREGISTER_LOCK_SECS,
            convictor_share_percent: CONVICTOR_SHARE_PERCENT,
            commitment_ttl_blocks: COMMITMENT_TTL_BLOCKS,
            admin_key: ZERO_ADDRESS,
        }
    }
}

impl RegistryConfig {
    /// Create a config for testing (fixed admin key).
    pub fn for_testing() -> Self {
        Self {
            admin_key: [0xad; 20],
            ..Self::default()
        }
    }

    /// Check the configuration is consistent.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.min_deposit.is_zero() {
            return Err(RegistryError::InvalidConfig(
                "min_deposit must be positive".to_string(),
            ));
        }
        if self.max_deposit_first_year < self.min_deposit {
            return Err(RegistryError::InvalidConfig(
                "max_deposit_first_year below min_deposit".to_string(),
            ));
        }
        if self.convictor_share_percent > 100 {
            return Err(RegistryError::InvalidConfig(format!(
                "convictor_share_percent {} exceeds 100",
                self.convictor_share_percent
            )));
        }
        if self.commitment_ttl_blocks == 0 {
            return Err(RegistryError::InvalidConfig(
                "commitment_ttl_blocks must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from environment variables (`NR_*`), keeping defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parsed("NR_MIN_DEPOSIT", |s| U256::from_dec_str(s).ok()) {
            config.min_deposit = v;
        }
        if let Some(v) = env_parsed("NR_MAX_DEPOSIT_FIRST_YEAR", |s| U256::from_dec_str(s).ok()) {
            config.max_deposit_first_year = v;
        }
        if let Some(v) = env_parsed("NR_DEPOSIT_CAP_PERIOD_SECS", |s| s.parse().ok()) {
            config.deposit_cap_period_secs = v;
        }
        if let Some(v) = env_parsed("NR_ADMIN_WINDOW_SECS", |s| s.parse().ok()) {
            config.admin_window_secs = v;
        }
        if let Some(v) = env_parsed("NR_UNREGISTER_LOCK_SECS", |s| s.parse().ok()) {
            config.unregister_lock_secs = v;
        }
        if let Some(v) = env_parsed("NR_CONVICTOR_SHARE_PERCENT", |s| s.parse().ok()) {
            config.convictor_share_percent = v;
        }
        if let Some(v) = env_parsed("NR_COMMITMENT_TTL_BLOCKS", |s| s.parse().ok()) {
            config.commitment_ttl_blocks = v;
        }
        if let Some(v) = env_parsed("NR_ADMIN_KEY", parse_address) {
            config.admin_key = v;
        }

        config
    }
}

fn env_parsed<T>(key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let val = std::env::var(key).ok()?;
    let parsed = parse(val.trim());
    if parsed.is_none() {
        warn!("[nr-04] ignoring invalid {}={}", key, val);
    }
    parsed
}

/// Parse a 20-byte hex address, with or without `0x`.
pub fn parse_address(s: &str) -> Option<Address> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).ok()?;
    Address::try_from(bytes.as_slice()).ok()
}
