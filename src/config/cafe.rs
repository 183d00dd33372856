//! Cafe configuration structures.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GuestProfile, HoldPolicy};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "CAFE_CONFIG";

const DEFAULT_GUESTS: [&str; 12] = [
    "Maria", "Oleg", "Vakhtang", "Sergey", "Darya", "Arman", "Vitoria", "Nikita", "Galina",
    "Pavel", "Ilya", "Alexandra",
];

/// Inclusive holding-time bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldRange {
    /// Shortest holding time.
    pub min_ms: u64,
    /// Longest holding time.
    pub max_ms: u64,
}

impl HoldRange {
    /// Convert to a holding policy, validating the bounds.
    pub fn to_policy(self) -> Result<HoldPolicy, ConfigError> {
        HoldPolicy::from_millis(self.min_ms, self.max_ms)
    }
}

impl Default for HoldRange {
    fn default() -> Self {
        Self {
            min_ms: 3_000,
            max_ms: 10_000,
        }
    }
}

/// One configured guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestConfig {
    /// Unique guest name.
    pub name: String,
    /// Per-guest override of the default holding range.
    #[serde(default)]
    pub hold: Option<HoldRange>,
}

/// Root cafe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeConfig {
    /// Number of tables.
    pub tables: u32,
    /// Holding range for guests without an override.
    #[serde(default)]
    pub default_hold: HoldRange,
    /// Guests in arrival order.
    #[serde(default)]
    pub guests: Vec<GuestConfig>,
    /// Runtime worker threads; defaults to the CPU count.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for CafeConfig {
    /// Five tables and twelve guests holding 3-10 seconds each.
    fn default() -> Self {
        Self {
            tables: 5,
            default_hold: HoldRange::default(),
            guests: DEFAULT_GUESTS
                .iter()
                .map(|name| GuestConfig {
                    name: (*name).to_string(),
                    hold: None,
                })
                .collect(),
            worker_threads: None,
        }
    }
}

impl CafeConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tables == 0 {
            return Err(ConfigError::NoTables);
        }
        if self.worker_threads == Some(0) {
            return Err(ConfigError::NoWorkerThreads);
        }
        self.default_hold.to_policy()?;

        let mut seen = HashSet::with_capacity(self.guests.len());
        for guest in &self.guests {
            if guest.name.trim().is_empty() {
                return Err(ConfigError::EmptyGuestName);
            }
            if !seen.insert(guest.name.as_str()) {
                return Err(ConfigError::DuplicateGuest(guest.name.clone()));
            }
            if let Some(hold) = guest.hold {
                hold.to_policy()?;
            }
        }
        Ok(())
    }

    /// Guest profiles in arrival order.
    pub fn profiles(&self) -> Result<Vec<GuestProfile>, ConfigError> {
        self.validate()?;
        self.guests
            .iter()
            .map(|g| {
                let hold = g.hold.unwrap_or(self.default_hold).to_policy()?;
                Ok(GuestProfile::new(g.name.clone(), hold))
            })
            .collect()
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&input)
    }

    /// Load `.env`, then read the file named by `CAFE_CONFIG`, falling back to
    /// [`CafeConfig::default`] when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env loaded: {e}");
        }
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_json_file(path),
            Err(_) => {
                let cfg = Self::default();
                cfg.validate()?;
                Ok(cfg)
            }
        }
    }
}
