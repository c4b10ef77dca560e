//! Combinator configuration.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic**: values set via builder methods (`empty_race(..)`)
//! 2. **Environment variables**: values from `QX_*` env vars
//! 3. **Config file**: values loaded from a TOML file (requires `config-file` feature)
//! 4. **Defaults**: built-in defaults from [`CombinatorConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `QX_EMPTY_RACE` | `reject` \| `pending` | `empty_race` |
//!
//! # Config File
//!
//! ```toml
//! [race]
//! empty = "pending"
//! ```

use core::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable name for the empty-input policy of `any`.
pub const ENV_EMPTY_RACE: &str = "QX_EMPTY_RACE";

/// What [`any`](crate::combinator::any) does when handed no values.
///
/// Racing nothing has no natural answer: no participant can ever fulfill and
/// none can ever reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-file", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "lowercase"))]
pub enum EmptyRacePolicy {
    /// Reject immediately with [`AnyError::Empty`](crate::combinator::AnyError::Empty).
    #[default]
    Reject,
    /// Stay pending forever, the identity element for racing.
    #[cfg_attr(feature = "config-file", serde(alias = "never"))]
    Pending,
}

impl fmt::Display for EmptyRacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

impl FromStr for EmptyRacePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "pending" | "never" => Ok(Self::Pending),
            other => Err(format!("expected reject or pending, got {other:?}")),
        }
    }
}

/// Tunables shared by the combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombinatorConfig {
    /// Policy for `any` over an empty collection.
    pub empty_race: EmptyRacePolicy,
}

impl CombinatorConfig {
    /// Returns the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the empty-input policy for `any`.
    #[must_use]
    pub const fn empty_race(mut self, policy: EmptyRacePolicy) -> Self {
        self.empty_race = policy;
        self
    }

    /// Defaults overridden by any `QX_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Loads a TOML file, then applies environment overrides on top.
    #[cfg(feature = "config-file")]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let mut config = Self::default();
        apply_toml_config(&mut config, &parse_toml_file(path)?);
        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

/// Apply environment variable overrides to a [`CombinatorConfig`].
///
/// Only variables that are set in the environment are applied.
/// Returns an error if a variable is set but contains an unparseable value.
pub fn apply_env_overrides(config: &mut CombinatorConfig) -> Result<()> {
    if let Some(val) = read_env(ENV_EMPTY_RACE) {
        config.empty_race = val.parse().map_err(|message| Error::InvalidEnv {
            var: ENV_EMPTY_RACE,
            message,
        })?;
    }
    Ok(())
}

/// Read an environment variable, returning `None` if unset.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// =========================================================================
// TOML config file support (feature-gated)
// =========================================================================

/// TOML-deserializable combinator configuration.
///
/// Only fields that are present in the file override the config.
#[cfg(feature = "config-file")]
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombinatorTomlConfig {
    /// `[race]` table.
    pub race: RaceTomlConfig,
}

/// `[race]` table of the config file.
#[cfg(feature = "config-file")]
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceTomlConfig {
    /// Empty-input policy for `any`.
    pub empty: Option<EmptyRacePolicy>,
}

/// Apply the fields present in a parsed TOML config.
#[cfg(feature = "config-file")]
pub fn apply_toml_config(config: &mut CombinatorConfig, toml: &CombinatorTomlConfig) {
    if let Some(v) = toml.race.empty {
        config.empty_race = v;
    }
}

/// Parse a TOML string into a [`CombinatorTomlConfig`].
#[cfg(feature = "config-file")]
pub fn parse_toml_str(toml_str: &str) -> Result<CombinatorTomlConfig> {
    toml::from_str(toml_str).map_err(|e| Error::ConfigParse(e.to_string()))
}

/// Read and parse a TOML file into a [`CombinatorTomlConfig`].
#[cfg(feature = "config-file")]
pub fn parse_toml_file(path: &std::path::Path) -> Result<CombinatorTomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml_str(&content)
}
