//! Game configuration.
//!
//! Read from the environment first; command-line flags in the binary
//! override individual fields.

use crate::proof::verify::{Scheme, UnknownScheme};

/// Commitment scheme variable.
pub const ENV_SCHEME: &str = "FAIR_DICE_SCHEME";
/// Transcript printing variable.
pub const ENV_TRANSCRIPT: &str = "FAIR_DICE_TRANSCRIPT";
/// Log filter variable.
pub const ENV_LOG: &str = "FAIR_DICE_LOG";

/// Filter used when neither `FAIR_DICE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings for the game binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Commitment scheme for every draw.
    pub scheme: Scheme,
    /// Print the round transcript as JSON after each round.
    pub show_transcript: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            show_transcript: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, UnknownScheme> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UnknownScheme>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            scheme: match lookup(ENV_SCHEME) {
                Some(name) => name.parse()?,
                None => defaults.scheme,
            },
            show_transcript: lookup(ENV_TRANSCRIPT)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.show_transcript),
            log_filter: lookup(ENV_LOG)
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
        })
    }
}
