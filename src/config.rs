use std::fmt;

use secrecy::SecretString;

/// USD per audio minute for Nova-3 pre-recorded (pay-as-you-go).
/// Override with DG_RATE_PER_MIN in .env if pricing changes.
pub const DEFAULT_RATE_PER_MIN: f64 = 0.0043;

const API_KEY_VAR: &str = "DEEPGRAM_API_KEY";
const RATE_VAR: &str = "DG_RATE_PER_MIN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DEEPGRAM_API_KEY missing - add it to a .env file")]
    ApiKeyMissing,
    #[error("DG_RATE_PER_MIN is not a number: {0}")]
    InvalidRate(String),
}

/// Runtime settings sourced from the environment (after `.env` loading)
pub struct Settings {
    pub api_key: SecretString,
    pub rate_per_min: f64,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("rate_per_min", &self.rate_per_min)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Lookup-injected constructor so tests can drive settings from a map
    /// instead of process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::ApiKeyMissing)?;

        let rate_per_min = match lookup(RATE_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidRate(raw))?,
            None => DEFAULT_RATE_PER_MIN,
        };

        Ok(Self {
            api_key: api_key.into(),
            rate_per_min,
        })
    }
}
