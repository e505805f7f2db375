use std::env;
use std::time::Duration;

use trivia_core::model::{AnswerOptionBuilder, FetchRequest};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BANK_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BANK_URL_VAR: &str = "TRIVIA_BANK_URL";
const TIMEOUT_VAR: &str = "TRIVIA_TIMEOUT_SECS";
const SHUFFLE_BOOLEAN_VAR: &str = "TRIVIA_SHUFFLE_BOOLEAN";

/// Settings for talking to the question bank and shaping a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankConfig {
    /// Endpoint the `amount`/`type` query is appended to. `with_base_url`
    /// only accepts http(s) urls.
    pub base_url: String,
    pub timeout: Duration,
    /// Shuffle true/false options instead of keeping `[correct, incorrect]`.
    pub randomize_boolean: bool,
    /// Requests issued concurrently for every session.
    pub composition: Vec<FetchRequest>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BANK_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            randomize_boolean: false,
            composition: FetchRequest::standard_session(),
        }
    }
}

impl BankConfig {
    /// Defaults overlaid with `TRIVIA_BANK_URL`, `TRIVIA_TIMEOUT_SECS` and
    /// `TRIVIA_SHUFFLE_BOOLEAN`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BANK_URL_VAR) {
            config = config.with_base_url(BANK_URL_VAR, url)?;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout = parse_timeout(TIMEOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SHUFFLE_BOOLEAN_VAR) {
            config.randomize_boolean = parse_flag(SHUFFLE_BOOLEAN_VAR, &raw)?;
        }

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Empty` for a blank url and
    /// `ConfigError::InvalidValue` for anything that is not an http(s) url.
    pub fn with_base_url(
        mut self,
        key: &'static str,
        url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Empty { key });
        }
        let valid = Url::parse(trimmed)
            .is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"));
        if !valid {
            return Err(ConfigError::InvalidValue {
                key,
                value: trimmed.to_string(),
            });
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn option_builder(&self) -> AnswerOptionBuilder {
        AnswerOptionBuilder::new().with_randomize_boolean(self.randomize_boolean)
    }
}

/// Parse a whole number of seconds greater than zero.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for anything else.
pub fn parse_timeout(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidValue` unless `raw` is a recognised boolean.
pub fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}
