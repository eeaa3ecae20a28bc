//! Configuration for the TextLens service
//!
//! Loaded from a TOML file (every section optional), then overridden by
//! environment variables:
//! - `TEXTLENS_ADDR`: listen address of the HTTP API
//! - `TEXTLENS_GRAMMAR_URL`: grammar provider endpoint

use crate::error::{Result, TextLensError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default public LanguageTool endpoint
pub const DEFAULT_GRAMMAR_ENDPOINT: &str = "https://api.languagetool.org/v2/check";

/// Upper bound for the grammar timeout
pub const MAX_GRAMMAR_TIMEOUT: Duration = Duration::from_secs(10);

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLensConfig {
    pub server: ServerConfig,
    pub grammar: GrammarConfig,
    pub cache: CacheConfig,
    pub sentiment: SentimentConfig,
    pub language: LanguageConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// Grammar provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Full URL of the check endpoint
    pub endpoint: String,

    /// Target language tag sent with every request
    pub language: String,

    /// Upper bound for one provider round trip (milliseconds)
    #[serde(with = "serde_millis", rename = "timeout_ms")]
    pub timeout: Duration,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GRAMMAR_ENDPOINT.to_string(),
            language: "en-US".to_string(),
            timeout: Duration::from_millis(2500),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a cached analysis (seconds)
    #[serde(with = "serde_secs", rename = "ttl_secs")]
    pub ttl: Duration,

    /// Maximum number of cached analyses before LRU eviction
    pub capacity: usize,

    /// Interval of the expired-entry sweep (seconds)
    #[serde(with = "serde_secs", rename = "sweep_interval_secs")]
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600), // 10 minutes
            capacity: 10_000,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Sentiment scoring configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Extra lexicon entries; override the bundled weights
    pub extras: HashMap<String, i32>,
}

/// Language detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Texts shorter than this (code points, trimmed) are reported as `unknown`
    pub min_length: usize,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self { min_length: 10 }
    }
}

impl TextLensConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: TextLensConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(addr) = env::var("TEXTLENS_ADDR") {
            self.server.addr = addr
                .parse()
                .map_err(|e| TextLensError::Config(format!("Invalid TEXTLENS_ADDR '{}': {}", addr, e)))?;
        }
        if let Ok(endpoint) = env::var("TEXTLENS_GRAMMAR_URL") {
            if !endpoint.is_empty() {
                self.grammar.endpoint = endpoint;
            }
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.grammar.endpoint.is_empty() {
            return Err(TextLensError::Config(
                "grammar.endpoint must not be empty".to_string(),
            ));
        }
        if self.grammar.language.is_empty() {
            return Err(TextLensError::Config(
                "grammar.language must not be empty".to_string(),
            ));
        }
        if self.grammar.timeout.is_zero() || self.grammar.timeout > MAX_GRAMMAR_TIMEOUT {
            return Err(TextLensError::Config(format!(
                "grammar.timeout_ms must be between 1 and {}",
                MAX_GRAMMAR_TIMEOUT.as_millis()
            )));
        }
        if self.cache.ttl.is_zero() {
            return Err(TextLensError::Config(
                "cache.ttl_secs must be at least 1".to_string(),
            ));
        }
        if self.cache.capacity == 0 {
            return Err(TextLensError::Config(
                "cache.capacity must be at least 1".to_string(),
            ));
        }
        if self.cache.sweep_interval.is_zero() {
            return Err(TextLensError::Config(
                "cache.sweep_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// Duration as whole seconds
mod serde_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration as whole milliseconds
mod serde_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
