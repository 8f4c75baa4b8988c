//! Configuration loading.
//!
//! Configuration is loaded from TOML with the following resolution order:
//! 1. explicit path (CLI `--config`)
//! 2. `~/.scholia/config.toml` (user)
//! 3. `/etc/scholia/config.toml` (system)
//! 4. built-in defaults
//!
//! Only an explicit path that doesn't exist is an error; otherwise a missing
//! file just means defaults.
//!
//! API keys never live in the file. Each provider entry names the
//! environment variable holding its key; an unset variable yields an empty
//! key, that provider's calls fail, and the chain moves on.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::providers::defaults::DEFAULT_CHAIN;
use crate::types::ProviderSpec;
use crate::{Result, ScholiaError};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Provider chain in priority order (default: the built-in nine).
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderEntry>,
    /// Provider name to move to the front of the chain.
    #[serde(default)]
    pub preferred: Option<String>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            cache: CacheSection::default(),
            generation: GenerationConfig::default(),
            providers: default_providers(),
            preferred: None,
        }
    }
}

/// Per-attempt timeouts, per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeoutConfig {
    /// Question answering (default: 20000).
    #[serde(default = "default_answer_ms")]
    pub answer_ms: u64,
    /// Note generation (default: 25000).
    #[serde(default = "default_notes_ms")]
    pub notes_ms: u64,
    /// Chapter summaries (default: 20000).
    #[serde(default = "default_answer_ms")]
    pub summary_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            answer_ms: default_answer_ms(),
            notes_ms: default_notes_ms(),
            summary_ms: default_answer_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn answer(&self) -> Duration {
        Duration::from_millis(self.answer_ms)
    }

    pub fn notes(&self) -> Duration {
        Duration::from_millis(self.notes_ms)
    }

    pub fn summary(&self) -> Duration {
        Duration::from_millis(self.summary_ms)
    }
}

fn default_answer_ms() -> u64 {
    20_000
}

fn default_notes_ms() -> u64 {
    25_000
}

/// Cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheSection {
    /// Entry lifetime in seconds (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Capacity per cache (default: 10000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl From<CacheSection> for CacheConfig {
    fn from(section: CacheSection) -> Self {
        CacheConfig::new()
            .ttl(Duration::from_secs(section.ttl_secs))
            .max_entries(section.max_entries)
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    10_000
}

/// Sampling parameters for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Sampling parameters per operation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_summary_params")]
    pub summary: GenerationParams,
    #[serde(default = "default_answer_params")]
    pub answer: GenerationParams,
    #[serde(default = "default_notes_params")]
    pub notes: GenerationParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            summary: default_summary_params(),
            answer: default_answer_params(),
            notes: default_notes_params(),
        }
    }
}

fn default_summary_params() -> GenerationParams {
    GenerationParams {
        temperature: 0.3,
        max_tokens: 800,
    }
}

fn default_answer_params() -> GenerationParams {
    GenerationParams {
        temperature: 0.7,
        max_tokens: 1000,
    }
}

fn default_notes_params() -> GenerationParams {
    GenerationParams {
        temperature: 0.7,
        max_tokens: 2000,
    }
}

/// One provider in the configured chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer key.
    pub api_key_env: String,
}

impl ProviderEntry {
    /// Resolve into a [`ProviderSpec`], reading the key from the environment.
    pub fn to_spec(&self) -> ProviderSpec {
        let api_key = std::env::var(&self.api_key_env).unwrap_or_default();
        ProviderSpec::new(&self.name, &self.base_url, api_key, &self.model)
    }
}

fn default_providers() -> Vec<ProviderEntry> {
    DEFAULT_CHAIN
        .iter()
        .map(|(name, base_url, model, env)| ProviderEntry {
            name: (*name).to_string(),
            base_url: (*base_url).to_string(),
            model: (*model).to_string(),
            api_key_env: (*env).to_string(),
        })
        .collect()
}

impl TutorConfig {
    /// Load configuration from the standard locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScholiaError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ScholiaError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(ScholiaError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".scholia").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/scholia/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(ScholiaError::Configuration(
                "providers list is empty".to_string(),
            ));
        }
        let t = &self.timeouts;
        if t.answer_ms == 0 || t.notes_ms == 0 || t.summary_ms == 0 {
            return Err(ScholiaError::Configuration(
                "timeouts must be positive".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ScholiaError::Configuration(
                "cache.max_entries must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Provider specs in chain order, keys resolved from the environment.
    pub fn provider_specs(&self) -> Vec<ProviderSpec> {
        self.providers.iter().map(ProviderEntry::to_spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = TutorConfig::default();
        assert_eq!(config.timeouts.answer(), Duration::from_secs(20));
        assert_eq!(config.timeouts.notes(), Duration::from_secs(25));
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.providers.len(), 9);
        assert!(config.preferred.is_none());
    }

    #[test]
    fn parse_minimal_config_keeps_defaults() {
        let toml = r#"
            [timeouts]
            answer_ms = 5000
        "#;
        let config: TutorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeouts.answer_ms, 5000);
        assert_eq!(config.timeouts.notes_ms, 25_000);
        assert_eq!(config.providers.len(), 9);
        assert_eq!(config.generation.notes.max_tokens, 2000);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            preferred = "local"

            [cache]
            ttl_secs = 60
            max_entries = 50

            [generation.answer]
            temperature = 0.2
            max_tokens = 300

            [[providers]]
            name = "local"
            base_url = "http://localhost:11434/v1"
            model = "llama3"
            api_key_env = "LOCAL_KEY"
        "#;
        let config: TutorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.preferred.as_deref(), Some("local"));
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].model, "llama3");
        assert_eq!(config.generation.answer.max_tokens, 300);
        assert_eq!(config.generation.summary.max_tokens, 800);

        let cache: CacheConfig = config.cache.into();
        assert_eq!(cache.ttl, Duration::from_secs(60));
        assert_eq!(cache.max_entries, 50);
    }

    #[test]
    fn missing_key_env_yields_empty_key() {
        let entry = ProviderEntry {
            name: "x".into(),
            base_url: "http://x".into(),
            model: "m".into(),
            api_key_env: "SCHOLIA_TEST_SURELY_UNSET_VAR".into(),
        };
        assert_eq!(entry.to_spec().endpoint.api_key, "");
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = TutorConfig::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn empty_provider_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "providers = []\n").unwrap();
        let err = TutorConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ScholiaError::Configuration(_)));
    }

    #[test]
    fn zero_cache_capacity_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cache]\nmax_entries = 0\n").unwrap();
        let err = TutorConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("max_entries"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[timeouts]\nnotes_ms = 0\n").unwrap();
        assert!(TutorConfig::load(Some(&path)).is_err());
    }
}
