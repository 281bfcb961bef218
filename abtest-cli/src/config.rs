//! CLI configuration management

use abtest_core::{
    parse_confidence_level, validate_confidence_level, HypothesisType, DEFAULT_CONFIDENCE_LEVEL,
};
use abtest_metrics::{GeneratorPolicy, DEFAULT_HISTOGRAM_BINS};
use anyhow::{bail, Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "ABTEST";

/// Keys accepted by `config set`
pub const KEYS: &[&str] = &[
    "confidence_level",
    "hypothesis_type",
    "sample_size",
    "min_sample_size",
    "policy",
    "bins",
    "output_format",
    "color",
];

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Default confidence level for tests, a fraction or a percentage
    #[serde(deserialize_with = "deserialize_confidence_level")]
    pub confidence_level: f64,

    /// Default hypothesis type
    pub hypothesis_type: HypothesisType,

    /// Default per-group size of generated datasets
    pub sample_size: usize,

    /// Smallest per-group size accepted for generated datasets
    pub min_sample_size: usize,

    /// Default generator policy
    pub policy: GeneratorPolicy,

    /// Histogram bins for distribution output
    pub bins: usize,

    /// Default output format
    pub output_format: OutputFormat,

    /// Enable colored output
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            hypothesis_type: HypothesisType::TwoTailed,
            sample_size: 1000,
            min_sample_size: 100,
            policy: GeneratorPolicy::Randomized,
            bins: DEFAULT_HISTOGRAM_BINS,
            output_format: OutputFormat::Table,
            color: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path` (or the default location), layered
    /// with `ABTEST_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let loaded = ConfigLoader::builder()
            .add_source(File::from(path.clone()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: CliConfig = loaded
            .try_deserialize()
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "abtest", "abtest")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        validate_confidence_level(self.confidence_level)?;
        if self.bins == 0 {
            bail!("bins must be at least 1");
        }
        if self.min_sample_size == 0 {
            bail!("min_sample_size must be at least 1");
        }
        Ok(())
    }

    /// Set a value by key, parsing it for the key's type
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "confidence_level" => self.confidence_level = parse_confidence_level(value)?,
            "hypothesis_type" => self.hypothesis_type = value.parse()?,
            "sample_size" => {
                self.sample_size = value.parse().context("sample_size must be an integer")?;
            }
            "min_sample_size" => {
                self.min_sample_size =
                    value.parse().context("min_sample_size must be an integer")?;
            }
            "policy" => self.policy = value.parse()?,
            "bins" => self.bins = value.parse().context("bins must be an integer")?,
            "output_format" => {
                self.output_format =
                    OutputFormat::try_from(value.to_string()).map_err(anyhow::Error::msg)?;
            }
            "color" => self.color = value.parse().context("color must be true or false")?,
            other => bail!("Unknown configuration key '{}'. Known keys: {}", other, KEYS.join(", ")),
        }
        self.validate()
    }

    /// Get a value by key as display text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "confidence_level" => self.confidence_level.to_string(),
            "hypothesis_type" => self.hypothesis_type.to_string(),
            "sample_size" => self.sample_size.to_string(),
            "min_sample_size" => self.min_sample_size.to_string(),
            "policy" => self.policy.to_string(),
            "bins" => self.bins.to_string(),
            "output_format" => self.output_format.to_string(),
            "color" => self.color.to_string(),
            other => bail!("Unknown configuration key '{}'. Known keys: {}", other, KEYS.join(", ")),
        };
        Ok(value)
    }
}

/// Numbers pass through; text such as `95%` (typical of environment
/// variables) goes through the same parser as `config set`.
fn deserialize_confidence_level<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLevel {
        Number(f64),
        Text(String),
    }

    match RawLevel::deserialize(deserializer)? {
        RawLevel::Number(level) => Ok(level),
        RawLevel::Text(text) => parse_confidence_level(&text).map_err(serde::de::Error::custom),
    }
}
