use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DEFAULT_TEMPERATURE: f32 = 1.3;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_STORE_PATH: &str = "summary.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Missing required option: {0}")]
    Missing(&'static str),
    #[error("Temperature must be a finite number, got {0}")]
    InvalidTemperature(f32),
}

/// Options of the summary generator, as found in the site configuration.
///
/// Unknown keys are ignored; every known key falls back to its default,
/// whether it is absent or left blank (`null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub enable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "temperature_or_default")]
    pub temperature: f32,
    #[serde(alias = "initalPrompt", deserialize_with = "null_as_default")]
    pub initial_prompt: String,
    /// `0` means the default, like a blank value.
    #[serde(deserialize_with = "concurrency_or_default")]
    pub concurrency: usize,
    #[serde(deserialize_with = "store_path_or_default")]
    pub store_path: PathBuf,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn temperature_or_default<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(DEFAULT_TEMPERATURE))
}

fn concurrency_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<usize>::deserialize(deserializer)?
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_CONCURRENCY))
}

fn store_path_or_default<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PathBuf>::deserialize(deserializer)?
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)))
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enable: false,
            api_key: String::new(),
            api_url: String::new(),
            model: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            initial_prompt: String::new(),
            concurrency: DEFAULT_CONCURRENCY,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl SummaryConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(f)?)
    }

    /// Checks the options the batch relies on. The credential may be empty
    /// (some local endpoints accept anonymous requests).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Missing("apiUrl"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Missing("model"));
        }
        if !self.temperature.is_finite() {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    /// Remote calls allowed in flight at once; `0` falls back to
    /// [`DEFAULT_CONCURRENCY`].
    pub fn effective_concurrency(&self) -> usize {
        if self.concurrency == 0 {
            DEFAULT_CONCURRENCY
        } else {
            self.concurrency
        }
    }

    pub fn prompt(&self) -> PromptConfig {
        PromptConfig {
            endpoint: self.api_url.clone(),
            credential: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: self.initial_prompt.clone(),
        }
    }
}

/// Everything the remote generator needs besides the page content.
/// Passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub endpoint: String,
    pub credential: String,
    pub model: String,
    pub temperature: f32,
    pub system_prompt: String,
}
