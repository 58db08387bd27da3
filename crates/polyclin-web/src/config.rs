//! Configuration loading for Polyclin.
//! Reads polyclin.toml from the current directory or path in POLYCLIN_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the classifier artifacts, one per workflow.
    #[serde(default = "default_models_dir")]
    pub dir: String,
}

fn default_models_dir() -> String { "models".to_string() }

impl Default for ModelsConfig {
    fn default() -> Self {
        Self { dir: default_models_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Inline key; leave empty to use POLYCLIN_GEMINI_API_KEY instead.
    #[serde(default)]
    pub api_key: String,
}

fn default_llm_model() -> String { "gemini-pro".to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self { model: default_llm_model(), api_key: String::new() }
    }
}

impl Config {
    /// Load configuration from polyclin.toml.
    /// Checks POLYCLIN_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("POLYCLIN_CONFIG")
            .unwrap_or_else(|_| "polyclin.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy polyclin.example.toml to polyclin.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the Gemini API credential. Absence is a fatal startup
    /// condition: the process must not begin serving without it.
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        if !self.llm.api_key.is_empty() {
            return Ok(self.llm.api_key.clone());
        }
        match std::env::var("POLYCLIN_GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!(
                "Gemini API key not found. Set llm.api_key in polyclin.toml \
                 or the POLYCLIN_GEMINI_API_KEY environment variable."
            ),
        }
    }
}
