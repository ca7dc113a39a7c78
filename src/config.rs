//! Renoplan configuration types and loading

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main renoplan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generative model provider configuration
    pub llm: LlmConfig,

    /// Rendering workflow defaults
    pub render: RenderConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages
    /// instead of failing on the first model call.
    pub fn validate(&self) -> Result<()> {
        if self.llm.get_api_key().is_err() {
            return Err(eyre::eyre!(
                "Model API key not found. Set the {} (or {}) environment variable.",
                self.llm.api_key_env,
                self.llm.api_key_fallback_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `.renoplan.yml` in the working directory, then
    /// `~/.config/renoplan/renoplan.yml`, then built-in defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".renoplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("renoplan").join("renoplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Generative model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model used for advisory chat turns
    #[serde(rename = "advisory-model")]
    pub advisory_model: String,

    /// Model used for rendering create/edit instructions
    #[serde(rename = "rendering-model")]
    pub rendering_model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Fallback environment variable checked when the primary is unset
    #[serde(rename = "api-key-fallback-env")]
    pub api_key_fallback_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-output-tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature for advisory turns
    pub temperature: f32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the primary env var, then the fallback
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .or_else(|_| std::env::var(&self.api_key_fallback_env))
            .map_err(|_| {
                eyre::eyre!(
                    "Neither {} nor {} is set",
                    self.api_key_env,
                    self.api_key_fallback_env
                )
            })
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            advisory_model: "gemini-1.5-flash".to_string(),
            rendering_model: "gemini-1.5-pro".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key_fallback_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: 2048,
            temperature: 0.7,
            timeout_ms: 120_000,
        }
    }
}

/// Rendering workflow defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Aspect ratio used when the user does not specify one
    #[serde(rename = "aspect-ratio")]
    pub aspect_ratio: String,

    /// Asset name used when the user does not name the rendering
    #[serde(rename = "default-asset-name")]
    pub default_asset_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
            default_asset_name: "renovation_rendering".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.advisory_model, "gemini-1.5-flash");
        assert_eq!(config.llm.rendering_model, "gemini-1.5-pro");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.llm.api_key_fallback_env, "GOOGLE_API_KEY");
        assert_eq!(config.llm.max_output_tokens, 2048);
        assert_eq!(config.render.aspect_ratio, "16:9");
        assert_eq!(config.render.default_asset_name, "renovation_rendering");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  advisory-model: gemini-exp\n  timeout-ms: 5000\nrender:\n  aspect-ratio: \"4:3\""
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.advisory_model, "gemini-exp");
        assert_eq!(config.llm.timeout_ms, 5000);
        // Unset fields keep defaults
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.render.aspect_ratio, "4:3");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let missing = PathBuf::from("/nonexistent/renoplan.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
