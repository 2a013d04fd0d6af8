use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Result;

/// Environment variables checked for the Gemini API key, in order.
/// The key never lives in the config file.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini model settings
    pub gemini: GeminiConfig,

    /// Application settings
    pub app: AppConfig,

    /// API key resolved from the environment at load time
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name passed to the generateContent endpoint
    pub model: String,

    /// Total generation attempts before giving up
    pub retries: u32,

    /// Seconds to wait between failed attempts
    pub delay_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where posts are saved (current directory if unset)
    pub output_dir: Option<PathBuf>,

    /// Preferred transcript languages, tried in order
    pub languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                model: "gemini-1.5-flash".to_string(),
                retries: 3,
                delay_seconds: 5,
            },
            app: AppConfig {
                output_dir: None,
                languages: vec!["en".to_string()],
            },
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from file (creating a default one if absent) and
    /// resolve the API key from the environment.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            config.validate()?;
            config
        } else {
            let config = Self::default();
            config.save().await?;
            config
        };

        config.api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty());

        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("postscribe").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.gemini.model.is_empty() {
            anyhow::bail!("Gemini model name must be configured");
        }

        if self.gemini.retries == 0 {
            anyhow::bail!("retries must be at least 1");
        }

        Ok(())
    }

    /// The API key, or an error telling the user how to set one. Called
    /// before any request handling so a missing key halts up front.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Set the GEMINI_API_KEY (or GOOGLE_API_KEY) \
                 environment variable."
            )
        })
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Model: {}", self.gemini.model);
        println!("  Retries: {}", self.gemini.retries);
        println!("  Retry Delay: {}s", self.gemini.delay_seconds);
        println!("  Languages: {}", self.app.languages.join(", "));
        if let Some(dir) = &self.app.output_dir {
            println!("  Output Dir: {}", dir.display());
        }
        println!(
            "  API Key: {}",
            if self.api_key.is_some() {
                "set (from environment)"
            } else {
                "NOT SET"
            }
        );
    }
}
