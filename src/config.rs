use crate::error::{ArborError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hard cap on images per classifier request.
pub const MAX_IMAGES_PER_REQUEST: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub max_images: usize,
    pub timeout_seconds: u64,
    pub smtp_host: String,
    pub smtp_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o".into(),
            max_images: MAX_IMAGES_PER_REQUEST,
            timeout_seconds: 120,
            smtp_host: "smtp.gmail.com".into(),
            smtp_user: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ArborError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("arbor-inspect").join("config.json"))
    }

    /// Classifier credential: the saved secret wins, the process environment
    /// is the fallback.
    pub fn get_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var("OPENAI_API_KEY").map_err(|_| ArborError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
