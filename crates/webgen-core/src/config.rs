use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, WebgenError};

/// Environment variable that overrides `api_keys.gemini`.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Value shipped in sample env files; treated the same as an empty key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY_HERE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebgenConfig {
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    #[serde(default)]
    pub gemini: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Stylesheet linked (not bundled) into synthesized previews.
    #[serde(default = "default_css_framework_url")]
    pub css_framework_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Parent directory for exported projects. Empty means the current directory.
    #[serde(default)]
    pub directory: String,

    #[serde(default = "default_project_name")]
    pub project_name: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_timeout() -> u64 {
    120
}
pub fn default_css_framework_url() -> String {
    "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css".to_string()
}
fn default_project_name() -> String {
    "ai-generated-project".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            css_framework_url: default_css_framework_url(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            project_name: default_project_name(),
        }
    }
}

impl WebgenConfig {
    /// Load config from ~/.config/webgen/config.toml, creating defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, writing defaults there if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| WebgenError::Config(format!("Failed to read config: {e}")))?;
            let config: WebgenConfig = toml::from_str(&contents)
                .map_err(|e| WebgenError::Config(format!("Failed to parse config: {e}")))?;
            Ok(config)
        } else {
            let config = WebgenConfig::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| WebgenError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WebgenError::Config("Could not determine config directory".into()))?;
        Ok(config_dir.join("webgen").join("config.toml"))
    }

    /// The Gemini API key, preferring the environment over the config file.
    ///
    /// Fails when neither source holds a usable key.
    pub fn api_key(&self) -> Result<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        resolve_api_key(from_env.as_deref(), &self.api_keys.gemini)
    }

    /// Directory exported projects are written under.
    pub fn export_dir(&self) -> Result<PathBuf> {
        if self.export.directory.is_empty() {
            Ok(std::env::current_dir()?)
        } else {
            Ok(PathBuf::from(&self.export.directory))
        }
    }
}

fn resolve_api_key(from_env: Option<&str>, from_file: &str) -> Result<String> {
    let usable = |key: &str| !key.trim().is_empty() && key.trim() != API_KEY_PLACEHOLDER;

    match from_env {
        Some(key) if usable(key) => Ok(key.trim().to_string()),
        _ if usable(from_file) => Ok(from_file.trim().to_string()),
        _ => Err(WebgenError::Config(format!(
            "Gemini API key is not configured. Set {API_KEY_ENV} or api_keys.gemini in the config file"
        ))),
    }
}
