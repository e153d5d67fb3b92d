use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use an_core::CommentStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_VERSION: &str = "1.0.0";
const HOME_ENV: &str = "ANNOTR_HOME";

/// Persistent settings, stored as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub version: String,
    /// API keys by provider name.
    pub api_keys: BTreeMap<String, String>,
    pub default_provider: String,
    pub default_model: String,
    pub comment_style: CommentStyle,
    pub context_lines: usize,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            api_keys: BTreeMap::new(),
            default_provider: "ollama".to_string(),
            default_model: "qwen2.5-coder:1.5b".to_string(),
            comment_style: CommentStyle::Line,
            context_lines: 5,
            max_tokens: 256,
            endpoint: None,
        }
    }
}

/// `$ANNOTR_HOME`, or `~/.annotr`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".annotr"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

impl Config {
    /// Load the user's configuration; `None` when none has been written yet.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        let config = serde_json::from_str(&data).with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}
