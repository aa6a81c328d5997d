use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

pub const NOEMBED_URL: &str = "https://noembed.com";
pub const YOUTUBE_URL: &str = "https://www.youtube.com";
pub const OPENAI_URL: &str = "https://api.openai.com";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub endpoints: Endpoints,
}

/// Base URLs of the services the pipeline talks to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Endpoints {
    pub noembed: String,
    pub youtube: String,
    pub openai: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            noembed: NOEMBED_URL.to_string(),
            youtube: YOUTUBE_URL.to_string(),
            openai: OPENAI_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at the same base URL
    pub fn all(base: &str) -> Self {
        Endpoints {
            noembed: base.to_string(),
            youtube: base.to_string(),
            openai: base.to_string(),
        }
    }
}

impl Config {
    /// Load config from ~/.config/ytsum/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}
