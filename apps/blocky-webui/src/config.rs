use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebuiConfig {
    /// Service root of the blocky API; `all` and `search` resolve against it.
    pub api_url: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_listen_port() -> u16 {
    8080
}

fn default_title() -> String {
    "Blocky/4".to_string()
}

impl WebuiConfig {
    pub fn load() -> Result<Self> {
        // Try to load from /etc/blocky/webui.toml first
        let config_paths = vec!["/etc/blocky/webui.toml", "./webui.toml"];

        for path in config_paths {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                return Self::from_toml(&contents).with_context(|| format!("invalid config in {}", path));
            }
        }

        // Fallback to environment variables
        tracing::info!("Loading config from environment");
        Ok(Self {
            api_url: std::env::var("BLOCKY_API_URL").context("BLOCKY_API_URL is not set")?,
            listen_port: std::env::var("LISTEN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_listen_port),
            title: std::env::var("WEBUI_TITLE").unwrap_or_else(|_| default_title()),
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_fills_defaults() {
        let config = WebuiConfig::from_toml(r#"api_url = "http://127.0.0.1:8000/api/""#).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8000/api/");
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.title, "Blocky/4");
    }

    #[test]
    fn toml_config_requires_api_url() {
        assert!(WebuiConfig::from_toml("listen_port = 9000").is_err());
    }
}
