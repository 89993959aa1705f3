use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::client::DEFAULT_API_BASE;
use crate::error::{ReassignError, Result};

#[derive(Deserialize, Default)]
pub struct Config {
    pub token: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ReassignError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| ReassignError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "gh-reassign")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ReassignError::NoConfigDir)
    }

    /// Get the token with the env var taking precedence over the config file.
    /// `None` means the caller has to prompt.
    pub fn token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.token.clone())
    }

    /// API base URL, configurable for GitHub Enterprise installations.
    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config =
            toml::from_str("token = \"ghp_abc\"\napi_base = \"https://github.example.com/api/v3\"")
                .unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
        assert_eq!(
            config.api_base(),
            "https://github.example.com/api/v3".to_string()
        );
    }

    #[test]
    fn test_api_base_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
    }
}
