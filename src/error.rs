use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReassignError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN, add token to ~/.config/gh-reassign/config.toml, or run interactively to be prompted"
    )]
    MissingToken,

    #[error("Invalid repository \"{0}\": expected owner/name")]
    InvalidRepo(String),
}

pub type Result<T> = std::result::Result<T, ReassignError>;
