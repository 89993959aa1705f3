//! Shared REST response types used across commands.

use serde::Deserialize;

/// One page of `/search/issues` results.
#[derive(Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// A single search result; only the owning repository matters here.
#[derive(Deserialize)]
pub struct SearchItem {
    pub repository_url: String,
}

/// Error payload GitHub attaches to non-2xx responses.
#[derive(Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
