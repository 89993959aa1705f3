use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// An open issue or pull request as returned by the repository issues
/// endpoint. The REST surface interleaves pull requests with issues; the
/// `pull_request` marker tells them apart.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub assignees: Vec<User>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PullRequestRef {
    pub url: String,
}

impl Issue {
    pub fn kind(&self) -> &'static str {
        if self.pull_request.is_some() {
            "PR"
        } else {
            "issue"
        }
    }
}
