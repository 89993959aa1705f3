use serde::Serialize;
use tabled::Tabled;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::output;
use crate::types::RepoName;

#[derive(Serialize)]
struct RepoSummary {
    repository: RepoName,
    open_items: usize,
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Open items")]
    open_items: usize,
}

impl From<&RepoSummary> for RepoRow {
    fn from(summary: &RepoSummary) -> Self {
        Self {
            repository: summary.repository.to_string(),
            open_items: summary.open_items,
        }
    }
}

pub async fn list(client: &GitHubClient, user: &str) -> Result<()> {
    let repos = client.repos_with_open_assignments(user).await?;

    if repos.is_empty() {
        output::print_message(&format!("No open items assigned to {user}"));
        return Ok(());
    }

    let summaries: Vec<RepoSummary> = repos
        .into_iter()
        .map(|(repository, open_items)| RepoSummary {
            repository,
            open_items,
        })
        .collect();

    output::print_table(&summaries, |summary| RepoRow::from(summary));
    Ok(())
}
