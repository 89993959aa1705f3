use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use crate::cli::ReassignArgs;
use crate::client::GitHubClient;
use crate::error::Result;
use crate::output;
use crate::prompt;
use crate::types::{Issue, RepoName};

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: u64,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Assignees")]
    assignees: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            kind: issue.kind(),
            title: output::truncate(&issue.title, 50),
            assignees: issue
                .assignees
                .iter()
                .map(|u| u.login.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            updated: output::format_relative(&issue.updated_at),
        }
    }
}

pub async fn run(client: &GitHubClient, args: ReassignArgs) -> Result<()> {
    let repos: Vec<RepoName> = match args.repo {
        Some(ref repo) => vec![repo.clone()],
        None => client
            .repos_with_open_assignments(&args.from_user)
            .await?
            .into_keys()
            .collect(),
    };

    for repo in &repos {
        let issues = client.open_issues_assigned(repo, &args.from_user).await?;
        if issues.is_empty() {
            continue;
        }

        if !output::is_json_output() {
            println!(
                "{repo}: {} open item{} assigned to {}",
                issues.len(),
                if issues.len() == 1 { "" } else { "s" },
                args.from_user
            );
            output::print_table(&issues, |issue| IssueRow::from(issue));
        }

        for issue in issues {
            reassign_one(client, repo, &issue, &args).await?;
        }
    }

    Ok(())
}

async fn reassign_one(
    client: &GitHubClient,
    repo: &RepoName,
    issue: &Issue,
    args: &ReassignArgs,
) -> Result<()> {
    if args.dry_run {
        let body = json!({ "assignees": [args.to_user] });
        output::print_message(&format!(
            "Would send PATCH {} with body {body}",
            client.issue_url(repo, issue.number)
        ));
        return Ok(());
    }

    ensure_collaborator(client, repo, &args.to_user).await?;

    match client
        .set_assignees(repo, issue.number, &[&args.to_user])
        .await
    {
        Ok(()) => {
            let message = format!(
                "Reassigned {} #{} in {repo} to {}",
                issue.kind(),
                issue.number,
                args.to_user
            );
            if output::is_json_output() {
                output::print_message(&message);
            } else {
                println!("{}", message.green());
            }
        }
        // Keep going; one rejected item must not stop the rest of the run.
        Err(e) => {
            let message = format!(
                "Failed to reassign {} #{} in {repo}: {e}",
                issue.kind(),
                issue.number
            );
            if output::is_json_output() {
                output::print_error(&message);
            } else {
                eprintln!("{}", message.red());
            }
        }
    }

    Ok(())
}

/// Gate mutation on the target having access to the repository. When the
/// probe fails, instruct the operator to invite the user and wait until the
/// invitation has been accepted.
async fn ensure_collaborator(client: &GitHubClient, repo: &RepoName, user: &str) -> Result<()> {
    if client.is_collaborator(repo, user).await? {
        return Ok(());
    }

    #[cfg(feature = "auto-invite")]
    if client.invite_collaborator(repo, user).await? {
        output::print_message(&format!("Sent {user} a write invitation for {repo}"));
        return prompt::pause(&format!(
            "Press Enter once {user} has accepted the invitation at https://github.com/{repo}/invitations ..."
        ));
    }

    let instruction = format!(
        "{user} is not a collaborator on {repo}; invite them at https://github.com/{repo}/settings/access"
    );
    if output::is_json_output() {
        output::print_message(&instruction);
    } else {
        println!("{}", instruction.yellow());
    }
    prompt::pause(&format!(
        "Press Enter once {user} has accepted the invitation at https://github.com/{repo}/invitations ..."
    ))
}
