use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::types::RepoName;

#[derive(Parser)]
#[command(name = "gh-reassign")]
#[command(about = "Reassign open GitHub issues and pull requests between users", version)]
#[command(after_help = "EXAMPLES:
    gh-reassign reassign --from-user alice --to-user bob    Move all of alice's open items to bob
    gh-reassign reassign --from-user alice --to-user bob -n Dry run, print what would change
    gh-reassign list-repos alice                            Repositories with items assigned to alice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show the full error chain on failure
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reassign open issues and PRs from one user to another
    #[command(after_help = "EXAMPLES:
    gh-reassign reassign --from-user alice --to-user bob
    gh-reassign reassign --from-user alice --to-user bob --dry-run
    gh-reassign reassign --from-user alice --to-user bob --repo acme/widgets")]
    Reassign(ReassignArgs),
    /// List repositories containing open items assigned to a user
    #[command(after_help = "EXAMPLES:
    gh-reassign list-repos alice
    gh-reassign list-repos alice --json")]
    ListRepos {
        /// GitHub username
        user: String,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    gh-reassign completions bash > ~/.bash_completion.d/gh-reassign
    gh-reassign completions zsh > ~/.zfunc/_gh-reassign
    gh-reassign completions fish > ~/.config/fish/completions/gh-reassign.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    gh-reassign init")]
    Init,
}

#[derive(Args)]
pub struct ReassignArgs {
    /// Username currently holding the assignments
    #[arg(long)]
    pub from_user: String,

    /// Username to hand the assignments to
    #[arg(long)]
    pub to_user: String,

    /// Do not modify anything, just show what would be done
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Only work on a single repository (owner/name)
    #[arg(long)]
    pub repo: Option<RepoName>,
}
