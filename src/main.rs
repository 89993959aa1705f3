mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod prompt;
mod responses;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::GitHubClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config or a token
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gh-reassign", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that talk to the API
        command => {
            let config = Config::load()?;
            let token = match config.token() {
                Some(token) => token,
                None => prompt::read_token()?,
            };
            let client = GitHubClient::new(token, config.api_base());

            match command {
                Commands::Reassign(args) => {
                    commands::reassign::run(&client, args).await?;
                }
                Commands::ListRepos { user } => {
                    commands::repos::list(&client, &user).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
