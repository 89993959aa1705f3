use std::io::{self, Write};

use crate::client::DEFAULT_API_BASE;
use crate::config::Config;
use crate::error::{ReassignError, Result};
use crate::prompt;

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("gh-reassign configuration");
    println!("=========================\n");

    // Token is read without echo; create one at https://github.com/settings/tokens
    let token = prompt::read_token()?;

    print!("GitHub API base URL [{DEFAULT_API_BASE}]: ");
    io::stdout().flush()?;

    let mut api_base = String::new();
    io::stdin().read_line(&mut api_base)?;
    let api_base = api_base.trim();

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReassignError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let mut config_content = format!("token = \"{token}\"\n");
    if !api_base.is_empty() {
        config_content.push_str(&format!("api_base = \"{api_base}\"\n"));
    }

    std::fs::write(&config_path, config_content).map_err(|e| ReassignError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'gh-reassign reassign' and 'gh-reassign list-repos'.");

    Ok(())
}
