//! Interactive terminal prompts.

use std::io::{self, IsTerminal, Write};

use crate::error::{ReassignError, Result};

/// Read the GitHub personal access token without echoing it.
pub fn read_token() -> Result<String> {
    if !io::stdin().is_terminal() {
        return Err(ReassignError::MissingToken);
    }

    let token = rpassword::prompt_password("GitHub personal access token: ")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(ReassignError::MissingToken);
    }
    Ok(token)
}

/// Print `message` and block until the operator presses Enter.
///
/// When stdin is not a terminal there is no operator to wait for; the message
/// is still printed and the call returns immediately so piped runs cannot
/// hang.
pub fn pause(message: &str) -> Result<()> {
    println!("{message}");

    if !io::stdin().is_terminal() {
        return Ok(());
    }

    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
