//! Login, logout, whoami and register commands.

use crate::cli::{LoginArgs, RegisterArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session_store::SessionStore;
use edushare_sdk::{EduShareClient, NewUser};

/// Execute the login command: authenticate and persist the session.
pub async fn execute_login(
    args: LoginArgs,
    api_url: &str,
    store: &SessionStore,
    formatter: &Formatter,
) -> Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => prompt(&format!("Password for {}: ", args.username))?,
    };

    let mut client = EduShareClient::new(api_url);
    let session = client.login(&args.username, &password).await?;
    store.save(&session)?;

    println!(
        "{}",
        formatter.success(&format!("Logged in as {} (id {})", session.username, session.user_id))
    );
    Ok(())
}

/// Execute the logout command: drop the persisted session.
pub fn execute_logout(store: &SessionStore, formatter: &Formatter) -> Result<()> {
    store.clear()?;
    println!("{}", formatter.success("Logged out"));
    Ok(())
}

/// Execute the whoami command.
pub fn execute_whoami(store: &SessionStore, formatter: &Formatter) -> Result<()> {
    let session = store.require()?;
    println!(
        "{}",
        formatter.info(&format!("{} (id {})", session.username, session.user_id))
    );
    Ok(())
}

/// Execute the register command: create an account (does not log in).
pub async fn execute_register(
    args: RegisterArgs,
    api_url: &str,
    formatter: &Formatter,
) -> Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => prompt(&format!("Password for {}: ", args.username))?,
    };

    let client = EduShareClient::new(api_url);
    let new_user = NewUser {
        username: args.username,
        email: args.email,
        password,
        institution: args.institution,
        bio: args.bio,
        is_private: args.private.then_some(true),
    };

    let profile = client.register(&new_user).await?;
    println!(
        "{}",
        formatter.success(&format!(
            "Account '{}' created (id {}). Log in with 'edushare login {}'.",
            profile.username, profile.id, profile.username
        ))
    );
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut editor = rustyline::DefaultEditor::new()
        .map_err(|e| CliError::InvalidInput(format!("Cannot read input: {}", e)))?;
    let line = editor
        .readline(message)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read input: {}", e)))?;
    Ok(line.trim().to_string())
}
