//! EduShare CLI - command-line client for the EduShare resource-sharing
//! platform.

use clap::Parser;
use edushare_cli::commands::dispatch;
use edushare_cli::{repl, Cli, Command, Config, Formatter, SessionStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so tables stay pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> edushare_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let store = SessionStore::new()?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &store, &formatter).await?;
        }
        Some(cmd) => {
            dispatch(cmd, &mut config, &store, &formatter).await?;
        }
    }

    Ok(())
}
