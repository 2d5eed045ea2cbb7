//! Command implementations.

pub mod auth;
pub mod connections;
pub mod dashboard;
pub mod downloads;
pub mod educators;
pub mod feedback;
pub mod profile;
pub mod profiles;
pub mod resources;

pub use self::auth::{execute_login, execute_logout, execute_register, execute_whoami};
pub use self::connections::{
    execute_accept, execute_cancel, execute_connect, execute_connections, execute_reject,
    execute_remove,
};
pub use self::dashboard::execute_dashboard;
pub use self::downloads::{execute_downloads, execute_my_ratings, execute_saved};
pub use self::educators::execute_educators;
pub use self::feedback::execute_feedback;
pub use self::profile::{execute_profile, execute_settings};
pub use self::profiles::execute_config;
pub use self::resources::execute_resources;

use crate::cli::Command;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session_store::SessionStore;
use edushare_sdk::EduShareClient;

/// Execute one parsed command. Shared by the binary and the REPL.
pub async fn dispatch(
    cmd: Command,
    config: &mut Config,
    store: &SessionStore,
    formatter: &Formatter,
) -> Result<()> {
    tracing::debug!(command = ?cmd, "executing");

    match cmd {
        Command::Login(args) => {
            execute_login(args, &config.api_url()?, store, formatter).await
        }
        Command::Logout => execute_logout(store, formatter),
        Command::Whoami => execute_whoami(store, formatter),
        Command::Register(args) => execute_register(args, &config.api_url()?, formatter).await,
        Command::Config(args) => execute_config(args, config, formatter),
        Command::Repl => Err(CliError::InvalidInput(
            "Already in interactive mode".to_string(),
        )),

        // Everything else needs a session-bearing client.
        cmd => {
            let session = store.require()?;
            let client = EduShareClient::with_session(&config.api_url()?, session);

            match cmd {
                Command::Connections(args) => {
                    execute_connections(args, &client, formatter).await
                }
                Command::Connect(args) => execute_connect(args, &client, formatter).await,
                Command::Accept(args) => execute_accept(args, &client, formatter).await,
                Command::Reject(args) => execute_reject(args, &client, formatter).await,
                Command::Cancel(args) => execute_cancel(args, &client, formatter).await,
                Command::Remove(args) => execute_remove(args, &client, formatter).await,
                Command::Educators(args) => execute_educators(args, &client, formatter).await,
                Command::Profile(args) => execute_profile(args, &client, formatter).await,
                Command::Settings(args) => execute_settings(args, &client, formatter).await,
                Command::Resources(args) => execute_resources(args, &client, formatter).await,
                Command::Downloads(args) => execute_downloads(args, &client, formatter).await,
                Command::Saved => execute_saved(&client, formatter).await,
                Command::Ratings => execute_my_ratings(&client, formatter).await,
                Command::Feedback => execute_feedback(&client, formatter).await,
                Command::Dashboard => execute_dashboard(&client, formatter).await,
                _ => unreachable!(),
            }
        }
    }
}
