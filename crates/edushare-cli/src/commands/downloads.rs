//! Download history, saved resources and rating history commands.

use crate::cli::DownloadsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use edushare_sdk::EduShareClient;

/// Execute the downloads command.
pub async fn execute_downloads(
    args: DownloadsArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    if args.clear {
        client.clear_download_history().await?;
        println!("{}", formatter.success("Download history cleared"));
        return Ok(());
    }

    if let Some(id) = args.delete {
        client.delete_download(id).await?;
        println!("{}", formatter.success(&format!("Download record {} deleted", id)));
        return Ok(());
    }

    let viewer = client.session().ok_or(CliError::NotLoggedIn)?.viewer();
    let downloads = client.user_downloads(viewer).await?;
    println!("{}", formatter.format_downloads(&downloads)?);
    Ok(())
}

/// Execute the saved command: the viewer's bookmarked resources.
pub async fn execute_saved(client: &EduShareClient, formatter: &Formatter) -> Result<()> {
    let viewer = client.session().ok_or(CliError::NotLoggedIn)?.viewer();
    let saved = client.user_saved_resources(viewer).await?;
    println!("{}", formatter.format_resources(&saved)?);
    Ok(())
}

/// Execute the ratings command: ratings the viewer has given.
pub async fn execute_my_ratings(client: &EduShareClient, formatter: &Formatter) -> Result<()> {
    let viewer = client.session().ok_or(CliError::NotLoggedIn)?.viewer();
    let ratings = client.user_ratings(viewer).await?;
    println!("{}", formatter.format_ratings(&ratings)?);
    Ok(())
}
