//! Dashboard command: overview of the viewer's activity.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use edushare_sdk::EduShareClient;

/// Execute the dashboard command.
pub async fn execute_dashboard(client: &EduShareClient, formatter: &Formatter) -> Result<()> {
    let viewer = client.session().ok_or(CliError::NotLoggedIn)?.viewer();

    // Each fetch fails independently; one failing leg should not blank the
    // whole overview.
    let profile = client.get_user(viewer).await?;
    println!("{}", formatter.format_profile(&profile, None)?);

    match client.user_resources(viewer).await {
        Ok(resources) => {
            println!("{}", formatter.info(&format!("Your uploads ({})", resources.len())));
            println!("{}", formatter.format_resources(&resources)?);
        }
        Err(e) => println!("{}", formatter.warning(&e.to_string())),
    }

    match client.user_downloads(viewer).await {
        Ok(downloads) => {
            println!("{}", formatter.info(&format!("Recent downloads ({})", downloads.len())));
            println!("{}", formatter.format_downloads(&downloads)?);
        }
        Err(e) => println!("{}", formatter.warning(&e.to_string())),
    }

    match client.user_ratings(viewer).await {
        Ok(ratings) => {
            println!("{}", formatter.info(&format!("Ratings you gave ({})", ratings.len())));
            println!("{}", formatter.format_ratings(&ratings)?);
        }
        Err(e) => println!("{}", formatter.warning(&e.to_string())),
    }

    Ok(())
}
