//! Profile view and settings commands.

use crate::cli::{ProfileArgs, SettingsArgs};
use crate::commands::connections::load_center;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use edushare_domain::UserId;
use edushare_sdk::{EduShareClient, ProfileUpdate};

/// Execute the profile command: user card plus their uploads.
pub async fn execute_profile(
    args: ProfileArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let session = client.session().ok_or(CliError::NotLoggedIn)?;
    let target = UserId::new(args.user_id.unwrap_or(session.user_id));

    let profile = client.get_user(target).await?;

    let state = if target == session.viewer() {
        None
    } else {
        let center = load_center(client).await?;
        Some(center.relationship(target))
    };

    println!("{}", formatter.format_profile(&profile, state)?);

    // A private profile's resources come back 403 for strangers; surface
    // that as a note rather than a failure of the whole page.
    match client.user_resources(target).await {
        Ok(resources) => println!("{}", formatter.format_resources(&resources)?),
        Err(e) => println!("{}", formatter.warning(&e.to_string())),
    }
    Ok(())
}

/// Execute the settings command: patch your own profile.
pub async fn execute_settings(
    args: SettingsArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let session = client.session().ok_or(CliError::NotLoggedIn)?;

    let is_private = if args.private {
        Some(true)
    } else if args.public {
        Some(false)
    } else {
        None
    };

    let update = ProfileUpdate {
        institution: args.institution,
        bio: args.bio,
        is_private,
    };

    let profile = client.update_profile(session.viewer(), &update).await?;
    println!("{}", formatter.success("Profile updated"));
    println!("{}", formatter.format_profile(&profile, None)?);
    Ok(())
}
