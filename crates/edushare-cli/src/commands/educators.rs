//! Find-educators command: browse users annotated with relationship state.

use crate::cli::EducatorsArgs;
use crate::commands::connections::load_center;
use crate::error::Result;
use crate::output::Formatter;
use edushare_sdk::EduShareClient;

/// Execute the educators command.
pub async fn execute_educators(
    args: EducatorsArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let center = load_center(client).await?;
    let users = client.search_users(args.search.as_deref()).await?;

    let annotated: Vec<_> = users
        .into_iter()
        .map(|u| {
            let state = center.relationship(u.user_id());
            (u, state)
        })
        .collect();

    println!("{}", formatter.format_educators(&annotated)?);
    Ok(())
}
