//! Connection commands: the incoming/sent/connected lists plus the five
//! mutations (send/accept/reject/cancel/remove).

use crate::cli::{ConnectionTab, ConnectionsArgs, FriendshipIdArg, TargetUserArgs};
use crate::error::Result;
use crate::output::Formatter;
use edushare_domain::{FriendshipId, UserId};
use edushare_sdk::{ConnectionCenter, EduShareClient};

/// Build a refreshed connection center for the logged-in viewer.
pub async fn load_center(client: &EduShareClient) -> Result<ConnectionCenter> {
    let viewer = client
        .session()
        .ok_or(crate::error::CliError::NotLoggedIn)?
        .viewer();
    let mut center = ConnectionCenter::new(viewer);
    center.refresh(client).await?;
    Ok(center)
}

/// Execute the connections command.
pub async fn execute_connections(
    args: ConnectionsArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let center = load_center(client).await?;

    let show = |tab: ConnectionTab| -> Result<String> {
        match tab {
            ConnectionTab::Incoming => formatter.format_connections("Incoming requests", &center.incoming()),
            ConnectionTab::Sent => formatter.format_connections("Sent requests", &center.sent()),
            ConnectionTab::Connected => formatter.format_connections("Connected", &center.connected()),
        }
    };

    match args.tab {
        Some(tab) => println!("{}", show(tab)?),
        None => {
            println!("{}", show(ConnectionTab::Incoming)?);
            println!("{}", show(ConnectionTab::Sent)?);
            println!("{}", show(ConnectionTab::Connected)?);
        }
    }
    Ok(())
}

/// Execute the connect command: send a request.
pub async fn execute_connect(
    args: TargetUserArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let mut center = load_center(client).await?;
    let friendship = center.send(client, UserId::new(args.user_id)).await?;
    println!(
        "{}",
        formatter.success(&format!(
            "Request sent to user {} (request id {})",
            args.user_id, friendship.id
        ))
    );
    Ok(())
}

/// Execute the accept command.
pub async fn execute_accept(
    args: FriendshipIdArg,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let mut center = load_center(client).await?;
    center
        .accept(client, FriendshipId::new(args.request_id))
        .await?;
    println!(
        "{}",
        formatter.success(&format!("Request {} accepted", args.request_id))
    );
    Ok(())
}

/// Execute the reject command.
pub async fn execute_reject(
    args: FriendshipIdArg,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let mut center = load_center(client).await?;
    center
        .reject(client, FriendshipId::new(args.request_id))
        .await?;
    println!(
        "{}",
        formatter.success(&format!("Request {} rejected", args.request_id))
    );
    Ok(())
}

/// Execute the cancel command.
pub async fn execute_cancel(
    args: FriendshipIdArg,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let mut center = load_center(client).await?;
    center
        .cancel(client, FriendshipId::new(args.request_id))
        .await?;
    println!(
        "{}",
        formatter.success(&format!("Request {} cancelled", args.request_id))
    );
    Ok(())
}

/// Execute the remove command.
pub async fn execute_remove(
    args: FriendshipIdArg,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    let mut center = load_center(client).await?;
    center
        .remove(client, FriendshipId::new(args.request_id))
        .await?;
    println!(
        "{}",
        formatter.success(&format!("Connection {} removed", args.request_id))
    );
    Ok(())
}
