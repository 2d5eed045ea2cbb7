//! EduShare Rust SDK
//!
//! Async client library for the EduShare resource-sharing backend.
//!
//! # Example
//!
//! ```no_run
//! use edushare_sdk::{ConnectionCenter, EduShareClient};
//!
//! # async fn example() -> Result<(), edushare_sdk::SdkError> {
//! let mut client = EduShareClient::new("http://localhost:8000");
//! let session = client.login("alice", "secret").await?;
//!
//! let mut connections = ConnectionCenter::new(session.viewer());
//! connections.refresh(&client).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod connections;
mod error;
mod session;
mod types;

pub use client::{EduShareClient, ResourceQuery};
pub use connections::{ConnectionCenter, ConnectionEntry};
pub use error::SdkError;
pub use session::Session;
pub use types::{
    DownloadLink, DownloadRecord, FriendshipRecord, NewUser, ProfileUpdate, RatingRecord,
    ResourceRecord, ResourceUpdate, ResourceUpload, UserProfile,
};
