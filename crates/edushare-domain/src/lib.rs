//! EduShare Domain Layer
//!
//! Core relationship model for the EduShare client. This crate has zero
//! external dependencies and holds everything that can be computed without
//! touching the network:
//!
//! - **Friendship**: the backend's directed connection record
//!   (requester → addressee) with its two-state lifecycle
//! - **RelationshipState**: the derived viewer-relative classification of a
//!   target user (self / none / connected / pending-sent / pending-received)
//! - **ConnectionPartition**: the incoming / sent / connected list split,
//!   plus the optimistic mutation table applied after successful backend
//!   calls
//! - **FetchSequence**: monotonic request tokens that let callers discard
//!   stale responses from overlapping refreshes
//!
//! All operations here are synchronous and side-effect free; the SDK layer
//! owns HTTP and logging.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fetch;
pub mod friendship;
pub mod ids;
pub mod partition;
pub mod relationship;

// Re-exports for convenience
pub use fetch::{FetchSequence, FetchToken};
pub use friendship::{Friendship, FriendshipStatus};
pub use ids::{FriendshipId, ResourceId, UserId};
pub use partition::{partition, ConnectionAction, ConnectionPartition};
pub use relationship::{duplicate_pairs, resolve, RelationshipState};
