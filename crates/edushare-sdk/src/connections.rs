//! Connection center - the consolidated fetch/partition/join logic behind
//! the connections, find-educators, profile and dashboard views.
//!
//! Mutations call the backend first and patch the local lists only after a
//! success response; on failure the previous state is untouched. Refreshes
//! run under a monotonic fetch token so an older in-flight refresh can
//! never clobber a newer one.

use crate::client::EduShareClient;
use crate::error::SdkError;
use crate::types::UserProfile;
use edushare_domain::{
    duplicate_pairs, partition, resolve, ConnectionAction, ConnectionPartition, FetchSequence,
    FetchToken, Friendship, FriendshipId, FriendshipStatus, RelationshipState, UserId,
};
use std::collections::HashMap;
use tracing::warn;

/// One row in a connection list: the record plus the counterpart's profile,
/// when it could be fetched. A missing profile still yields a valid entry
/// keyed by id.
#[derive(Debug, Clone)]
pub struct ConnectionEntry {
    /// The friendship record.
    pub friendship: Friendship,
    /// The other party's id.
    pub counterpart: UserId,
    /// The other party's profile, if available.
    pub user: Option<UserProfile>,
}

/// Local connection state for one viewer.
#[derive(Debug)]
pub struct ConnectionCenter {
    viewer: UserId,
    partition: ConnectionPartition,
    profiles: HashMap<UserId, UserProfile>,
    fetches: FetchSequence,
}

impl ConnectionCenter {
    /// Create an empty center for `viewer`. Call [`refresh`](Self::refresh)
    /// to populate it.
    pub fn new(viewer: UserId) -> Self {
        Self {
            viewer,
            partition: ConnectionPartition::default(),
            profiles: HashMap::new(),
            fetches: FetchSequence::new(),
        }
    }

    /// The viewer this center resolves for.
    pub fn viewer(&self) -> UserId {
        self.viewer
    }

    /// Refetch friendships and counterpart profiles.
    ///
    /// Malformed-status records are dropped with a warning; duplicate user
    /// pairs are logged as data-integrity anomalies but still resolved
    /// (last record wins). The fetched state replaces the local state
    /// wholesale unless a newer refresh already committed.
    pub async fn refresh(&mut self, client: &EduShareClient) -> Result<(), SdkError> {
        let token = self.fetches.begin();

        let wire = client.list_friendships().await?;
        let mut records = Vec::with_capacity(wire.len());
        for record in &wire {
            match record.to_domain() {
                Some(f) => records.push(f),
                None => warn!(
                    friendship_id = record.id,
                    status = %record.status,
                    "dropping friendship record with unexpected status"
                ),
            }
        }

        for (a, b) in duplicate_pairs(&records) {
            warn!(%a, %b, "multiple friendship records for one user pair");
        }

        let fresh = partition(&records, self.viewer);

        let mut profiles = HashMap::new();
        for friendship in fresh.iter() {
            let Some(counterpart) = friendship.counterpart(self.viewer) else {
                continue;
            };
            if profiles.contains_key(&counterpart) {
                continue;
            }
            match client.get_user(counterpart).await {
                Ok(profile) => {
                    profiles.insert(counterpart, profile);
                }
                Err(e) => {
                    // Entry stays keyed by id; display names are best-effort.
                    warn!(user = %counterpart, error = %e, "could not fetch counterpart profile");
                }
            }
        }

        self.commit_refresh(token, fresh, profiles);
        Ok(())
    }

    /// Install fetched state unless a newer refresh already committed.
    ///
    /// With the CLI's one-refresh-per-invocation usage the token always
    /// wins; the guard exists for long-lived callers that keep one center
    /// across overlapping refreshes. Returns whether the state was taken.
    fn commit_refresh(
        &mut self,
        token: FetchToken,
        fresh: ConnectionPartition,
        profiles: HashMap<UserId, UserProfile>,
    ) -> bool {
        if !self.fetches.commit(token) {
            return false;
        }
        self.partition = fresh;
        self.profiles = profiles;
        true
    }

    /// Resolve the relationship between the viewer and `target` from the
    /// current local records.
    pub fn relationship(&self, target: UserId) -> RelationshipState {
        resolve(&self.partition.records(), self.viewer, target)
    }

    /// Pending requests addressed to the viewer.
    pub fn incoming(&self) -> Vec<ConnectionEntry> {
        self.entries(&self.partition.incoming)
    }

    /// Pending requests the viewer sent.
    pub fn sent(&self) -> Vec<ConnectionEntry> {
        self.entries(&self.partition.sent)
    }

    /// Accepted connections.
    pub fn connected(&self) -> Vec<ConnectionEntry> {
        self.entries(&self.partition.connected)
    }

    fn entries(&self, records: &[Friendship]) -> Vec<ConnectionEntry> {
        records
            .iter()
            .map(|f| {
                let counterpart = f.counterpart(self.viewer).unwrap_or(f.requester);
                ConnectionEntry {
                    friendship: *f,
                    counterpart,
                    user: self.profiles.get(&counterpart).cloned(),
                }
            })
            .collect()
    }

    /// Send a connection request to `target`. On success the new record
    /// (with its backend-assigned id) joins the sent list.
    pub async fn send(
        &mut self,
        client: &EduShareClient,
        target: UserId,
    ) -> Result<Friendship, SdkError> {
        let record = client.send_friend_request(target).await?;
        let friendship = record.to_domain().unwrap_or_else(|| {
            // Backend responded with something odd; the request itself
            // succeeded, so synthesize the pending record from what we know.
            Friendship::new(
                FriendshipId::new(record.id),
                self.viewer,
                target,
                FriendshipStatus::Pending,
            )
        });
        self.partition.apply(ConnectionAction::Send(friendship));
        Ok(friendship)
    }

    /// Accept an incoming request; the record moves to connected.
    pub async fn accept(
        &mut self,
        client: &EduShareClient,
        id: FriendshipId,
    ) -> Result<(), SdkError> {
        client.accept_friend_request(id).await?;
        self.partition.apply(ConnectionAction::Accept(id));
        Ok(())
    }

    /// Reject an incoming request; the record is gone.
    pub async fn reject(
        &mut self,
        client: &EduShareClient,
        id: FriendshipId,
    ) -> Result<(), SdkError> {
        client.reject_friend_request(id).await?;
        self.partition.apply(ConnectionAction::Reject(id));
        Ok(())
    }

    /// Cancel a request the viewer sent; the record is gone.
    pub async fn cancel(
        &mut self,
        client: &EduShareClient,
        id: FriendshipId,
    ) -> Result<(), SdkError> {
        client.delete_friendship(id).await?;
        self.partition.apply(ConnectionAction::Cancel(id));
        Ok(())
    }

    /// Remove an accepted connection (unfriend); the record is gone.
    pub async fn remove(
        &mut self,
        client: &EduShareClient,
        id: FriendshipId,
    ) -> Result<(), SdkError> {
        client.delete_friendship(id).await?;
        self.partition.apply(ConnectionAction::Remove(id));
        Ok(())
    }
}
