//! Connection list partitioning and the optimistic mutation table.

use crate::friendship::{Friendship, FriendshipStatus};
use crate::ids::{FriendshipId, UserId};

/// The three connection lists a viewer sees.
///
/// Order within each list is backend insertion order; no re-sorting happens
/// here. Display tie-breaks are the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionPartition {
    /// Pending requests addressed to the viewer.
    pub incoming: Vec<Friendship>,

    /// Pending requests the viewer sent.
    pub sent: Vec<Friendship>,

    /// Accepted records involving the viewer.
    pub connected: Vec<Friendship>,
}

/// Partition a friendship list from the viewer's perspective.
///
/// Records not involving the viewer (the backend should not return any) are
/// silently ignored.
pub fn partition(friendships: &[Friendship], viewer: UserId) -> ConnectionPartition {
    let mut out = ConnectionPartition::default();

    for f in friendships {
        match f.status {
            FriendshipStatus::Pending if f.addressee == viewer => out.incoming.push(*f),
            FriendshipStatus::Pending if f.requester == viewer => out.sent.push(*f),
            FriendshipStatus::Accepted if f.involves(viewer) => out.connected.push(*f),
            _ => {}
        }
    }

    out
}

/// A local list mutation mirroring a backend call that already succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAction {
    /// A request was created; the record (with its backend-assigned id)
    /// joins the sent list.
    Send(Friendship),

    /// An incoming request was accepted; the record moves to connected.
    Accept(FriendshipId),

    /// An incoming request was rejected; the record is gone.
    Reject(FriendshipId),

    /// A sent request was cancelled; the record is gone.
    Cancel(FriendshipId),

    /// A connection was removed (unfriend); the record is gone.
    Remove(FriendshipId),
}

impl ConnectionPartition {
    /// Iterate every record across the three lists.
    pub fn iter(&self) -> impl Iterator<Item = &Friendship> {
        self.incoming
            .iter()
            .chain(self.sent.iter())
            .chain(self.connected.iter())
    }

    /// Collect every record into one list, for resolution.
    pub fn records(&self) -> Vec<Friendship> {
        self.iter().copied().collect()
    }

    /// Total number of records held.
    pub fn len(&self) -> usize {
        self.incoming.len() + self.sent.len() + self.connected.len()
    }

    /// Whether no records are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply an optimistic mutation.
    ///
    /// Actions referring to ids that are no longer present are no-ops:
    /// re-applying a removal-type action must not fail, and an `Accept`
    /// whose record already left the incoming list changes nothing.
    pub fn apply(&mut self, action: ConnectionAction) {
        match action {
            ConnectionAction::Send(record) => {
                // Replace rather than duplicate if the id is already there.
                self.sent.retain(|f| f.id != record.id);
                self.sent.push(Friendship {
                    status: FriendshipStatus::Pending,
                    ..record
                });
            }
            ConnectionAction::Accept(id) => {
                if let Some(pos) = self.incoming.iter().position(|f| f.id == id) {
                    let mut record = self.incoming.remove(pos);
                    record.status = FriendshipStatus::Accepted;
                    self.connected.push(record);
                }
            }
            ConnectionAction::Reject(id) => {
                self.incoming.retain(|f| f.id != id);
            }
            ConnectionAction::Cancel(id) => {
                self.sent.retain(|f| f.id != id);
            }
            ConnectionAction::Remove(id) => {
                self.connected.retain(|f| f.id != id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: i64, requester: i64, addressee: i64) -> Friendship {
        Friendship::new(
            FriendshipId::new(id),
            UserId::new(requester),
            UserId::new(addressee),
            FriendshipStatus::Pending,
        )
    }

    fn accepted(id: i64, requester: i64, addressee: i64) -> Friendship {
        Friendship::new(
            FriendshipId::new(id),
            UserId::new(requester),
            UserId::new(addressee),
            FriendshipStatus::Accepted,
        )
    }

    #[test]
    fn test_partition_splits_by_direction_and_status() {
        let friendships = [accepted(20, 1, 2), pending(21, 3, 1)];
        let p = partition(&friendships, UserId::new(1));

        assert_eq!(p.incoming, vec![pending(21, 3, 1)]);
        assert!(p.sent.is_empty());
        assert_eq!(p.connected, vec![accepted(20, 1, 2)]);
    }

    #[test]
    fn test_partition_keeps_insertion_order() {
        let friendships = [pending(30, 5, 1), pending(31, 6, 1), pending(32, 1, 7)];
        let p = partition(&friendships, UserId::new(1));

        let incoming_ids: Vec<i64> = p.incoming.iter().map(|f| f.id.value()).collect();
        assert_eq!(incoming_ids, vec![30, 31]);
        assert_eq!(p.sent[0].id.value(), 32);
    }

    #[test]
    fn test_partition_ignores_unrelated_records() {
        let friendships = [pending(40, 2, 3), accepted(41, 4, 5)];
        let p = partition(&friendships, UserId::new(1));
        assert!(p.is_empty());
    }

    #[test]
    fn test_accept_moves_incoming_to_connected() {
        let mut p = partition(&[pending(10, 2, 1)], UserId::new(1));
        p.apply(ConnectionAction::Accept(FriendshipId::new(10)));

        assert!(p.incoming.is_empty());
        assert_eq!(p.connected.len(), 1);
        assert_eq!(p.connected[0].status, FriendshipStatus::Accepted);
        assert_eq!(p.connected[0].id, FriendshipId::new(10));
    }

    #[test]
    fn test_send_then_cancel_round_trip() {
        let mut p = ConnectionPartition::default();
        p.apply(ConnectionAction::Send(pending(50, 1, 2)));
        assert_eq!(p.sent.len(), 1);

        p.apply(ConnectionAction::Cancel(FriendshipId::new(50)));
        assert!(p.is_empty());
    }

    #[test]
    fn test_send_replaces_existing_id() {
        let mut p = ConnectionPartition::default();
        p.apply(ConnectionAction::Send(pending(50, 1, 2)));
        p.apply(ConnectionAction::Send(pending(50, 1, 2)));
        assert_eq!(p.sent.len(), 1);
    }

    #[test]
    fn test_removals_are_idempotent_on_absent_ids() {
        let mut p = partition(&[pending(10, 2, 1), accepted(11, 1, 3)], UserId::new(1));
        let before = p.clone();

        // None of these ids exist anywhere.
        p.apply(ConnectionAction::Reject(FriendshipId::new(99)));
        p.apply(ConnectionAction::Cancel(FriendshipId::new(99)));
        p.apply(ConnectionAction::Remove(FriendshipId::new(99)));
        p.apply(ConnectionAction::Accept(FriendshipId::new(99)));
        assert_eq!(p, before);

        // Re-applying a removal that already happened is a no-op too.
        p.apply(ConnectionAction::Reject(FriendshipId::new(10)));
        p.apply(ConnectionAction::Reject(FriendshipId::new(10)));
        assert!(p.incoming.is_empty());
        assert_eq!(p.connected.len(), 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_friendship() -> impl Strategy<Value = Friendship> {
        (0i64..1000, 0i64..8, 0i64..8, prop::bool::ANY).prop_map(|(id, req, addr, accepted)| {
            Friendship::new(
                FriendshipId::new(id),
                UserId::new(req),
                UserId::new(addr),
                if accepted {
                    FriendshipStatus::Accepted
                } else {
                    FriendshipStatus::Pending
                },
            )
        })
    }

    proptest! {
        /// Property: every partitioned record lands in exactly one list,
        /// and every record involving the viewer is partitioned.
        #[test]
        fn test_partition_is_exhaustive_and_disjoint(
            friendships in prop::collection::vec(arb_friendship(), 0..30),
            viewer in 0i64..8,
        ) {
            let viewer = UserId::new(viewer);
            let p = partition(&friendships, viewer);

            let involved = friendships.iter().filter(|f| f.involves(viewer)).count();
            prop_assert_eq!(p.len(), involved);

            for f in p.incoming.iter() {
                prop_assert_eq!(f.status, FriendshipStatus::Pending);
                prop_assert_eq!(f.addressee, viewer);
            }
            for f in p.sent.iter() {
                prop_assert_eq!(f.status, FriendshipStatus::Pending);
                prop_assert_eq!(f.requester, viewer);
            }
            for f in p.connected.iter() {
                prop_assert_eq!(f.status, FriendshipStatus::Accepted);
                prop_assert!(f.involves(viewer));
            }
        }
    }
}
