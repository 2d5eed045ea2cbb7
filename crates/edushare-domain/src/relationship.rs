//! Relationship resolution - classify a target user from the viewer's
//! perspective given the full friendship list.

use crate::friendship::{Friendship, FriendshipStatus};
use crate::ids::{FriendshipId, UserId};

/// Derived, viewer-relative relationship classification.
///
/// Never persisted and never sent to the backend; recomputed on every fetch
/// and patched locally after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipState {
    /// The target is the viewer.
    Myself,

    /// No friendship record pairs the viewer and the target.
    None,

    /// An accepted record links the two users.
    Connected(FriendshipId),

    /// The viewer sent a request that is still pending.
    PendingSent(FriendshipId),

    /// The target sent the viewer a request that is still pending.
    PendingReceived(FriendshipId),
}

impl RelationshipState {
    /// The friendship record this state was derived from, when applicable.
    pub fn friendship_id(&self) -> Option<FriendshipId> {
        match self {
            RelationshipState::Connected(id)
            | RelationshipState::PendingSent(id)
            | RelationshipState::PendingReceived(id) => Some(*id),
            RelationshipState::Myself | RelationshipState::None => None,
        }
    }

    /// Short label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipState::Myself => "self",
            RelationshipState::None => "none",
            RelationshipState::Connected(_) => "connected",
            RelationshipState::PendingSent(_) => "pending-sent",
            RelationshipState::PendingReceived(_) => "pending-received",
        }
    }
}

/// Resolve the relationship between `viewer` and `target`.
///
/// Total over all inputs. At most one record should pair the two users; if
/// several do (a data-integrity fault on the backend side) the most recently
/// seen record wins. Use [`duplicate_pairs`] to detect and report that
/// condition.
pub fn resolve(friendships: &[Friendship], viewer: UserId, target: UserId) -> RelationshipState {
    if viewer == target {
        return RelationshipState::Myself;
    }

    // Last match wins on duplicate pairs.
    let found = friendships.iter().rev().find(|f| f.pairs(viewer, target));

    match found {
        None => RelationshipState::None,
        Some(f) => match f.status {
            FriendshipStatus::Accepted => RelationshipState::Connected(f.id),
            FriendshipStatus::Pending if f.requester == viewer => {
                RelationshipState::PendingSent(f.id)
            }
            FriendshipStatus::Pending => RelationshipState::PendingReceived(f.id),
        },
    }
}

/// Find unordered user pairs that appear in more than one record.
///
/// The backend enforces uniqueness per pair; a non-empty result means that
/// invariant was violated and the caller should log it. Each duplicated
/// pair is reported once, ordered `(smaller id, larger id)`.
pub fn duplicate_pairs(friendships: &[Friendship]) -> Vec<(UserId, UserId)> {
    let mut seen: Vec<(UserId, UserId)> = Vec::new();
    let mut duplicates: Vec<(UserId, UserId)> = Vec::new();

    for f in friendships {
        let pair = if f.requester <= f.addressee {
            (f.requester, f.addressee)
        } else {
            (f.addressee, f.requester)
        };

        if seen.contains(&pair) {
            if !duplicates.contains(&pair) {
                duplicates.push(pair);
            }
        } else {
            seen.push(pair);
        }
    }

    duplicates
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
    fn test_viewer_is_always_self() {
        let friendships = [pending(10, 1, 1)];
        assert_eq!(
            resolve(&friendships, UserId::new(1), UserId::new(1)),
            RelationshipState::Myself
        );
        assert_eq!(
            resolve(&[], UserId::new(7), UserId::new(7)),
            RelationshipState::Myself
        );
    }

    #[test]
    fn test_no_record_means_none() {
        let friendships = [pending(10, 1, 2)];
        assert_eq!(
            resolve(&friendships, UserId::new(1), UserId::new(3)),
            RelationshipState::None
        );
        assert_eq!(
            resolve(&[], UserId::new(1), UserId::new(2)),
            RelationshipState::None
        );
    }

    #[test]
    fn test_pending_direction() {
        // Viewer 1 sent to 2: pending-sent from 1's side,
        // pending-received from 2's side.
        let friendships = [pending(10, 1, 2)];
        assert_eq!(
            resolve(&friendships, UserId::new(1), UserId::new(2)),
            RelationshipState::PendingSent(FriendshipId::new(10))
        );
        assert_eq!(
            resolve(&friendships, UserId::new(2), UserId::new(1)),
            RelationshipState::PendingReceived(FriendshipId::new(10))
        );
    }

    #[test]
    fn test_accepted_resolves_connected_both_ways() {
        let friendships = [accepted(10, 1, 2)];
        assert_eq!(
            resolve(&friendships, UserId::new(1), UserId::new(2)),
            RelationshipState::Connected(FriendshipId::new(10))
        );
        assert_eq!(
            resolve(&friendships, UserId::new(2), UserId::new(1)),
            RelationshipState::Connected(FriendshipId::new(10))
        );
    }

    #[test]
    fn test_duplicate_pair_prefers_last_record() {
        // Both records pair {1, 2}; the later one wins.
        let friendships = [pending(10, 1, 2), accepted(11, 2, 1)];
        assert_eq!(
            resolve(&friendships, UserId::new(1), UserId::new(2)),
            RelationshipState::Connected(FriendshipId::new(11))
        );
    }

    #[test]
    fn test_duplicate_pairs_detection() {
        let friendships = [
            pending(10, 1, 2),
            accepted(11, 2, 1),
            accepted(12, 1, 3),
            pending(13, 2, 1),
        ];
        let anomalies = duplicate_pairs(&friendships);
        assert_eq!(anomalies, vec![(UserId::new(1), UserId::new(2))]);
    }

    #[test]
    fn test_no_duplicates_on_clean_list() {
        let friendships = [pending(10, 1, 2), accepted(11, 1, 3), pending(12, 4, 1)];
        assert!(duplicate_pairs(&friendships).is_empty());
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
        /// Property: resolve is total - every input maps to exactly one
        /// state, and the state carries a record id iff a record pairs the
        /// two users.
        #[test]
        fn test_resolve_is_total(
            friendships in prop::collection::vec(arb_friendship(), 0..20),
            viewer in 0i64..8,
            target in 0i64..8,
        ) {
            let viewer = UserId::new(viewer);
            let target = UserId::new(target);
            let state = resolve(&friendships, viewer, target);

            if viewer == target {
                prop_assert_eq!(state, RelationshipState::Myself);
            } else if let Some(id) = state.friendship_id() {
                prop_assert!(friendships
                    .iter()
                    .any(|f| f.id == id && f.pairs(viewer, target)));
            } else {
                prop_assert_eq!(state, RelationshipState::None);
                prop_assert!(!friendships.iter().any(|f| f.pairs(viewer, target)));
            }
        }

        /// Property: resolution direction is symmetric for accepted records
        /// and anti-symmetric for pending ones.
        #[test]
        fn test_resolve_directionality(
            friendships in prop::collection::vec(arb_friendship(), 0..20),
            a in 0i64..8,
            b in 0i64..8,
        ) {
            prop_assume!(a != b);
            let a = UserId::new(a);
            let b = UserId::new(b);

            let forward = resolve(&friendships, a, b);
            let backward = resolve(&friendships, b, a);

            match (forward, backward) {
                (RelationshipState::None, RelationshipState::None) => {}
                (RelationshipState::Connected(x), RelationshipState::Connected(y)) => {
                    prop_assert_eq!(x, y);
                }
                (RelationshipState::PendingSent(x), RelationshipState::PendingReceived(y))
                | (RelationshipState::PendingReceived(x), RelationshipState::PendingSent(y)) => {
                    prop_assert_eq!(x, y);
                }
                (f, b) => prop_assert!(false, "inconsistent pair: {:?} / {:?}", f, b),
            }
        }
    }
}
