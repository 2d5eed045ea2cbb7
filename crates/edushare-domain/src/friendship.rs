//! Friendship record - the backend's directed connection between two users.

use crate::ids::{FriendshipId, UserId};

/// Lifecycle status of a friendship record.
///
/// The client only ever sees two states: rejection, cancellation and
/// unfriending all delete the record instead of marking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriendshipStatus {
    /// Request sent, not yet answered by the addressee.
    Pending,

    /// Request accepted; the two users are connected.
    Accepted,
}

impl FriendshipStatus {
    /// Get the status name as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
        }
    }

    /// Parse a status from its wire spelling.
    ///
    /// Returns `None` for anything else (including legacy `rejected` rows
    /// the backend schema technically allows); callers drop such records
    /// and report the anomaly.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(FriendshipStatus::Pending),
            "accepted" => Some(FriendshipStatus::Accepted),
            _ => None,
        }
    }
}

impl std::str::FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid friendship status: {}", s))
    }
}

/// A friendship record as returned by the backend.
///
/// Directionality matters while pending: `requester` initiated the request,
/// `addressee` received it. The backend guarantees at most one record per
/// unordered user pair; the resolver tolerates violations of that invariant
/// rather than trusting it blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Friendship {
    /// Record identifier.
    pub id: FriendshipId,

    /// User who initiated the request.
    pub requester: UserId,

    /// User who received the request.
    pub addressee: UserId,

    /// Current lifecycle status.
    pub status: FriendshipStatus,
}

impl Friendship {
    /// Create a friendship record.
    pub fn new(
        id: FriendshipId,
        requester: UserId,
        addressee: UserId,
        status: FriendshipStatus,
    ) -> Self {
        Self {
            id,
            requester,
            addressee,
            status,
        }
    }

    /// Whether this record links `a` and `b`, in either direction.
    pub fn pairs(&self, a: UserId, b: UserId) -> bool {
        (self.requester == a && self.addressee == b)
            || (self.requester == b && self.addressee == a)
    }

    /// Whether `user` is one of the two parties.
    pub fn involves(&self, user: UserId) -> bool {
        self.requester == user || self.addressee == user
    }

    /// The party that is not `viewer`, if the viewer is involved at all.
    pub fn counterpart(&self, viewer: UserId) -> Option<UserId> {
        if self.requester == viewer {
            Some(self.addressee)
        } else if self.addressee == viewer {
            Some(self.requester)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, requester: i64, addressee: i64, status: FriendshipStatus) -> Friendship {
        Friendship::new(
            FriendshipId::new(id),
            UserId::new(requester),
            UserId::new(addressee),
            status,
        )
    }

    #[test]
    fn test_status_wire_spelling() {
        assert_eq!(FriendshipStatus::parse("pending"), Some(FriendshipStatus::Pending));
        assert_eq!(FriendshipStatus::parse("accepted"), Some(FriendshipStatus::Accepted));
        assert_eq!(FriendshipStatus::Pending.as_str(), "pending");
        assert_eq!(FriendshipStatus::Accepted.as_str(), "accepted");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert_eq!(FriendshipStatus::parse("rejected"), None);
        assert_eq!(FriendshipStatus::parse("Pending"), None);
        assert_eq!(FriendshipStatus::parse(""), None);
    }

    #[test]
    fn test_pairs_is_direction_agnostic() {
        let f = record(10, 1, 2, FriendshipStatus::Pending);
        assert!(f.pairs(UserId::new(1), UserId::new(2)));
        assert!(f.pairs(UserId::new(2), UserId::new(1)));
        assert!(!f.pairs(UserId::new(1), UserId::new(3)));
    }

    #[test]
    fn test_counterpart() {
        let f = record(10, 1, 2, FriendshipStatus::Accepted);
        assert_eq!(f.counterpart(UserId::new(1)), Some(UserId::new(2)));
        assert_eq!(f.counterpart(UserId::new(2)), Some(UserId::new(1)));
        assert_eq!(f.counterpart(UserId::new(3)), None);
    }
}
