//! Identifier newtypes over the backend's integer primary keys.

use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend id.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw id value.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Identifier of a platform user.
    UserId
}

id_type! {
    /// Identifier of a friendship record.
    FriendshipId
}

id_type! {
    /// Identifier of an uploaded resource.
    ResourceId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Ordering and equality work within a type.
        assert!(FriendshipId::new(1) < FriendshipId::new(2));
        assert_ne!(ResourceId::new(1), ResourceId::new(2));
    }
}
