//! Fetch sequencing - monotonic request tokens for overlapping refreshes.
//!
//! The UI is single-threaded, but two refreshes can overlap in time (tab
//! switch while an earlier fetch is in flight). A response must only be
//! applied if no response from a later-issued fetch has already been
//! applied: last-writer-wins by completion order, not initiation order.

/// Token identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchToken(u64);

/// Monotonic fetch sequencer.
#[derive(Debug, Clone, Default)]
pub struct FetchSequence {
    issued: u64,
    committed: Option<u64>,
}

impl FetchSequence {
    /// Create a sequencer with no fetches issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a fetch about to start.
    pub fn begin(&mut self) -> FetchToken {
        self.issued += 1;
        FetchToken(self.issued)
    }

    /// Try to commit a completed fetch.
    ///
    /// Returns `true` if the result should be applied. Returns `false` when
    /// a later-issued fetch already committed (the response is stale and
    /// must be discarded) or when the token was already committed once.
    pub fn commit(&mut self, token: FetchToken) -> bool {
        match self.committed {
            Some(latest) if latest >= token.0 => false,
            _ => {
                self.committed = Some(token.0);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_completion_commits() {
        let mut seq = FetchSequence::new();
        let a = seq.begin();
        let b = seq.begin();

        assert!(seq.commit(a));
        assert!(seq.commit(b));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut seq = FetchSequence::new();
        let older = seq.begin();
        let newer = seq.begin();

        // Newer fetch completes first; the older response is stale.
        assert!(seq.commit(newer));
        assert!(!seq.commit(older));
    }

    #[test]
    fn test_double_commit_is_rejected() {
        let mut seq = FetchSequence::new();
        let a = seq.begin();
        assert!(seq.commit(a));
        assert!(!seq.commit(a));
    }

    #[test]
    fn test_interleaved_generations() {
        let mut seq = FetchSequence::new();
        let a = seq.begin();
        assert!(seq.commit(a));

        let b = seq.begin();
        let c = seq.begin();
        assert!(seq.commit(b));
        assert!(seq.commit(c));
        assert!(!seq.commit(b));
    }
}
