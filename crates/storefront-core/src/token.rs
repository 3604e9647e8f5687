//! Selection tokens
//!
//! Each selection takes a fresh token; only a completion holding the latest
//! token may write state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tag of one selection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionToken(u64);

impl SelectionToken {
    /// Raw sequence number
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic token issuer
#[derive(Debug, Default)]
pub struct TokenIssuer {
    latest: AtomicU64,
}

impl TokenIssuer {
    /// Issuer with no token handed out
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before
    pub fn issue(&self) -> SelectionToken {
        SelectionToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Latest token issued, without issuing a new one
    #[must_use]
    pub fn current(&self) -> SelectionToken {
        SelectionToken(self.latest.load(Ordering::Acquire))
    }

    /// Whether no newer token has been issued since `token`
    #[must_use]
    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_token_supersedes() {
        let issuer = TokenIssuer::new();
        let first = issuer.issue();
        assert!(issuer.is_current(first));

        let second = issuer.issue();
        assert!(second > first);
        assert!(!issuer.is_current(first));
        assert!(issuer.is_current(second));
    }

    #[test]
    fn current_does_not_advance() {
        let issuer = TokenIssuer::new();
        let issued = issuer.issue();
        let observed = issuer.current();
        assert_eq!(observed, issued);
        assert!(issuer.is_current(observed));

        issuer.issue();
        assert!(!issuer.is_current(observed));
    }
}
