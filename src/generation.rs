//! Request-generation counter for discarding stale results.
//!
//! Each new directions or planning request takes a ticket. When its result
//! arrives, it is only kept if no newer request has started since.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Returns `value` if `ticket` is still the latest request.
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(
                ticket = ticket.0,
                latest = self.current.load(Ordering::Acquire),
                "dropping stale result"
            );
            None
        }
    }
}
