//! Generation-counted debouncing
//!
//! Every new request takes a fresh [`Ticket`] and thereby invalidates all
//! earlier ones. A waiter checks its ticket after sleeping (and again after
//! any network round trip) and gives up if a newer one exists.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u64,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Start a new wait, superseding every earlier ticket.
    pub fn schedule(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Supersede every outstanding ticket without starting a new wait.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let debouncer = Debouncer::new(300);
        let first = debouncer.schedule();
        assert!(debouncer.is_current(first));
        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn cancel_invalidates_outstanding_ticket() {
        let debouncer = Debouncer::new(300);
        let ticket = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_current(ticket));
    }
}
