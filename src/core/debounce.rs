//! Trailing-edge debouncing for bursty host events.

/// Default resize debounce delay in milliseconds.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Ticket handed out for one trigger; only the latest ticket settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Collapses a burst of triggers into the last one.
///
/// The host arms one timer per trigger; when a timer fires it calls
/// [`settle`](Debouncer::settle) with its ticket, which succeeds only for the
/// most recent trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u32,
    generation: u64,
    settled: bool,
}

impl Debouncer {
    /// Create a debouncer with the given delay.
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            settled: true,
        }
    }

    /// Delay the host should wait before settling.
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Record an event. Supersedes every earlier ticket.
    pub fn trigger(&mut self) -> Ticket {
        self.generation += 1;
        self.settled = false;
        Ticket(self.generation)
    }

    /// True exactly once, for the latest ticket.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.settled || ticket.0 != self.generation {
            return false;
        }
        self.settled = true;
        true
    }

    /// A trigger is waiting to settle.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.settled
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_settles() {
        let mut d = Debouncer::default();
        let first = d.trigger();
        let second = d.trigger();
        let third = d.trigger();
        assert!(!d.settle(first));
        assert!(!d.settle(second));
        assert!(d.is_pending());
        assert!(d.settle(third));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_settles_once() {
        let mut d = Debouncer::new(100);
        let t = d.trigger();
        assert!(d.settle(t));
        assert!(!d.settle(t));
        assert_eq!(d.delay_ms(), 100);
    }
}
