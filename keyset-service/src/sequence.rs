//! Request sequencing for overlapping refreshes

use crate::config::CompletionOrdering;

/// Monotonic request ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides whether a completion may be applied
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    applied: u64,
}

impl RequestSequence {
    /// Create a fresh sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Record a completion, returning `false` if it must be dropped
    pub fn accept(&mut self, ticket: Ticket, ordering: CompletionOrdering) -> bool {
        match ordering {
            CompletionOrdering::LastCompletedWins => {
                self.applied = self.applied.max(ticket.0);
                true
            }
            CompletionOrdering::NewestRequestWins => {
                if ticket.0 <= self.applied {
                    return false;
                }
                self.applied = ticket.0;
                true
            }
        }
    }

    /// Newest ticket whose completion was applied
    pub fn last_applied(&self) -> Option<Ticket> {
        (self.applied > 0).then_some(Ticket(self.applied))
    }

    /// True when a newer ticket than the last applied one is outstanding
    pub fn has_pending(&self) -> bool {
        self.issued > self.applied
    }
}
