//! Request sequencing for superseding fetches.
//!
//! The two request streams (proton image, EPSI dataset) are independent
//! and fire-and-forget; without sequencing, a slow early response can
//! overwrite a newer one. Each stream owns a [`RequestLedger`]: requests
//! take the next sequence number and a response is applied only if it is
//! newer than the last one applied.

/// Monotonic sequence tagging for one request stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLedger {
    next_seq: u64,
    last_applied: Option<u64>,
}

impl RequestLedger {
    /// Tag a new outgoing request.
    pub fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Try to apply a response. Returns `false` for responses older than
    /// (or equal to) the newest already applied; the caller discards
    /// those.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(applied) if seq <= applied => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_monotonic() {
        let mut ledger = RequestLedger::default();
        assert_eq!(ledger.issue(), 0);
        assert_eq!(ledger.issue(), 1);
        assert_eq!(ledger.issue(), 2);
    }

    #[test]
    fn newer_response_wins_over_slow_older_one() {
        let mut ledger = RequestLedger::default();
        let first = ledger.issue();
        let second = ledger.issue();

        // The later request resolves first.
        assert!(ledger.accept(second));
        // The earlier request resolves afterwards and is discarded.
        assert!(!ledger.accept(first));
    }

    #[test]
    fn in_order_responses_all_apply() {
        let mut ledger = RequestLedger::default();
        let a = ledger.issue();
        let b = ledger.issue();
        assert!(ledger.accept(a));
        assert!(ledger.accept(b));
    }

    #[test]
    fn duplicate_response_is_discarded() {
        let mut ledger = RequestLedger::default();
        let seq = ledger.issue();
        assert!(ledger.accept(seq));
        assert!(!ledger.accept(seq));
    }
}
