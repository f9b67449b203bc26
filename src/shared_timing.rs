//! Timing record shared by every decoder for the current transmission window.

use crate::protocol::ProtocolTag;

/// Timestamps and claim bookkeeping shared across all registered decoders.
///
/// The dispatcher owns one of these and passes it by reference into every
/// decoder call. The claimer's identity is kept even after the result has
/// been consumed: the debounce gate in the raw decoder needs to know who
/// owned the *previous* transmission while it waits out that protocol's
/// trailing stop bit.
#[derive(Debug, Default, defmt::Format)]
pub struct SharedTiming {
    last_edge_us: u64,
    last_event_us: u64,
    last_claim: Option<ProtocolTag>,
    pending: bool,
}

impl SharedTiming {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_edge_us: 0,
            last_event_us: 0,
            last_claim: None,
            pending: false,
        }
    }

    /// Timestamp of the most recent edge seen by any decoder.
    #[must_use]
    pub const fn last_edge_us(&self) -> u64 {
        self.last_edge_us
    }

    /// Timestamp of the most recent claim.
    #[must_use]
    pub const fn last_event_us(&self) -> u64 {
        self.last_event_us
    }

    /// Which decoder claimed the most recent transmission, consumed or not.
    #[must_use]
    pub const fn last_claim(&self) -> Option<ProtocolTag> {
        self.last_claim
    }

    /// Record an edge timestamp. The dispatcher calls this before fanning the
    /// edge out to decoders.
    pub fn record_edge(&mut self, now_us: u64) {
        self.last_edge_us = now_us;
    }

    /// Mark the in-progress transmission as belonging to `tag`.
    pub fn claim(&mut self, tag: ProtocolTag, at_us: u64) {
        self.last_claim = Some(tag);
        self.last_event_us = at_us;
        self.pending = true;
    }

    /// True while `tag`'s claim has not been consumed.
    #[must_use]
    pub fn is_claimed_by(&self, tag: ProtocolTag) -> bool {
        self.pending && self.last_claim == Some(tag)
    }

    /// Mark the pending result consumed. The claimer identity is kept for the
    /// debounce gate.
    pub fn consume(&mut self) {
        self.pending = false;
    }

    /// Drop `tag`'s claim if it holds one; other decoders' claims are left
    /// alone.
    pub fn release(&mut self, tag: ProtocolTag) {
        if self.last_claim == Some(tag) {
            self.pending = false;
        }
    }
}
