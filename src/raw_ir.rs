//! Fallback decoder that captures raw pulse/space timings when no specific
//! protocol claims a transmission.

use crate::protocol::{EdgeTrigger, IrData, ProtocolDecoder, ProtocolTag};
use crate::raw_buffer::{RAW_BLOCKS, RawBuffer};
use crate::shared_timing::SharedTiming;

/// End-of-transmission threshold in microseconds.
///
/// Doubles as the sentinel stored in the buffer for a gap that timed out, so
/// the last slot of a completed capture may hold this value instead of a real
/// duration.
pub const RAW_TIMEOUT_US: u16 = u16::MAX / 2;

/// How long edges are ignored after another decoder's claim, so a trailing
/// stop bit is not mistaken for the start of a new raw transmission.
pub const CLAIM_GUARD_US: u64 = 10_000;

/// Raw capture decoder: buffers the duration of every edge it is handed and
/// claims a complete transmission once the buffer fills or the signal goes
/// quiet for [`RAW_TIMEOUT_US`].
///
/// `N` is the capture capacity. The `read` contract deliberately yields an
/// empty [`IrData`]; callers analyze the captured timings through
/// [`RawIr::durations`] instead.
///
/// # Examples
/// ```
/// use ir_kit::{ProtocolDecoder, RawIr, SharedTiming};
///
/// let mut raw = RawIr::<16>::new();
/// let mut timing = SharedTiming::new();
///
/// // Three edges, 100µs apart, then silence.
/// for at in [100_u64, 200, 300] {
///     timing.record_edge(at);
///     raw.on_edge(100, at, &mut timing);
/// }
/// raw.on_periodic_check(100_000, &mut timing);
/// assert!(raw.is_available(&timing));
/// assert_eq!(raw.durations().len(), 4); // three edges plus the timeout mark
/// ```
#[derive(Debug)]
pub struct RawIr<const N: usize = RAW_BLOCKS> {
    buffer: RawBuffer<N>,
    timeout_us: u16,
    guard_us: u64,
}

impl<const N: usize> RawIr<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(RAW_TIMEOUT_US, CLAIM_GUARD_US)
    }

    /// Override the timeout threshold and claim guard interval.
    #[must_use]
    pub const fn with_config(timeout_us: u16, guard_us: u64) -> Self {
        Self {
            buffer: RawBuffer::new(),
            timeout_us,
            guard_us,
        }
    }

    /// Captured durations of the in-progress or just-completed transmission.
    #[must_use]
    pub fn durations(&self) -> &[u16] {
        self.buffer.as_slice()
    }

    /// True while another decoder's claim is recent enough that this edge may
    /// be its trailing stop bit.
    #[inline]
    fn should_defer(&self, now_us: u64, timing: &SharedTiming) -> bool {
        match timing.last_claim() {
            Some(tag) if tag != ProtocolTag::Raw => {
                now_us.wrapping_sub(timing.last_event_us()) < self.guard_us
            }
            _ => false,
        }
    }

    /// Decide whether the transmission is over even though no edge arrived.
    ///
    /// Idempotent once true: the only mutation is appending the timeout
    /// sentinel, and a sentinel already at the tail short-circuits the next
    /// call. Callers must hold the capture critical section, since this reads
    /// and writes the same buffer the edge path appends to.
    pub fn check_timeout(&mut self, now_us: u64, timing: &SharedTiming) -> bool {
        if self.buffer.is_empty() {
            // No transmission in progress.
            return false;
        }
        if self.buffer.is_full() {
            return true;
        }
        // A sentinel at the tail means a previous poll already fired.
        if self.buffer.last().is_some_and(|last| last >= self.timeout_us) {
            return true;
        }
        let elapsed = now_us.wrapping_sub(timing.last_edge_us());
        if elapsed >= u64::from(self.timeout_us) {
            self.buffer.push(self.timeout_us);
            return true;
        }
        false
    }
}

impl<const N: usize> ProtocolDecoder for RawIr<N> {
    fn tag(&self) -> ProtocolTag {
        ProtocolTag::Raw
    }

    fn edge_trigger(&self) -> EdgeTrigger {
        EdgeTrigger::Both
    }

    #[inline]
    fn on_edge(&mut self, duration_us: u16, now_us: u64, timing: &mut SharedTiming) {
        if self.should_defer(now_us, timing) {
            return;
        }
        self.buffer.push(duration_us);
        if self.buffer.len() == 1 && duration_us >= self.timeout_us {
            // A timeout-length gap with nothing before it is idle noise.
            self.buffer.clear();
            return;
        }
        if self.buffer.is_full() || duration_us >= self.timeout_us {
            timing.claim(ProtocolTag::Raw, now_us);
        }
    }

    fn needs_periodic_check(&self) -> bool {
        true
    }

    fn on_periodic_check(&mut self, now_us: u64, timing: &mut SharedTiming) {
        if self.check_timeout(now_us, timing) && !timing.is_claimed_by(ProtocolTag::Raw) {
            // Stamp the claim from the edge that ended the transmission, not
            // from the poll that noticed it.
            timing.claim(ProtocolTag::Raw, timing.last_edge_us());
        }
    }

    fn read(&mut self, _timing: &SharedTiming) -> IrData {
        // TODO derive a stable fingerprint from the captured timings so
        // unknown remotes can be matched across presses; until then callers
        // use `durations()` directly.
        IrData::default()
    }

    fn needs_reset(&self) -> bool {
        true
    }

    fn reset(&mut self, timing: &mut SharedTiming) {
        self.buffer.clear();
        timing.release(ProtocolTag::Raw);
    }
}

impl<const N: usize> Default for RawIr<N> {
    fn default() -> Self {
        Self::new()
    }
}
