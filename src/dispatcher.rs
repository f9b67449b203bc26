//! Fans edges and periodic checks out to every registered decoder.

use crate::protocol::{IrData, ProtocolDecoder, ProtocolTag};
use crate::shared_timing::SharedTiming;

/// Drives an ordered set of decoders over one [`SharedTiming`] record.
///
/// Decoders are passed into each call as `&mut [&mut dyn ProtocolDecoder]` so
/// the caller keeps ownership and can still reach concrete handles (for
/// example to copy a raw capture out through [`RawIr::durations`] before
/// consuming the result).
///
/// [`RawIr::durations`]: crate::RawIr::durations
#[derive(Debug, Default)]
pub struct Dispatcher {
    timing: SharedTiming,
}

impl Dispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timing: SharedTiming::new(),
        }
    }

    /// The shared timing record, for inspection.
    #[must_use]
    pub const fn timing(&self) -> &SharedTiming {
        &self.timing
    }

    /// Deliver one edge to every decoder.
    ///
    /// The edge timestamp is recorded before decoding so decoders compare
    /// claim ages against the current edge. Runs in the capture context.
    #[inline]
    pub fn on_edge(
        &mut self,
        duration_us: u16,
        now_us: u64,
        decoders: &mut [&mut dyn ProtocolDecoder],
    ) {
        self.timing.record_edge(now_us);
        for decoder in decoders {
            decoder.on_edge(duration_us, now_us, &mut self.timing);
        }
    }

    /// Periodic poll for decoders that detect end-of-transmission by silence.
    ///
    /// Must run with edge capture suppressed; see [`ProtocolDecoder::on_periodic_check`].
    pub fn poll(&mut self, now_us: u64, decoders: &mut [&mut dyn ProtocolDecoder]) {
        for decoder in decoders {
            if decoder.needs_periodic_check() {
                decoder.on_periodic_check(now_us, &mut self.timing);
            }
        }
    }

    /// Which decoder, if any, holds an unconsumed result.
    #[must_use]
    pub fn available_tag(&self, decoders: &[&mut dyn ProtocolDecoder]) -> Option<ProtocolTag> {
        decoders
            .iter()
            .find(|decoder| decoder.is_available(&self.timing))
            .map(|decoder| decoder.tag())
    }

    /// Consume the pending result: read it, then re-arm decoders that ask
    /// for it.
    ///
    /// Returns `None` when no decoder has a result. Callers wanting the raw
    /// timings must copy them out of the concrete decoder first; re-arming
    /// clears the capture buffer.
    pub fn read(
        &mut self,
        decoders: &mut [&mut dyn ProtocolDecoder],
    ) -> Option<(ProtocolTag, IrData)> {
        let decoder = decoders
            .iter_mut()
            .find(|decoder| decoder.is_available(&self.timing))?;
        let tag = decoder.tag();
        let data = decoder.read(&self.timing);
        self.timing.consume();
        if decoder.needs_reset() {
            decoder.reset(&mut self.timing);
        }
        Some((tag, data))
    }

    /// Reset every decoder and drop any claim.
    pub fn reset(&mut self, decoders: &mut [&mut dyn ProtocolDecoder]) {
        for decoder in decoders {
            decoder.reset(&mut self.timing);
        }
    }
}
