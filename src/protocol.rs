//! The capability contract between the dispatcher and every registered decoder.

use crate::shared_timing::SharedTiming;

/// Which signal transitions a decoder wants delivered to
/// [`ProtocolDecoder::on_edge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub enum EdgeTrigger {
    Rising,
    Falling,
    Both,
}

/// Identity of a decoder, used to mark claims in [`SharedTiming`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub enum ProtocolTag {
    /// NEC-family decoders.
    Nec,
    /// The fallback raw-timing capture decoder.
    Raw,
}

/// A decoded command.
///
/// The raw decoder never fills this in; it exists so every decoder can share
/// one read contract.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, defmt::Format)]
pub struct IrData {
    pub address: u16,
    pub command: u32,
}

/// Capability contract every decoder registered with a [`Dispatcher`] exposes.
///
/// All calls receive the [`SharedTiming`] record by reference; decoders never
/// hold global state. The dispatcher guarantees `timing.last_edge_us()` is
/// already stamped with the current edge when `on_edge` runs.
///
/// [`Dispatcher`]: crate::Dispatcher
pub trait ProtocolDecoder {
    /// This decoder's identity for claims.
    fn tag(&self) -> ProtocolTag;

    /// Which edges should be delivered to [`Self::on_edge`].
    fn edge_trigger(&self) -> EdgeTrigger;

    /// Feed one edge: `duration_us` is the time since the previous edge.
    ///
    /// Runs in the capture context; implementations must be O(1) and
    /// allocation free.
    fn on_edge(&mut self, duration_us: u16, now_us: u64, timing: &mut SharedTiming);

    /// Whether [`Self::on_periodic_check`] must be polled regularly.
    fn needs_periodic_check(&self) -> bool {
        false
    }

    /// Periodic poll for decoders that detect end-of-transmission by silence.
    ///
    /// Must run with edge capture suppressed (the capture critical section):
    /// it may mutate the same state the edge path appends to.
    fn on_periodic_check(&mut self, _now_us: u64, _timing: &mut SharedTiming) {}

    /// True while this decoder holds the unconsumed claim on a transmission.
    fn is_available(&self, timing: &SharedTiming) -> bool {
        timing.is_claimed_by(self.tag())
    }

    /// Read the decoded result. A no-op returning [`IrData::default`] when
    /// this decoder is not the one with a pending claim.
    fn read(&mut self, timing: &SharedTiming) -> IrData;

    /// Whether [`Self::reset`] must be called after a consumed result.
    fn needs_reset(&self) -> bool {
        false
    }

    /// Return to the idle state, relinquishing any claim this decoder holds.
    fn reset(&mut self, _timing: &mut SharedTiming) {}
}
