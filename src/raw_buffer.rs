//! Fixed-capacity store for captured edge durations.

use heapless::Vec;

/// Default capture capacity in edges.
pub const RAW_BLOCKS: usize = 255;

/// Ordered, fixed-capacity sequence of pulse/space durations in microseconds.
///
/// `N` is the capture capacity (up to 65535 entries). Once full, further
/// pushes are silently dropped: a full buffer is the completion signal for a
/// raw capture, not an error. The buffer is only ever cleared wholesale.
#[derive(Debug)]
pub struct RawBuffer<const N: usize = RAW_BLOCKS> {
    data: Vec<u16, N>,
}

impl<const N: usize> RawBuffer<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Append one duration; does nothing once the buffer is full.
    #[inline]
    pub fn push(&mut self, duration_us: u16) {
        // Dropping the overflow is deliberate: the decode engine treats
        // reaching capacity as completion and stops consuming edges.
        let _ = self.data.push(duration_us);
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.is_full()
    }

    /// The most recently stored duration.
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<u16> {
        self.data.last().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Forget everything captured so far.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<const N: usize> Default for RawBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
