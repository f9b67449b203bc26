//! Host-level tests for the raw capture state machine.

use ir_kit::{EdgeTrigger, IrData, ProtocolDecoder, ProtocolTag, RawBuffer, RawIr, SharedTiming};

const TIMEOUT_US: u16 = 1_000;
const GUARD_US: u64 = 10_000;

fn capture() -> (RawIr<5>, SharedTiming) {
    (
        RawIr::with_config(TIMEOUT_US, GUARD_US),
        SharedTiming::new(),
    )
}

/// Feed `(duration_us, at_us)` edges the way the dispatcher would: the edge
/// timestamp is recorded before the decoder runs.
fn feed(raw: &mut RawIr<5>, timing: &mut SharedTiming, edges: &[(u16, u64)]) {
    for &(duration_us, at_us) in edges {
        timing.record_edge(at_us);
        raw.on_edge(duration_us, at_us, timing);
    }
}

#[test]
fn partial_capture_is_not_available() {
    let (mut raw, mut timing) = capture();
    feed(
        &mut raw,
        &mut timing,
        &[(100, 1_000), (200, 1_200), (300, 1_500)],
    );
    assert_eq!(raw.durations(), &[100, 200, 300]);
    assert!(!raw.is_available(&timing));
}

#[test]
fn lone_leading_timeout_is_discarded_as_noise() {
    let (mut raw, mut timing) = capture();
    feed(&mut raw, &mut timing, &[(1_500, 1_000)]);
    assert!(raw.durations().is_empty());
    assert!(!raw.is_available(&timing));

    // A real pulse afterwards starts a fresh capture.
    feed(&mut raw, &mut timing, &[(100, 2_000)]);
    assert_eq!(raw.durations(), &[100]);
}

#[test]
fn filling_the_buffer_completes_immediately() {
    let (mut raw, mut timing) = capture();
    feed(
        &mut raw,
        &mut timing,
        &[(100, 1_000), (100, 1_100), (100, 1_200), (100, 1_300)],
    );
    assert!(!raw.is_available(&timing));

    // The fifth edge is sub-threshold too; capacity alone completes.
    feed(&mut raw, &mut timing, &[(100, 1_400)]);
    assert_eq!(raw.durations().len(), 5);
    assert!(raw.is_available(&timing));
}

#[test]
fn long_gap_mid_capture_completes() {
    // End-to-end: capacity 5, threshold 1000, durations [100, 200, 1500].
    let (mut raw, mut timing) = capture();
    feed(
        &mut raw,
        &mut timing,
        &[(100, 10_100), (200, 10_300), (1_500, 11_800)],
    );
    assert_eq!(raw.durations(), &[100, 200, 1_500]);
    assert!(raw.is_available(&timing));
    assert_eq!(timing.last_event_us(), 11_800);
}

#[test]
fn edge_inside_foreign_claim_guard_is_dropped() {
    let (mut raw, mut timing) = capture();
    timing.claim(ProtocolTag::Nec, 1_000);

    feed(&mut raw, &mut timing, &[(600, 5_000)]);
    assert!(raw.durations().is_empty());
    assert!(!raw.is_available(&timing));

    // Exactly one guard interval later the gate reopens.
    feed(&mut raw, &mut timing, &[(600, 11_000)]);
    assert_eq!(raw.durations(), &[600]);
}

#[test]
fn own_claim_does_not_defer() {
    let (mut raw, mut timing) = capture();
    timing.claim(ProtocolTag::Raw, 1_000);
    feed(&mut raw, &mut timing, &[(600, 2_000)]);
    assert_eq!(raw.durations(), &[600]);
}

#[test]
fn reset_restores_initial_state() {
    let (mut raw, mut timing) = capture();
    feed(
        &mut raw,
        &mut timing,
        &[(100, 1_000), (200, 1_200), (1_500, 2_800)],
    );
    assert!(raw.is_available(&timing));

    raw.reset(&mut timing);
    assert!(raw.durations().is_empty());
    assert!(!raw.is_available(&timing));

    // Identical to a fresh decoder: the same sequence captures again.
    feed(
        &mut raw,
        &mut timing,
        &[(100, 20_000), (200, 20_200), (1_500, 21_800)],
    );
    assert_eq!(raw.durations(), &[100, 200, 1_500]);
    assert!(raw.is_available(&timing));
}

#[test]
fn capability_contract_answers() {
    let (mut raw, timing) = capture();
    assert_eq!(raw.edge_trigger(), EdgeTrigger::Both);
    assert_eq!(raw.tag(), ProtocolTag::Raw);
    assert!(raw.needs_periodic_check());
    assert!(raw.needs_reset());
    // The semantic decode is a stub; callers analyze durations() instead.
    assert_eq!(raw.read(&timing), IrData::default());
}

#[test]
fn buffer_push_at_capacity_is_a_silent_no_op() {
    let mut buffer = RawBuffer::<3>::new();
    for duration in [10, 20, 30, 40, 50] {
        buffer.push(duration);
    }
    assert!(buffer.is_full());
    assert_eq!(buffer.as_slice(), &[10, 20, 30]);

    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.last(), None);
}
