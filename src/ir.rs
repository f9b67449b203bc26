//! A device abstraction for capturing raw infrared timings from a GPIO pin.
//!
//! See [`IrRaw`] for usage examples.
use core::cell::RefCell;

use defmt::{info, trace};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use embassy_time::{Duration, Instant, Timer};

use crate::dispatcher::Dispatcher;
use crate::protocol::ProtocolDecoder;
use crate::raw_buffer::RAW_BLOCKS;
use crate::raw_ir::RawIr;
use crate::{Error, Result};

// ===== Public API ===========================================================

/// One captured transmission: every pulse/space duration in µs, in order.
///
/// The last entry may be the timeout sentinel rather than a real duration;
/// see [`crate::RAW_TIMEOUT_US`].
pub type RawFrame = heapless::Vec<u16, RAW_BLOCKS>;

/// How often the background task polls for end-of-transmission while the
/// signal is quiet.
const CHECK_PERIOD: Duration = Duration::from_millis(8);

/// Capture state shared between the edge path and the periodic poll.
struct Capture {
    dispatcher: Dispatcher,
    raw: RawIr<RAW_BLOCKS>,
}

/// Static resources for the [`IrRaw`] device abstraction.
///
/// The capture state lives behind a `CriticalSectionRawMutex` blocking mutex:
/// the periodic timeout poll mutates the same buffer the edge path appends
/// to, so both run with edge-capture interrupts suppressed.
pub struct IrRawStatic {
    capture: BlockingMutex<CriticalSectionRawMutex, RefCell<Capture>>,
    frames: EmbassyChannel<CriticalSectionRawMutex, RawFrame, 4>,
}

/// A device abstraction that records raw infrared pulse/space timings.
///
/// Useful for remotes whose protocol no specific decoder understands: each
/// complete transmission is delivered as the ordered list of its edge
/// durations for caller-side analysis.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use defmt::info;
/// # use embassy_executor::Spawner;
/// # use ir_kit::{IrRaw, IrRawStatic};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> ir_kit::Result<()> {
/// static IR_RAW_STATIC: IrRawStatic = IrRaw::new_static();
/// let ir_raw = IrRaw::new(p.PIN_15, &IR_RAW_STATIC, spawner)?;
///
/// loop {
///     let frame = ir_raw.wait().await;
///     info!("raw capture: {} durations", frame.len());
/// }
/// # }
/// ```
pub struct IrRaw<'a> {
    ir_static: &'a IrRawStatic,
}

impl IrRaw<'_> {
    /// Create static resources for raw capture.
    ///
    /// See [`IrRaw`] for usage examples.
    #[must_use]
    pub const fn new_static() -> IrRawStatic {
        IrRawStatic {
            capture: BlockingMutex::new(RefCell::new(Capture {
                dispatcher: Dispatcher::new(),
                raw: RawIr::new(),
            })),
            frames: EmbassyChannel::new(),
        }
    }

    /// Create a new raw capture device on the specified pin.
    ///
    /// See [`IrRaw`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        ir_static: &'static IrRawStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        // Pull::Up for typical IR receivers (they idle HIGH with active-low modules)
        let token = raw_ir_task(Input::new(any, Pull::Up), ir_static).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(Self { ir_static })
    }

    /// Wait for the next complete raw transmission.
    ///
    /// See [`IrRaw`] for usage examples.
    pub async fn wait(&self) -> RawFrame {
        self.ir_static.frames.receive().await
    }
}

// ===== The background task ==================================================

#[embassy_executor::task]
async fn raw_ir_task(mut pin: Input<'static>, ir_static: &'static IrRawStatic) -> ! {
    let mut last_edge: Instant = Instant::now();

    info!("raw IR task started");
    loop {
        match select(pin.wait_for_any_edge(), Timer::after(CHECK_PERIOD)).await {
            Either::First(()) => {
                let now = Instant::now();
                let dt = now.duration_since(last_edge).as_micros();
                last_edge = now;
                trace!("raw IR edge: dt={}µs", dt);
                feed_edge(ir_static, dt, now.as_micros());
            }
            Either::Second(()) => {
                poll_timeout(ir_static, Instant::now().as_micros());
            }
        }

        if let Some(frame) = take_frame(ir_static) {
            info!("raw IR frame: {} durations", frame.len());
            ir_static.frames.send(frame).await;
        }
    }
}

/// Feed one edge into the capture state machine, inside the capture critical
/// section. O(1) and allocation free.
#[inline]
fn feed_edge(ir_static: &IrRawStatic, dt_us: u64, now_us: u64) {
    // Gaps longer than the sentinel ceiling saturate; anything at or above
    // the timeout threshold means the same thing (transmission over).
    let duration = u16::try_from(dt_us).unwrap_or(u16::MAX);
    ir_static.capture.lock(|capture| {
        let mut capture = capture.borrow_mut();
        let Capture { dispatcher, raw } = &mut *capture;
        let decoders: &mut [&mut dyn ProtocolDecoder] = &mut [raw];
        dispatcher.on_edge(duration, now_us, decoders);
    });
}

/// Run the periodic end-of-transmission check under the capture critical
/// section.
fn poll_timeout(ir_static: &IrRawStatic, now_us: u64) {
    ir_static.capture.lock(|capture| {
        let mut capture = capture.borrow_mut();
        let Capture { dispatcher, raw } = &mut *capture;
        let decoders: &mut [&mut dyn ProtocolDecoder] = &mut [raw];
        dispatcher.poll(now_us, decoders);
    });
}

/// Copy out and consume a completed capture, if one is pending.
fn take_frame(ir_static: &IrRawStatic) -> Option<RawFrame> {
    ir_static.capture.lock(|capture| {
        let mut capture = capture.borrow_mut();
        if !capture.raw.is_available(capture.dispatcher.timing()) {
            return None;
        }
        // Same capacity on both sides, so the copy cannot fail.
        let frame = RawFrame::from_slice(capture.raw.durations()).ok()?;
        let Capture { dispatcher, raw } = &mut *capture;
        let decoders: &mut [&mut dyn ProtocolDecoder] = &mut [raw];
        let _ = dispatcher.read(decoders);
        Some(frame)
    })
}
