//! Edge-timing capture for multi-protocol infrared receivers.
//!
//! The core of this crate is the fallback "raw" decoder: it buffers the
//! duration of every pulse and space it is handed and flags a complete
//! transmission once the signal goes quiet or the buffer fills, without
//! interpreting what the timings mean. The [`ProtocolDecoder`] trait is the
//! capability contract every decoder shares with the [`Dispatcher`]; the
//! [`SharedTiming`] record is how decoders coordinate claims on the current
//! transmission.
//!
//! The state machines here are target independent and take plain microsecond
//! timestamps, so they test on the host. The `pico1`/`pico2` features add the
//! GPIO capture task (see `IrRaw`) that drives them from real edges.
#![no_std]

mod dispatcher;
mod error;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod ir;
mod protocol;
mod raw_buffer;
mod raw_ir;
mod shared_timing;

// Re-export commonly used items
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ir::{IrRaw, IrRawStatic, RawFrame};
pub use protocol::{EdgeTrigger, IrData, ProtocolDecoder, ProtocolTag};
pub use raw_buffer::{RAW_BLOCKS, RawBuffer};
pub use raw_ir::{CLAIM_GUARD_US, RAW_TIMEOUT_US, RawIr};
pub use shared_timing::SharedTiming;
