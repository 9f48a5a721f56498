#![cfg_attr(not(feature = "std"), no_std)]

//! # Vehicle signal lights for addressable LED strips
//!
//! Reads four signal inputs (back-lights, stop, left, right) and renders the
//! matching lighting pattern onto a strip of `N` pixels, once per loop
//! iteration.
//!
//! # Core Concepts
//!
//! - **`InputState`**: The four requested signals for one frame
//! - **`InputSampler`**: Trait to implement for your input lines (`PinSampler` covers `embedded-hal` pins)
//! - **`PixelBuffer`**: Fixed-length frame composited each loop and flushed to the strip
//! - **`LedStrip`**: Trait to implement for your strip driver
//! - **`ControllerState`**: Previous inputs, turn progress and buffer; `step()` composes one frame
//! - **`SignalController`**: Owns the strip and time source and runs `ControllerState` each frame
//! - **`TurnAnimator`**: Growing/held chevron drawn at a strip end while a turn signal is on
//! - **`LightsConfig`**: Validated pins, colors, chase pattern and timing
//! - **`BootMode`**: Lights or firmware update, chosen once from the inputs held at boot
//! - **`UpdateSession`**: Chunked firmware upload through a `FirmwareSink`, with status display
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Layers are drawn back < stop < turn with plain overwrite. Any input edge
//! clears the frame; any turn edge restarts the chevron.

#[macro_use]
mod fmt;

pub mod buffer;
pub mod compositor;
pub mod config;
pub mod input;
pub mod mode;
pub mod portal;
pub mod time;
pub mod turn;
pub mod types;
pub mod update;

#[cfg(test)]
mod mock_time;

pub use buffer::{BLACK, LedStrip, PixelBuffer};
pub use compositor::{ControllerState, FrameReport, SignalController};
pub use config::{
    AccessPointConfig, ChasePattern, ConfigError, LightsConfig, LightsConfigBuilder,
    PinAssignment,
};
pub use input::{InputSampler, PinSampler};
pub use mode::BootMode;
pub use portal::PortalRoute;
pub use time::{Periodic, TimeDuration, TimeInstant, TimeSource};
pub use turn::{TurnAnimator, TurnPhase};
pub use types::{ActiveLevel, InputState, Rgb, TurnSide};
pub use update::{FirmwareSink, UpdateChunk, UpdateError, UpdateProgress, UpdateSession, UpdateState};
