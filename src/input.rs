//! Input sampling for the four signal lines.

use embedded_hal::digital::InputPin;

use crate::types::{ActiveLevel, InputState};

/// Trait for abstracting the signal input hardware.
pub trait InputSampler {
    /// Reads the four lines once and returns the requested state.
    fn sample(&mut self) -> InputState;
}

/// Samples four `embedded-hal` input pins.
///
/// The pins are expected to be configured with pull-ups. A failed read counts
/// as "not requested".
pub struct PinSampler<B, S, L, R>
where
    B: InputPin,
    S: InputPin,
    L: InputPin,
    R: InputPin,
{
    back: B,
    stop: S,
    left: L,
    right: R,
    active_level: ActiveLevel,
}

impl<B, S, L, R> PinSampler<B, S, L, R>
where
    B: InputPin,
    S: InputPin,
    L: InputPin,
    R: InputPin,
{
    /// Creates a sampler.
    ///
    /// # Arguments
    /// * `back` - Back-lights input
    /// * `stop` - Stop input
    /// * `left` - Left turn input
    /// * `right` - Right turn input
    /// * `active_level` - Pin level that means "requested"
    pub fn new(back: B, stop: S, left: L, right: R, active_level: ActiveLevel) -> Self {
        Self {
            back,
            stop,
            left,
            right,
            active_level,
        }
    }

    /// Releases the pins.
    pub fn release(self) -> (B, S, L, R) {
        (self.back, self.stop, self.left, self.right)
    }
}

fn read<P: InputPin>(pin: &mut P, level: ActiveLevel) -> bool {
    pin.is_high().map(|high| level.is_active(high)).unwrap_or(false)
}

impl<B, S, L, R> InputSampler for PinSampler<B, S, L, R>
where
    B: InputPin,
    S: InputPin,
    L: InputPin,
    R: InputPin,
{
    fn sample(&mut self) -> InputState {
        let level = self.active_level;
        InputState {
            back: read(&mut self.back, level),
            stop: read(&mut self.stop, level),
            left: read(&mut self.left, level),
            right: read(&mut self.right, level),
        }
    }
}
