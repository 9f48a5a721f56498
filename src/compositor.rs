//! Signal compositor: turns input states into strip frames.
//!
//! Provides [`ControllerState`], the per-frame state machine, and
//! [`SignalController`], which owns the strip and drives one frame per
//! loop iteration.
//!
//! Each frame composes three layers in a fixed order, last writer wins:
//! backlight, then stop, then the turn chevron. The buffer is cleared on any
//! input edge and the chevron restarts on any turn edge.

use crate::buffer::{LedStrip, PixelBuffer};
use crate::config::{ConfigError, LightsConfig};
use crate::input::InputSampler;
use crate::time::{TimeInstant, TimeSource};
use crate::turn::{TurnAnimator, TurnPhase};
use crate::types::{InputState, TurnSide};

/// What a call to [`ControllerState::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Buffer was cleared because an input changed.
    pub cleared: bool,

    /// Turn progress was reset because left or right changed.
    pub turn_reset: bool,

    /// Turn animation phase drawn this frame.
    pub turn_phase: TurnPhase,
}

/// Frame-to-frame state of the lighting controller.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `N` - Number of pixels on the strip
#[derive(Debug, Clone)]
pub struct ControllerState<I: TimeInstant, const N: usize> {
    previous: InputState,
    turn: TurnAnimator<I>,
    buffer: PixelBuffer<N>,
}

impl<I: TimeInstant, const N: usize> ControllerState<I, N> {
    /// Creates the initial state: all inputs released, buffer black.
    ///
    /// # Errors
    /// * `TurnRegionTooLarge` - The two turn regions do not fit `N` pixels
    pub fn new(config: &LightsConfig<I::Duration>) -> Result<Self, ConfigError> {
        config.validate_for(N)?;

        Ok(Self {
            previous: InputState::default(),
            turn: TurnAnimator::new(config.turn_speed()),
            buffer: PixelBuffer::new(),
        })
    }

    /// Composes one frame from `inputs` into the buffer.
    ///
    /// `config` must be the configuration this state was created with.
    pub fn step(
        &mut self,
        config: &LightsConfig<I::Duration>,
        inputs: InputState,
        now: I,
    ) -> FrameReport {
        let cleared = inputs.changed_from(&self.previous);
        let turn_reset = inputs.turn_changed_from(&self.previous);

        if cleared {
            self.buffer.clear();
        }

        if turn_reset {
            self.turn.reset();
        }

        let turn_size = config.turn_size();

        if inputs.back {
            self.buffer.fill_range(
                turn_size,
                N.saturating_sub(turn_size * 2),
                config.backlight_color(),
            );
        }

        if inputs.stop {
            let stop = config.stop_color();
            match inputs.turn() {
                Some(TurnSide::Left) => {
                    self.buffer.fill_range(turn_size, N.saturating_sub(turn_size), stop)
                }
                Some(TurnSide::Right) => {
                    self.buffer.fill_range(0, N.saturating_sub(turn_size), stop)
                }
                None => self.buffer.fill_solid(stop),
            }
        }

        let turn_phase = match inputs.turn() {
            Some(side) => self
                .turn
                .render(side, config.chase_pattern(), &mut self.buffer, now),
            None => TurnPhase::Idle,
        };

        self.previous = inputs;

        FrameReport {
            cleared,
            turn_reset,
            turn_phase,
        }
    }

    /// Inputs seen on the last frame.
    pub fn previous_inputs(&self) -> InputState {
        self.previous
    }

    /// Turn animation steps since the last turn edge.
    pub fn turn_progress(&self) -> usize {
        self.turn.progress()
    }

    pub fn buffer(&self) -> &PixelBuffer<N> {
        &self.buffer
    }
}

/// Drives an LED strip from the signal inputs, one frame per call.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - LED strip implementation type
/// * `T` - Time source implementation type
/// * `N` - Number of pixels on the strip
pub struct SignalController<'t, I: TimeInstant, S: LedStrip, T: TimeSource<I>, const N: usize> {
    strip: S,
    time_source: &'t T,
    config: LightsConfig<I::Duration>,
    state: ControllerState<I, N>,
}

impl<'t, I: TimeInstant, S: LedStrip, T: TimeSource<I>, const N: usize>
    SignalController<'t, I, S, T, N>
{
    /// Creates a controller and blanks the strip.
    ///
    /// # Errors
    /// * `TurnRegionTooLarge` - The two turn regions do not fit `N` pixels
    pub fn new(
        mut strip: S,
        time_source: &'t T,
        config: LightsConfig<I::Duration>,
    ) -> Result<Self, ConfigError> {
        let state = ControllerState::new(&config)?;
        state.buffer.flush(&mut strip, config.brightness());

        info!(
            "lights ready: {=usize} pixels, turn size {=usize}",
            N,
            config.turn_size()
        );

        Ok(Self {
            strip,
            time_source,
            config,
            state,
        })
    }

    /// Samples the inputs, composes a frame and flushes it.
    pub fn run_frame<P: InputSampler>(&mut self, sampler: &mut P) -> FrameReport {
        let inputs = sampler.sample();
        self.step(inputs)
    }

    /// Composes a frame from already-sampled inputs and flushes it.
    pub fn step(&mut self, inputs: InputState) -> FrameReport {
        let now = self.time_source.now();
        let report = self.state.step(&self.config, inputs, now);

        if report.cleared {
            debug!("inputs changed: {}", inputs);
        }

        self.state.buffer.flush(&mut self.strip, self.config.brightness());
        report
    }

    pub fn config(&self) -> &LightsConfig<I::Duration> {
        &self.config
    }

    pub fn state(&self) -> &ControllerState<I, N> {
        &self.state
    }

    /// Returns the strip, consuming the controller.
    pub fn into_strip(self) -> S {
        self.strip
    }
}
