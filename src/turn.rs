//! Turn-signal chase animation.
//!
//! The chevron grows one pixel per turn-speed interval from the body side of
//! the turn region until it covers the whole region, then holds. Progress is
//! counted in pixels and only advances while the chevron is still growing.
//!
//! The held phase indexes the pattern with the full progress value. A sliding
//! chevron would need progress past the turn size, which never happens, so a
//! held chevron is drawn identically on every frame.

use crate::buffer::PixelBuffer;
use crate::time::{Periodic, TimeInstant};
use crate::types::{Rgb, TurnSide};

/// Phase of the turn animation for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnPhase {
    /// No turn signal requested. Nothing is drawn.
    Idle,

    /// Chevron drawn with `progress + 1` pixels.
    Growing(usize),

    /// Full chevron drawn.
    Held,
}

/// Progress counter and rate limiter for the chase animation.
#[derive(Debug, Clone, Copy)]
pub struct TurnAnimator<I: TimeInstant> {
    progress: usize,
    limiter: Periodic<I>,
}

impl<I: TimeInstant> TurnAnimator<I> {
    /// Creates an animator that advances once per `turn_speed`.
    pub fn new(turn_speed: I::Duration) -> Self {
        Self {
            progress: 0,
            limiter: Periodic::new(turn_speed),
        }
    }

    /// Animation steps taken since the last turn edge.
    #[inline]
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Restarts the chevron from a single pixel.
    ///
    /// Only the counter is reset; the rate limiter keeps its phase.
    #[inline]
    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Phase the next render will draw for a pattern of `turn_size` pixels.
    pub fn phase(&self, turn_size: usize) -> TurnPhase {
        if self.progress < turn_size {
            TurnPhase::Growing(self.progress)
        } else {
            TurnPhase::Held
        }
    }

    /// Draws the chevron for `side` and advances progress if due.
    ///
    /// Returns the phase that was drawn.
    pub fn render<const N: usize>(
        &mut self,
        side: TurnSide,
        pattern: &[Rgb],
        buffer: &mut PixelBuffer<N>,
        now: I,
    ) -> TurnPhase {
        let turn_size = pattern.len();
        let right_start = N.saturating_sub(turn_size);
        let phase = self.phase(turn_size);

        match phase {
            TurnPhase::Growing(p) => {
                let lit = &pattern[..=p];
                match side {
                    TurnSide::Left => {
                        let start = turn_size - p - 1;
                        for (i, &color) in lit.iter().enumerate() {
                            buffer.set_pixel(start + i, color);
                        }
                    }
                    TurnSide::Right => {
                        for (i, &color) in lit.iter().rev().enumerate() {
                            buffer.set_pixel(right_start + i, color);
                        }
                    }
                }

                if self.limiter.poll(now) {
                    self.progress += 1;
                }
            }
            TurnPhase::Held => match side {
                TurnSide::Left => {
                    for (i, &color) in pattern.iter().enumerate() {
                        buffer.set_pixel(i, color);
                    }
                }
                TurnSide::Right => {
                    for (i, &color) in pattern.iter().rev().enumerate() {
                        buffer.set_pixel(right_start + i, color);
                    }
                }
            },
            TurnPhase::Idle => {}
        }

        phase
    }
}
