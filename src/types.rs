//! Core types shared by the sampler, compositor and animator.

use palette::Srgb;

/// An 8-bit RGB pixel as sent to the strip.
pub type Rgb = Srgb<u8>;

/// Per-frame requested state of the four signal inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    /// Back-lights requested.
    pub back: bool,

    /// Stop light requested.
    pub stop: bool,

    /// Left turn signal requested.
    pub left: bool,

    /// Right turn signal requested.
    pub right: bool,
}

impl InputState {
    /// Creates an input state from the four signal levels.
    #[inline]
    pub const fn new(back: bool, stop: bool, left: bool, right: bool) -> Self {
        Self {
            back,
            stop,
            left,
            right,
        }
    }

    /// Returns true if any input differs from `previous`.
    #[inline]
    pub fn changed_from(&self, previous: &InputState) -> bool {
        self != previous
    }

    /// Returns true if either turn input differs from `previous`.
    #[inline]
    pub fn turn_changed_from(&self, previous: &InputState) -> bool {
        self.left != previous.left || self.right != previous.right
    }

    /// The turn signal to render. Left wins when both are asserted.
    #[inline]
    pub fn turn(&self) -> Option<TurnSide> {
        if self.left {
            Some(TurnSide::Left)
        } else if self.right {
            Some(TurnSide::Right)
        } else {
            None
        }
    }
}

/// Which end of the strip a turn signal is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnSide {
    /// Start of the strip (index 0).
    Left,

    /// End of the strip (index N-1).
    Right,
}

/// Which electrical level on an input line means "requested".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// A high reading means requested.
    #[default]
    High,

    /// A low reading means requested.
    Low,
}

impl ActiveLevel {
    /// Maps a pin reading to the requested state.
    #[inline]
    pub fn is_active(self, pin_is_high: bool) -> bool {
        match self {
            ActiveLevel::High => pin_is_high,
            ActiveLevel::Low => !pin_is_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_changes_ignore_back_and_stop() {
        let previous = InputState::new(false, false, true, false);
        let current = InputState::new(true, true, true, false);

        assert!(current.changed_from(&previous));
        assert!(!current.turn_changed_from(&previous));
    }

    #[test]
    fn left_wins_when_both_turns_requested() {
        let both = InputState::new(false, false, true, true);
        assert_eq!(both.turn(), Some(TurnSide::Left));
        assert_eq!(InputState::new(false, false, false, true).turn(), Some(TurnSide::Right));
        assert_eq!(InputState::default().turn(), None);
    }

    #[test]
    fn active_level_inverts_low_wiring() {
        assert!(ActiveLevel::High.is_active(true));
        assert!(!ActiveLevel::High.is_active(false));
        assert!(ActiveLevel::Low.is_active(false));
        assert!(!ActiveLevel::Low.is_active(true));
    }
}
