//! Startup configuration: pins, colors, chase pattern and timing.

use core::net::Ipv4Addr;

use heapless::Vec;

use crate::time::TimeDuration;
use crate::types::{ActiveLevel, Rgb};

/// Maximum number of pixels in a chase pattern.
pub const MAX_CHASE_LEN: usize = 16;

/// Chase length used by the default configuration.
pub const DEFAULT_TURN_SIZE: usize = 11;

/// Time for a turn chevron to grow from one pixel to full length.
pub const DEFAULT_TURN_CYCLE_MS: u64 = 250;

pub const BACKLIGHT_COLOR: Rgb = Rgb::new(100, 0, 0);
pub const STOP_COLOR: Rgb = Rgb::new(255, 0, 0);
pub const AMBER: Rgb = Rgb::new(255, 127, 0);
pub const CONFIGURE_COLOR: Rgb = Rgb::new(0, 0, 255);
pub const SUCCESS_COLOR: Rgb = Rgb::new(0, 255, 0);
pub const FAILURE_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Ordered colors drawn at a strip end while a turn signal is active.
pub type ChasePattern = Vec<Rgb, MAX_CHASE_LEN>;

/// GPIO numbers for the strip data line and the four inputs.
///
/// The library never touches pins by number. Board adapters read this to
/// wire their drivers, and pass the resulting pins to `PinSampler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub led_data: u8,
    pub back: u8,
    pub stop: u8,
    pub left: u8,
    pub right: u8,
}

impl PinAssignment {
    /// Generic board wiring.
    pub const GENERIC: Self = Self {
        led_data: 2,
        back: 10,
        stop: 9,
        left: 8,
        right: 7,
    };

    /// ESP8266 wiring: D1 data, D5..D8 inputs.
    pub const ESP8266: Self = Self {
        led_data: 5,
        back: 14,
        stop: 12,
        left: 13,
        right: 15,
    };
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self::GENERIC
    }
}

/// Soft access point used by the firmware-update mode.
///
/// Only `update_path` is read here, by [`crate::portal::route`]. The network
/// fields are for the board adapter that brings up the radio, DNS responder
/// and HTTP server. Its presence in [`LightsConfig`] marks the hardware as
/// update-capable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPointConfig {
    pub ssid: &'static str,
    pub passphrase: &'static str,
    pub address: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub netmask: Ipv4Addr,
    /// Port of the catch-all DNS responder.
    pub dns_port: u16,
    pub http_port: u16,
    /// Path served by the firmware upload handler.
    pub update_path: &'static str,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            ssid: "VehicleLights",
            passphrase: "12345678",
            address: Ipv4Addr::new(8, 8, 8, 8),
            gateway: Ipv4Addr::new(8, 8, 8, 8),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            dns_port: 53,
            http_port: 80,
            update_path: "/update",
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Chase pattern has no pixels.
    EmptyChasePattern,

    /// Chase pattern longer than `MAX_CHASE_LEN`.
    ChasePatternCapacityExceeded,

    /// Both turn regions together do not leave room for the body of the strip.
    TurnRegionTooLarge { turn_size: usize, num_leds: usize },

    /// Turn cycle of zero milliseconds.
    ZeroTurnCycle,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyChasePattern => {
                write!(f, "chase pattern must have at least one pixel")
            }
            ConfigError::ChasePatternCapacityExceeded => {
                write!(f, "chase pattern exceeds {} pixels", MAX_CHASE_LEN)
            }
            ConfigError::TurnRegionTooLarge {
                turn_size,
                num_leds,
            } => {
                write!(
                    f,
                    "two turn regions of {} pixels do not fit a strip of {} pixels",
                    turn_size, num_leds
                )
            }
            ConfigError::ZeroTurnCycle => {
                write!(f, "turn cycle must be longer than zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated controller configuration.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `fugit::MicrosDurationU64` wrapper)
#[derive(Debug, Clone)]
pub struct LightsConfig<D: TimeDuration> {
    pins: PinAssignment,
    active_level: ActiveLevel,
    backlight_color: Rgb,
    stop_color: Rgb,
    chase: ChasePattern,
    turn_cycle: D,
    brightness: u8,
    status_brightness: u8,
    configure_color: Rgb,
    progress_color: Rgb,
    success_color: Rgb,
    failure_color: Rgb,
    access_point: Option<AccessPointConfig>,
}

impl<D: TimeDuration> LightsConfig<D> {
    /// Creates a new configuration builder seeded with the defaults.
    pub fn builder() -> LightsConfigBuilder<D> {
        LightsConfigBuilder::new()
    }

    /// Checks that the turn regions fit a strip of `num_leds` pixels.
    ///
    /// The backlight fills `num_leds - 2 * turn_size` pixels, so this must hold
    /// before any frame is composited.
    pub fn validate_for(&self, num_leds: usize) -> Result<(), ConfigError> {
        let turn_size = self.turn_size();
        if turn_size * 2 >= num_leds {
            return Err(ConfigError::TurnRegionTooLarge {
                turn_size,
                num_leds,
            });
        }
        Ok(())
    }

    /// Number of pixels in the chase pattern.
    #[inline]
    pub fn turn_size(&self) -> usize {
        self.chase.len()
    }

    /// Interval between two progress steps: the turn cycle split evenly over
    /// the chase pixels (integer milliseconds).
    pub fn turn_speed(&self) -> D {
        D::from_millis(self.turn_cycle.as_millis() / self.turn_size() as u64)
    }

    pub fn chase_pattern(&self) -> &[Rgb] {
        &self.chase
    }

    pub fn pins(&self) -> PinAssignment {
        self.pins
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    pub fn backlight_color(&self) -> Rgb {
        self.backlight_color
    }

    pub fn stop_color(&self) -> Rgb {
        self.stop_color
    }

    pub fn turn_cycle(&self) -> D {
        self.turn_cycle
    }

    /// Global brightness while the lights are running.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Global brightness while the update status is displayed.
    pub fn status_brightness(&self) -> u8 {
        self.status_brightness
    }

    pub fn configure_color(&self) -> Rgb {
        self.configure_color
    }

    pub fn progress_color(&self) -> Rgb {
        self.progress_color
    }

    pub fn success_color(&self) -> Rgb {
        self.success_color
    }

    pub fn failure_color(&self) -> Rgb {
        self.failure_color
    }

    /// Access point settings, present only on update-capable hardware.
    pub fn access_point(&self) -> Option<&AccessPointConfig> {
        self.access_point.as_ref()
    }
}

const _: () = assert!(DEFAULT_TURN_SIZE <= MAX_CHASE_LEN);

impl<D: TimeDuration> Default for LightsConfig<D> {
    fn default() -> Self {
        // Fits: DEFAULT_TURN_SIZE <= MAX_CHASE_LEN is asserted at compile time.
        let chase = ChasePattern::from_slice(&[AMBER; DEFAULT_TURN_SIZE]).unwrap_or_default();

        Self {
            pins: PinAssignment::GENERIC,
            active_level: ActiveLevel::High,
            backlight_color: BACKLIGHT_COLOR,
            stop_color: STOP_COLOR,
            chase,
            turn_cycle: D::from_millis(DEFAULT_TURN_CYCLE_MS),
            brightness: 255,
            status_brightness: 80,
            configure_color: CONFIGURE_COLOR,
            progress_color: CONFIGURE_COLOR,
            success_color: SUCCESS_COLOR,
            failure_color: FAILURE_COLOR,
            access_point: None,
        }
    }
}

/// Builder for constructing validated configurations.
#[derive(Debug)]
pub struct LightsConfigBuilder<D: TimeDuration> {
    config: LightsConfig<D>,
    chase_overflow: bool,
}

impl<D: TimeDuration> LightsConfigBuilder<D> {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            config: LightsConfig::default(),
            chase_overflow: false,
        }
    }

    pub fn pins(mut self, pins: PinAssignment) -> Self {
        self.config.pins = pins;
        self
    }

    pub fn active_level(mut self, level: ActiveLevel) -> Self {
        self.config.active_level = level;
        self
    }

    pub fn backlight_color(mut self, color: Rgb) -> Self {
        self.config.backlight_color = color;
        self
    }

    pub fn stop_color(mut self, color: Rgb) -> Self {
        self.config.stop_color = color;
        self
    }

    /// Replaces the chase pattern. Its length becomes the turn size.
    pub fn chase_pattern(mut self, pattern: &[Rgb]) -> Self {
        self.config.chase.clear();
        self.chase_overflow = self.config.chase.extend_from_slice(pattern).is_err();
        self
    }

    /// Sets how long the chevron takes to grow to full length.
    pub fn turn_cycle(mut self, cycle: D) -> Self {
        self.config.turn_cycle = cycle;
        self
    }

    pub fn brightness(mut self, brightness: u8) -> Self {
        self.config.brightness = brightness;
        self
    }

    pub fn status_brightness(mut self, brightness: u8) -> Self {
        self.config.status_brightness = brightness;
        self
    }

    pub fn configure_color(mut self, color: Rgb) -> Self {
        self.config.configure_color = color;
        self
    }

    pub fn progress_color(mut self, color: Rgb) -> Self {
        self.config.progress_color = color;
        self
    }

    pub fn success_color(mut self, color: Rgb) -> Self {
        self.config.success_color = color;
        self
    }

    pub fn failure_color(mut self, color: Rgb) -> Self {
        self.config.failure_color = color;
        self
    }

    /// Enables update mode with the given access point.
    pub fn access_point(mut self, access_point: AccessPointConfig) -> Self {
        self.config.access_point = Some(access_point);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ChasePatternCapacityExceeded` - Pattern longer than `MAX_CHASE_LEN`
    /// * `EmptyChasePattern` - Pattern has no pixels
    /// * `ZeroTurnCycle` - Turn cycle is zero
    pub fn build(self) -> Result<LightsConfig<D>, ConfigError> {
        if self.chase_overflow {
            return Err(ConfigError::ChasePatternCapacityExceeded);
        }

        if self.config.chase.is_empty() {
            return Err(ConfigError::EmptyChasePattern);
        }

        if self.config.turn_cycle.as_millis() == 0 {
            return Err(ConfigError::ZeroTurnCycle);
        }

        Ok(self.config)
    }
}

impl<D: TimeDuration> Default for LightsConfigBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
