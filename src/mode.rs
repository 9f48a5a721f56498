//! Boot-time mode selection.

use crate::buffer::PixelBuffer;
use crate::config::LightsConfig;
use crate::time::TimeDuration;
use crate::types::InputState;

/// What the device runs after boot. Chosen once and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    /// Normal signal-light loop.
    Lights,

    /// Access point and firmware upload; never returns to the lights.
    Update,
}

impl BootMode {
    /// Picks the mode from the inputs sampled at boot.
    ///
    /// Update mode needs back and stop held together and an access point in
    /// the configuration.
    pub fn select<D: TimeDuration>(inputs: &InputState, config: &LightsConfig<D>) -> Self {
        let mode = if inputs.back && inputs.stop && config.access_point().is_some() {
            BootMode::Update
        } else {
            BootMode::Lights
        };

        info!("boot mode: {}", mode);
        mode
    }

    /// Global brightness for this mode.
    pub fn brightness<D: TimeDuration>(self, config: &LightsConfig<D>) -> u8 {
        match self {
            BootMode::Lights => config.brightness(),
            BootMode::Update => config.status_brightness(),
        }
    }

    /// Paints the mode's entry frame: black for the lights, solid configure
    /// color for update mode.
    pub fn render_entry<D: TimeDuration, const N: usize>(
        self,
        buffer: &mut PixelBuffer<N>,
        config: &LightsConfig<D>,
    ) {
        match self {
            BootMode::Lights => buffer.clear(),
            BootMode::Update => buffer.fill_solid(config.configure_color()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessPointConfig;
    use crate::mock_time::Millis;

    fn capable() -> LightsConfig<Millis> {
        LightsConfig::builder()
            .access_point(AccessPointConfig::default())
            .build()
            .unwrap()
    }

    #[test]
    fn back_and_stop_enter_update_on_capable_hardware() {
        let inputs = InputState::new(true, true, false, false);
        assert_eq!(BootMode::select(&inputs, &capable()), BootMode::Update);
    }

    #[test]
    fn incapable_hardware_always_runs_lights() {
        let inputs = InputState::new(true, true, false, false);
        let config = LightsConfig::<Millis>::default();
        assert_eq!(BootMode::select(&inputs, &config), BootMode::Lights);
    }

    #[test]
    fn single_input_runs_lights() {
        let config = capable();
        assert_eq!(
            BootMode::select(&InputState::new(true, false, true, true), &config),
            BootMode::Lights
        );
        assert_eq!(
            BootMode::select(&InputState::new(false, true, false, false), &config),
            BootMode::Lights
        );
    }

    #[test]
    fn update_entry_is_dim_solid_blue() {
        let config = capable();
        let mut buffer = PixelBuffer::<32>::new();

        BootMode::Update.render_entry(&mut buffer, &config);

        assert!(buffer.pixels().iter().all(|&p| p == config.configure_color()));
        assert_eq!(BootMode::Update.brightness(&config), 80);
        assert_eq!(BootMode::Lights.brightness(&config), 255);
    }
}
