use smart_leds::{RGB8, SmartLedsWrite};
use vehicle_lights::{LedStrip, Rgb};

/// `LedStrip` over any smart-leds driver taking 8-bit RGB
///
/// Write errors are dropped; the next frame redraws the whole strip.
pub struct SmartStrip<W> {
    driver: W,
    errors: u32,
}

impl<W> SmartStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(driver: W) -> Self {
        Self { driver, errors: 0 }
    }

    /// Number of frames the driver refused
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<W> LedStrip for SmartStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, pixels: &[Rgb]) {
        let colors = pixels.iter().map(|p| RGB8::new(p.red, p.green, p.blue));
        if self.driver.write(colors).is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }
}
