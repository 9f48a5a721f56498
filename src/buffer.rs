//! Fixed-length pixel buffer and the strip abstraction it flushes to.

use crate::types::Rgb;

/// Black, the cleared pixel value.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Trait for abstracting addressable LED strip hardware.
///
/// Implement this for your strip driver (WS2812 over PIO, SPI, RMT, etc.).
pub trait LedStrip {
    /// Sends one full frame to the strip.
    ///
    /// `pixels` is already brightness-scaled and in strip order. Implementations
    /// convert to the wire color order themselves and handle any driver errors
    /// internally - this method cannot fail.
    fn write(&mut self, pixels: &[Rgb]);
}

/// Scales a channel by `scale / 256`, treating 255 as full scale.
#[inline]
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (scale as u16 + 1)) >> 8) as u8
}

/// Scales every channel of `color` by `scale8`.
#[inline]
pub fn scale_color(color: Rgb, brightness: u8) -> Rgb {
    Rgb::new(
        scale8(color.red, brightness),
        scale8(color.green, brightness),
        scale8(color.blue, brightness),
    )
}

/// Pixel buffer mirroring a strip of `N` LEDs.
///
/// Index 0 is the first pixel on the data line. The buffer is a fixed array
/// and never reallocates; every write is clamped to `0..N`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> PixelBuffer<N> {
    /// Creates an all-black buffer.
    pub const fn new() -> Self {
        Self { pixels: [BLACK; N] }
    }

    /// Number of pixels.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Sets every pixel to black.
    pub fn clear(&mut self) {
        self.pixels = [BLACK; N];
    }

    /// Sets every pixel to `color`.
    pub fn fill_solid(&mut self, color: Rgb) {
        self.pixels = [color; N];
    }

    /// Overwrites `count` pixels starting at `start`.
    ///
    /// The range is clamped to the buffer; a start past the end writes nothing.
    pub fn fill_range(&mut self, start: usize, count: usize, color: Rgb) {
        let start = start.min(N);
        let end = start.saturating_add(count).min(N);
        self.pixels[start..end].fill(color);
    }

    /// Writes one pixel. Returns false if `index` is out of range.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> bool {
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    /// Returns the pixel at `index`, if in range.
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Draws a progress bar: the leading `floor(fraction * N)` pixels in
    /// `color`, the rest black. `fraction` is clamped to `[0, 1]`.
    pub fn fill_fraction(&mut self, fraction: f32, color: Rgb) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let lit = ((fraction * N as f32) as usize).min(N);

        self.clear();
        self.fill_range(0, lit, color);
    }

    /// Read-only view of the pixels.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Sends the buffer to `strip` at the given global brightness.
    ///
    /// Scaling happens on a copy; the buffer keeps the unscaled colors.
    pub fn flush<S: LedStrip>(&self, strip: &mut S, brightness: u8) {
        if brightness == u8::MAX {
            strip.write(&self.pixels);
            return;
        }

        let mut frame = self.pixels;
        for pixel in frame.iter_mut() {
            *pixel = scale_color(*pixel, brightness);
        }
        strip.write(&frame);
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::vec::Vec;

    const RED: Rgb = Rgb::new(255, 0, 0);

    struct RecordingStrip {
        frames: Vec<Vec<Rgb>>,
    }

    impl LedStrip for RecordingStrip {
        fn write(&mut self, pixels: &[Rgb]) {
            self.frames.push(pixels.to_vec());
        }
    }

    #[test]
    fn fill_range_is_clamped_to_buffer() {
        let mut buffer = PixelBuffer::<8>::new();
        buffer.fill_range(6, 10, RED);

        assert_eq!(buffer.pixel(5), Some(BLACK));
        assert_eq!(buffer.pixel(6), Some(RED));
        assert_eq!(buffer.pixel(7), Some(RED));

        // start past the end and overflowing count are both harmless
        buffer.fill_range(20, 3, RED);
        buffer.fill_range(1, usize::MAX, RED);
        assert!(buffer.pixels()[1..].iter().all(|&p| p == RED));
        assert_eq!(buffer.pixel(0), Some(BLACK));
    }

    #[test]
    fn set_pixel_is_bounds_checked() {
        let mut buffer = PixelBuffer::<4>::new();
        assert!(buffer.set_pixel(3, RED));
        assert!(!buffer.set_pixel(4, RED));
        assert_eq!(buffer.pixel(4), None);
    }

    #[test]
    fn clear_blackens_everything() {
        let mut buffer = PixelBuffer::<4>::new();
        buffer.fill_solid(RED);
        buffer.clear();
        assert!(buffer.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn fill_fraction_rounds_down() {
        let mut buffer = PixelBuffer::<32>::new();
        buffer.fill_fraction(0.5, RED);
        assert_eq!(buffer.pixels().iter().filter(|&&p| p == RED).count(), 16);

        buffer.fill_fraction(0.99, RED);
        assert_eq!(buffer.pixels().iter().filter(|&&p| p == RED).count(), 31);

        buffer.fill_fraction(2.0, RED);
        assert!(buffer.pixels().iter().all(|&p| p == RED));

        buffer.fill_fraction(-1.0, RED);
        assert!(buffer.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn scale8_treats_255_as_identity() {
        assert_eq!(scale8(200, 255), 200);
        assert_eq!(scale8(255, 80), 80);
        assert_eq!(scale8(255, 0), 0);
        assert_eq!(scale8(100, 127), 50);
    }

    #[test]
    fn flush_scales_copy_not_buffer() {
        let mut buffer = PixelBuffer::<2>::new();
        buffer.fill_solid(Rgb::new(255, 127, 0));

        let mut strip = RecordingStrip { frames: Vec::new() };
        buffer.flush(&mut strip, 80);
        buffer.flush(&mut strip, 255);

        assert_eq!(strip.frames[0], [Rgb::new(80, 40, 0); 2]);
        assert_eq!(strip.frames[1], [Rgb::new(255, 127, 0); 2]);
        assert_eq!(buffer.pixel(0), Some(Rgb::new(255, 127, 0)));
    }
}
