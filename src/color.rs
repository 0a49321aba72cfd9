//! Color conversion and gamma correction helpers.
//!
//! Commands carry colors either as HSV floats (hue in turns, 0.0-1.0) or as
//! 8-bit RGB integers. Everything that reaches the strip ends up as
//! `palette::Srgb<u8>`; the HSV path additionally runs through a fixed gamma
//! lookup table so low brightness values stay perceptually even.

use libm::powf;
use palette::{FromColor, Hsv, Srgb};

/// Exponent of the gamma curve (the common WS2812 value, 1/0.45 ≈ 2.22).
const GAMMA_EXPONENT: f32 = 1.0 / 0.45;

/// Fixed 256-entry lookup table mapping linear 8-bit channel values to
/// gamma-corrected output values.
///
/// Built once at construction; `correct` is then a per-channel table read.
/// Each channel is corrected independently.
pub struct GammaTable {
    table: [u8; 256],
}

impl GammaTable {
    /// Precomputes the lookup table.
    pub fn new() -> Self {
        let mut table = [0u8; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            let unit = value as f32 / 255.0;
            *entry = (255.0 * powf(unit, GAMMA_EXPONENT) + 0.5) as u8;
        }
        Self { table }
    }

    /// Applies gamma correction to a single channel value.
    #[inline]
    pub fn correct_channel(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Applies gamma correction to each channel of a color independently.
    #[inline]
    pub fn correct(&self, color: Srgb<u8>) -> Srgb<u8> {
        Srgb::new(
            self.correct_channel(color.red),
            self.correct_channel(color.green),
            self.correct_channel(color.blue),
        )
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an RGB color from HSV components with hue given in turns
/// (0.0-1.0 covers the full color wheel).
///
/// No input validation is performed; out-of-range saturation or value pass
/// through to [`quantize`], which saturates.
#[inline]
pub fn hsv(hue_turns: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue_turns * 360.0, saturation, value);
    Srgb::from_color(hsv)
}

/// Converts a floating-point color to 8-bit channels, clamping each channel
/// into [0.0, 1.0] before scaling and rounding.
#[inline]
pub fn quantize(color: Srgb) -> Srgb<u8> {
    Srgb::new(
        quantize_channel(color.red),
        quantize_channel(color.green),
        quantize_channel(color.blue),
    )
}

#[inline]
fn quantize_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_preserves_endpoints() {
        let gamma = GammaTable::new();
        assert_eq!(gamma.correct_channel(0), 0);
        assert_eq!(gamma.correct_channel(255), 255);
    }

    #[test]
    fn gamma_is_monotonic() {
        let gamma = GammaTable::new();
        for value in 1..=255u16 {
            assert!(
                gamma.correct_channel(value as u8) >= gamma.correct_channel((value - 1) as u8)
            );
        }
    }

    #[test]
    fn gamma_darkens_midtones() {
        let gamma = GammaTable::new();
        // pow(0.5, 2.22) ≈ 0.214, so mid grey maps well below linear
        assert!(gamma.correct_channel(128) < 64);
    }

    #[test]
    fn gamma_applies_per_channel() {
        let gamma = GammaTable::new();
        let corrected = gamma.correct(Srgb::new(0u8, 128, 255));
        assert_eq!(corrected.red, 0);
        assert_eq!(corrected.green, gamma.correct_channel(128));
        assert_eq!(corrected.blue, 255);
    }

    #[test]
    fn hsv_zero_hue_is_red() {
        let red = quantize(hsv(0.0, 1.0, 1.0));
        assert_eq!((red.red, red.green, red.blue), (255, 0, 0));
    }

    #[test]
    fn hsv_hue_is_in_turns() {
        // One third of a turn is green
        let green = quantize(hsv(1.0 / 3.0, 1.0, 1.0));
        assert_eq!((green.red, green.green, green.blue), (0, 255, 0));
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        let grey = quantize(hsv(0.7, 0.0, 0.5));
        assert_eq!(grey.red, grey.green);
        assert_eq!(grey.green, grey.blue);
    }

    #[test]
    fn quantize_saturates_out_of_range_values() {
        let clamped = quantize(Srgb::new(1.5, -0.5, 0.5));
        assert_eq!(clamped.red, 255);
        assert_eq!(clamped.green, 0);
        assert_eq!(clamped.blue, 128);
    }
}
