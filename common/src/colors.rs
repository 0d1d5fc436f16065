//! Color constants and HSV helpers for the LED matrix.
//!
//! The matrix is driven in 24-bit color, so everything here works on
//! `Rgb888`. Hue is an 8-bit wheel (0..=255) the way addressable-LED code
//! usually expresses it; callers wrap hues with `% 255`.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// All LEDs off.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Cursor color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

pub const RED: Rgb888 = Rgb888::RED;
pub const GREEN: Rgb888 = Rgb888::GREEN;
pub const BLUE: Rgb888 = Rgb888::BLUE;

/// Engine glow of the brightest spaceship frame.
pub const ORANGE: Rgb888 = Rgb888::new(255, 165, 0);

/// Dim white used by the test patterns so a full panel stays within budget.
pub const DIM_WHITE: Rgb888 = Rgb888::new(60, 60, 60);

// =============================================================================
// HSV Conversion
// =============================================================================

/// Convert an 8-bit HSV triple to RGB.
///
/// Six 43-step hue regions with integer interpolation.
pub const fn hsv(
    hue: u8,
    sat: u8,
    val: u8,
) -> Rgb888 {
    if sat == 0 {
        return Rgb888::new(val, val, val);
    }

    let h = hue as u16;
    let s = sat as u16;
    let v = val as u16;

    let region = h / 43;
    let remainder = (h - region * 43) * 6;

    let p = (v * (255 - s)) >> 8;
    let q = (v * (255 - ((s * remainder) >> 8))) >> 8;
    let t = (v * (255 - ((s * (255 - remainder)) >> 8))) >> 8;

    let (r, g, b) = match region {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb888::new(r as u8, g as u8, b as u8)
}

/// Scale a color by `brightness / 256`, i.e. `fade_to_black_by(255 - brightness)`.
#[inline]
pub fn scale(
    color: Rgb888,
    brightness: u8,
) -> Rgb888 {
    let k = brightness as u16 + 1;
    Rgb888::new(
        ((color.r() as u16 * k) >> 8) as u8,
        ((color.g() as u16 * k) >> 8) as u8,
        ((color.b() as u16 * k) >> 8) as u8,
    )
}

/// Dim a color by `amount / 256`.
#[inline]
pub fn fade_to_black_by(
    color: Rgb888,
    amount: u8,
) -> Rgb888 {
    scale(color, 255 - amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_zero_saturation_is_gray() {
        assert_eq!(hsv(123, 0, 80), Rgb888::new(80, 80, 80));
    }

    #[test]
    fn test_hsv_primary_hues() {
        let red = hsv(0, 255, 255);
        assert!(red.r() > 250 && red.g() < 5 && red.b() < 5);

        let green = hsv(86, 255, 255);
        assert!(green.g() > 250 && green.r() < 10);

        let blue = hsv(172, 255, 255);
        assert!(blue.b() > 250 && blue.r() < 10);
    }

    #[test]
    fn test_hsv_value_zero_is_black() {
        assert_eq!(hsv(40, 255, 0), BLACK);
    }

    #[test]
    fn test_scale_full_and_zero() {
        assert_eq!(scale(WHITE, 255), WHITE);
        assert_eq!(scale(WHITE, 0), Rgb888::new(0, 0, 0));
    }

    #[test]
    fn test_fade_to_black_by() {
        let faded = fade_to_black_by(Rgb888::new(200, 100, 50), 128);
        assert!(faded.r() < 200 && faded.r() > 90);
        assert_eq!(fade_to_black_by(RED, 0), RED);
    }
}
