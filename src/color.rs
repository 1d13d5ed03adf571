//! Color helpers
//!
//! Hex formatting, alpha blending against the panel background, and
//! quantization for terminals without TrueColor.

use ratatui::style::Color;

use crate::terminal_capabilities::ColorSupport;

/// RGB color type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert RGB to perceptual luminance (0.0 to 1.0)
///
/// Uses ITU-R BT.709 coefficients.
pub fn rgb_to_luminance(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * (r as f32 / 255.0) + 0.7152 * (g as f32 / 255.0) + 0.0722 * (b as f32 / 255.0)
}

/// Interpolate between two colors
pub fn interpolate_color(start: Rgb, end: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    Rgb {
        r: ((1.0 - t) * start.r as f32 + t * end.r as f32).round() as u8,
        g: ((1.0 - t) * start.g as f32 + t * end.g as f32).round() as u8,
        b: ((1.0 - t) * start.b as f32 + t * end.b as f32).round() as u8,
    }
}

/// Composite `fg` at `alpha` opacity over an opaque `bg`
pub fn blend_over(fg: Rgb, bg: Rgb, alpha: f64) -> Rgb {
    interpolate_color(bg, fg, alpha as f32)
}

/// Quantize RGB to ANSI 256-color palette
pub fn quantize_to_ansi256(rgb: Rgb) -> u8 {
    let Rgb { r, g, b } = rgb;

    // Near-gray values map onto the grayscale ramp (232-255)
    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_diff = (r as i16 - avg as i16)
        .abs()
        .max((g as i16 - avg as i16).abs())
        .max((b as i16 - avg as i16).abs());

    if gray_diff < 10 {
        let gray_index = (avg as f32 / 255.0 * 23.0).round() as u8;
        return 232 + gray_index;
    }

    // 6x6x6 color cube (16-231)
    let r_index = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_index = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_index = (b as f32 / 255.0 * 5.0).round() as u8;

    16 + 36 * r_index + 6 * g_index + b_index
}

/// Closest of the 16 basic terminal colors
pub fn quantize_to_ansi16(rgb: Rgb) -> Color {
    let luminance = rgb_to_luminance(rgb.r, rgb.g, rgb.b);
    let bright = luminance > 0.5;

    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let saturation = if max > 0.0 { (max - min) / max } else { 0.0 };

    if saturation < 0.2 {
        return if luminance > 0.7 {
            Color::White
        } else if luminance > 0.3 {
            Color::Gray
        } else {
            Color::Black
        };
    }

    // A secondary channel close to the dominant one shifts the hue
    let mixed = |secondary: f32| secondary > max * 0.6;
    let (dim, light) = if r >= g && r >= b {
        if mixed(g) {
            (Color::Yellow, Color::LightYellow)
        } else {
            (Color::Red, Color::LightRed)
        }
    } else if g >= b {
        if mixed(b) {
            (Color::Cyan, Color::LightCyan)
        } else {
            (Color::Green, Color::LightGreen)
        }
    } else if mixed(r) {
        (Color::Magenta, Color::LightMagenta)
    } else {
        (Color::Blue, Color::LightBlue)
    };

    if bright {
        light
    } else {
        dim
    }
}

/// Terminal color for `rgb` at the given support level
pub fn to_terminal_color(rgb: Rgb, support: ColorSupport) -> Color {
    match support {
        ColorSupport::NoColor => Color::Reset,
        ColorSupport::Color16 => quantize_to_ansi16(rgb),
        ColorSupport::Color256 => Color::Indexed(quantize_to_ansi256(rgb)),
        ColorSupport::TrueColor => Color::Rgb(rgb.r, rgb.g, rgb.b),
    }
}
