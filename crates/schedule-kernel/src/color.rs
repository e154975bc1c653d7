//! Deterministic per-subject colors.
//!
//! Each subject code hashes to a hue; saturation and lightness are fixed so the
//! palette stays pastel. The assignor caches every color it hands out, so a
//! subject keeps the same color for as long as the assignor lives.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Saturation of every assigned color, in percent.
pub const SATURATION: u8 = 70;

/// Lightness of every assigned color, in percent.
pub const LIGHTNESS: u8 = 80;

/// An HSL color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Degrees, in `[0, 360)`.
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Color {
    /// A color on the fixed pastel band.
    pub fn pastel(hue: u16) -> Self {
        Self {
            hue: hue % 360,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        }
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb(&self) -> [u8; 3] {
        let h = f64::from(self.hue % 360) / 60.0;
        let s = f64::from(self.saturation.min(100)) / 100.0;
        let l = f64::from(self.lightness.min(100)) / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        [channel(r), channel(g), channel(b)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// 32-bit rolling string hash: `hash = unit + ((hash << 5) - hash)`.
///
/// Runs over UTF-16 code units with wrapping signed arithmetic, so the same
/// code always hashes the same way whatever its script.
pub fn code_hash(code: &str) -> i32 {
    code.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add((hash << 5).wrapping_sub(hash))
    })
}

/// Hue for a subject code, normalized into `[0, 360)`.
pub fn code_hue(code: &str) -> u16 {
    code_hash(code).rem_euclid(360) as u16
}

/// Cached mapping from subject code to color.
#[derive(Debug, Clone, Default)]
pub struct ColorAssignor {
    assigned: HashMap<String, Color>,
}

impl ColorAssignor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `code`, computing and caching it on first use.
    pub fn color_for(&mut self, code: &str) -> Color {
        if let Some(color) = self.assigned.get(code) {
            return *color;
        }
        let color = Color::pastel(code_hue(code));
        self.assigned.insert(code.to_string(), color);
        color
    }

    /// Peek without assigning.
    pub fn get(&self, code: &str) -> Option<Color> {
        self.assigned.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
