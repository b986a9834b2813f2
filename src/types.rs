// Small value types shared by every part of the canvas.

use std::fmt;

/// One RGBA pixel, straight (non-premultiplied) alpha.
/// alpha = 0 means "nothing here"; it shows as white once flattened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// What an eraser leaves behind. Every fully erased pixel is exactly this value.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Composite over opaque white and drop alpha.
    #[inline]
    pub fn over_white(self) -> [u8; 3] {
        if self.a == 255 {
            return [self.r, self.g, self.b];
        }
        let a = self.a as f32 / 255.0;
        let mix = |c: u8| (c as f32 * a + 255.0 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
        [mix(self.r), mix(self.g), mix(self.b)]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Canvas-local coordinate. Pixel (i, j) is centered on (i as f32, j as f32).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Nearest pixel coordinate (ties round away from zero).
    pub fn to_pixel(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// How a stroke touches the pixels under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StrokeMode {
    /// Normal source-over painting with the brush color.
    #[default]
    Pen,
    /// Pulls alpha toward 0; the brush color is ignored.
    Eraser,
}

/// Paint attributes captured when a gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub color: Rgba,
    pub width: f32,
    pub mode: StrokeMode,
}

impl Brush {
    pub fn pen(color: Rgba, width: f32) -> Self {
        Self { color, width, mode: StrokeMode::Pen }
    }

    pub fn eraser(width: f32) -> Self {
        Self { color: Rgba::TRANSPARENT, width, mode: StrokeMode::Eraser }
    }
}
