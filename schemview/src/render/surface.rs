//! Drawing-surface capability consumed by the renderer.
//!
//! A surface behaves like a 2D canvas context: it has a current affine
//! transform (translate + uniform scale) and current style state, both saved
//! and restored together by `save`/`restore`.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            6 => Some(Self::rgb(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Monospace,
    SansSerif,
}

impl FontFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Monospace => "monospace",
            FontFamily::SansSerif => "sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub family: FontFamily,
}

impl Font {
    pub const fn new(size: f64, family: FontFamily) -> Self {
        Self { size, family }
    }
}

/// Primitive drawing operations. Coordinates are in the surface's current
/// (transformed) space.
pub trait DrawSurface {
    /// Whether a drawing context is attached. Drawing onto an unavailable
    /// surface is skipped by the renderer.
    fn is_available(&self) -> bool {
        true
    }

    /// Size in device pixels.
    fn size(&self) -> (f64, f64);

    /// Reset the whole surface to its background.
    fn clear(&mut self);

    /// Push transform and style state.
    fn save(&mut self);

    /// Pop transform and style state.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn scale(&mut self, factor: f64);

    fn set_stroke_color(&mut self, color: Color);

    fn set_fill_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    fn set_font(&mut self, font: Font);

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }
    fn size(&self) -> (f64, f64) {
        (**self).size()
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn save(&mut self) {
        (**self).save()
    }
    fn restore(&mut self) {
        (**self).restore()
    }
    fn translate(&mut self, dx: f64, dy: f64) {
        (**self).translate(dx, dy)
    }
    fn scale(&mut self, factor: f64) {
        (**self).scale(factor)
    }
    fn set_stroke_color(&mut self, color: Color) {
        (**self).set_stroke_color(color)
    }
    fn set_fill_color(&mut self, color: Color) {
        (**self).set_fill_color(color)
    }
    fn set_line_width(&mut self, width: f64) {
        (**self).set_line_width(width)
    }
    fn set_font(&mut self, font: Font) {
        (**self).set_font(font)
    }
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        (**self).stroke_line(x1, y1, x2, y2)
    }
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        (**self).stroke_rect(x, y, width, height)
    }
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        (**self).fill_circle(cx, cy, radius)
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        (**self).fill_text(text, x, y)
    }
}

/// Saves surface state on creation and restores it on drop, so every push is
/// matched by exactly one pop on every exit path.
pub struct ScopedTransform<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> ScopedTransform<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for ScopedTransform<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for ScopedTransform<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for ScopedTransform<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
