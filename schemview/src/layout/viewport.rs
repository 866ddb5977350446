//! Camera state: pan offset plus uniform zoom.
//!
//! The world-to-screen transform is `screen = world * zoom + pan`. A viewport
//! is a value: every interaction builds a new one, and zoom is clamped to
//! [`MIN_ZOOM`, `MAX_ZOOM`] by every constructor.

use serde::Serialize;

use crate::render::surface::DrawSurface;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplier for one toolbar zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Clamp a zoom factor into range. NaN falls back to 1.0.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        1.0
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl Viewport {
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Self {
        Self {
            pan_x,
            pan_y,
            zoom: clamp_zoom(zoom),
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.pan_x + dx, self.pan_y + dy, self.zoom)
    }

    /// Multiply zoom by `factor`, leaving pan untouched.
    ///
    /// The focal point is accepted but ignored, so content drifts relative to
    /// the cursor. [`Viewport::zoom_at_focus`] keeps the focal point fixed.
    pub fn zoom_at(&self, factor: f64, _center_x: f64, _center_y: f64) -> Self {
        Self::new(self.pan_x, self.pan_y, self.zoom * factor)
    }

    /// Multiply zoom by `factor` and adjust pan so that the world point under
    /// the screen position `(focus_x, focus_y)` stays under it.
    pub fn zoom_at_focus(&self, factor: f64, focus_x: f64, focus_y: f64) -> Self {
        let zoom = clamp_zoom(self.zoom * factor);
        // Effective ratio after clamping, so the focus holds at the limits too.
        let ratio = zoom / self.zoom;
        Self::new(
            focus_x - (focus_x - self.pan_x) * ratio,
            focus_y - (focus_y - self.pan_y) * ratio,
            zoom,
        )
    }

    pub fn zoom_in(&self) -> Self {
        Self::new(self.pan_x, self.pan_y, self.zoom * ZOOM_STEP)
    }

    pub fn zoom_out(&self) -> Self {
        Self::new(self.pan_x, self.pan_y, self.zoom / ZOOM_STEP)
    }

    /// Mouse-wheel step: scrolling down (positive delta) zooms out by 10%,
    /// anything else zooms in by 10%.
    pub fn wheel(&self, delta_y: f64) -> Self {
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        Self::new(self.pan_x, self.pan_y, self.zoom * factor)
    }

    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.pan_x, y * self.zoom + self.pan_y)
    }

    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        )
    }

    /// Compose this viewport onto the surface's current transform:
    /// translate by the pan first, then scale by the zoom.
    pub fn apply<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.translate(self.pan_x, self.pan_y);
        surface.scale(self.zoom);
    }
}
