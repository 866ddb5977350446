//! SVG backend: turns draw calls into a standalone SVG document.
//!
//! Transforms are resolved on the Rust side. Each primitive is emitted in
//! device coordinates with stroke widths and font sizes scaled by the current
//! zoom, which is exact because the transform is translate + uniform scale.

use std::fmt::Write as _;

use crate::render::surface::{Color, DrawSurface, Font, FontFamily};

#[derive(Debug, Clone, Copy)]
struct State {
    scale: f64,
    tx: f64,
    ty: f64,
    stroke: Color,
    fill: Color,
    line_width: f64,
    font: Font,
}

impl Default for State {
    fn default() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
            stroke: Color::BLACK,
            fill: Color::BLACK,
            line_width: 1.0,
            font: Font::new(10.0, FontFamily::SansSerif),
        }
    }
}

impl State {
    fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.tx, y * self.scale + self.ty)
    }

    fn len(&self, v: f64) -> f64 {
        v * self.scale
    }
}

pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Color,
    state: State,
    stack: Vec<State>,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_background(width, height, Color::WHITE)
    }

    pub fn with_background(width: f64, height: f64, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            state: State::default(),
            stack: Vec::new(),
            body: String::new(),
        }
    }

    /// Number of primitives emitted since the last clear.
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.width),
            h = num(self.height),
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.body.clear();
        let _ = writeln!(
            self.body,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            num(self.width),
            num(self.height),
            self.background,
        );
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.tx += dx * self.state.scale;
        self.state.ty += dy * self.state.scale;
    }

    fn scale(&mut self, factor: f64) {
        self.state.scale *= factor;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let s = self.state;
        let (ax, ay) = s.map(x1, y1);
        let (bx, by) = s.map(x2, y2);
        let _ = writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            num(ax),
            num(ay),
            num(bx),
            num(by),
            s.stroke,
            num(s.len(s.line_width)),
        );
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let s = self.state;
        let (rx, ry) = s.map(x, y);
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            num(rx),
            num(ry),
            num(s.len(width)),
            num(s.len(height)),
            s.stroke,
            num(s.len(s.line_width)),
        );
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let s = self.state;
        let (x, y) = s.map(cx, cy);
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(s.len(radius)),
            s.fill,
        );
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let s = self.state;
        let (tx, ty) = s.map(x, y);
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
            num(tx),
            num(ty),
            s.font.family.as_str(),
            num(s.len(s.font.size)),
            s.fill,
            escape(text),
        );
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Three decimals, no trailing zeros, no negative zero.
fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 || !rounded.is_finite() {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
