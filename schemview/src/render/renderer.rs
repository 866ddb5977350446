//! Schematic renderer.
//!
//! Draw order per call: clear, then inside one scoped transform the grid,
//! wires, components and labels in world space, then the title block overlay
//! in screen space. Strokes and fonts inside the scoped block are divided by
//! the zoom so they keep a constant on-screen size.

use serde::{Deserialize, Serialize};

use crate::layout::bounds::{COMPONENT_HEIGHT, COMPONENT_WIDTH};
use crate::layout::viewport::Viewport;
use crate::parser::schema::*;
use crate::render::surface::{Color, DrawSurface, Font, FontFamily, ScopedTransform};

pub const GRID_SPACING: usize = 100;
/// Fixed world-space grid span, independent of content.
pub const GRID_X_RANGE: (i64, i64) = (-5000, 15000);
pub const GRID_Y_RANGE: (i64, i64) = (-5000, 10000);

/// Offset of a component's name from its anchor.
const NAME_OFFSET: (f64, f64) = (-40.0, 0.0);
/// Vertical offset used for a field whose y coordinate is unplaced.
const FIELD_FALLBACK_DY: f64 = 20.0;
/// Offset of a label's connection dot from the label position.
const LABEL_DOT_OFFSET: (f64, f64) = (-10.0, -5.0);
/// Title block line origin and spacing, in screen pixels.
const TITLE_ORIGIN: (f64, f64) = (10.0, 20.0);
const TITLE_LINE_HEIGHT: f64 = 20.0;

/// Colors and zoom-independent base sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub grid: Color,
    pub wire: Color,
    pub component: Color,
    pub field: Color,
    pub label: Color,
    pub title: Color,
    pub grid_stroke: f64,
    pub wire_stroke: f64,
    pub component_stroke: f64,
    pub component_font_size: f64,
    pub label_font_size: f64,
    pub label_dot_radius: f64,
    /// Absolute size; the title block is not zoomed.
    pub title_font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::rgb(0xe0, 0xe0, 0xe0),
            wire: Color::rgb(0x00, 0xaa, 0x00),
            component: Color::rgb(0xcc, 0x00, 0x00),
            field: Color::rgb(0x00, 0x00, 0xcc),
            label: Color::rgb(0xff, 0x66, 0x00),
            title: Color::rgb(0x33, 0x33, 0x33),
            grid_stroke: 0.5,
            wire_stroke: 2.0,
            component_stroke: 2.0,
            component_font_size: 14.0,
            label_font_size: 12.0,
            label_dot_radius: 3.0,
            title_font_size: 14.0,
        }
    }
}

/// Draws a [`SchematicModel`] through a [`Viewport`] onto a bound surface.
/// Holds no model state between calls.
pub struct SchematicRenderer<S: DrawSurface> {
    surface: S,
    theme: Theme,
    show_grid: bool,
    show_title_block: bool,
}

impl<S: DrawSurface> SchematicRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            theme: Theme::default(),
            show_grid: true,
            show_title_block: true,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn show_title_block(mut self, show: bool) -> Self {
        self.show_title_block = show;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Redraw the whole surface. No-op without a model or without an
    /// available drawing context.
    pub fn draw(&mut self, model: Option<&SchematicModel>, viewport: &Viewport) {
        let Some(model) = model else {
            return;
        };
        if !self.surface.is_available() {
            tracing::debug!("drawing surface unavailable, skipping draw");
            return;
        }

        self.surface.clear();
        {
            let mut scoped = ScopedTransform::new(&mut self.surface);
            viewport.apply(&mut *scoped);

            let zoom = viewport.zoom();
            if self.show_grid {
                draw_grid(&mut *scoped, &self.theme, zoom);
            }
            draw_wires(&mut *scoped, &model.wires, &self.theme, zoom);
            draw_components(&mut *scoped, &model.components, &self.theme, zoom);
            draw_labels(&mut *scoped, &model.labels, &self.theme, zoom);
        }

        if self.show_title_block {
            draw_title_block(&mut self.surface, model, &self.theme);
        }
    }
}

fn draw_grid<S: DrawSurface + ?Sized>(surface: &mut S, theme: &Theme, zoom: f64) {
    let (x_min, x_max) = GRID_X_RANGE;
    let (y_min, y_max) = GRID_Y_RANGE;

    surface.set_stroke_color(theme.grid);
    surface.set_line_width(theme.grid_stroke / zoom);

    for x in (x_min..x_max).step_by(GRID_SPACING) {
        surface.stroke_line(x as f64, y_min as f64, x as f64, y_max as f64);
    }
    for y in (y_min..y_max).step_by(GRID_SPACING) {
        surface.stroke_line(x_min as f64, y as f64, x_max as f64, y as f64);
    }
}

fn draw_wires<S: DrawSurface + ?Sized>(surface: &mut S, wires: &[Wire], theme: &Theme, zoom: f64) {
    surface.set_stroke_color(theme.wire);
    surface.set_line_width(theme.wire_stroke / zoom);

    for wire in wires {
        surface.stroke_line(
            wire.start.x as f64,
            wire.start.y as f64,
            wire.end.x as f64,
            wire.end.y as f64,
        );
    }
}

fn draw_components<S: DrawSurface + ?Sized>(
    surface: &mut S,
    components: &[Component],
    theme: &Theme,
    zoom: f64,
) {
    surface.set_stroke_color(theme.component);
    surface.set_line_width(theme.component_stroke / zoom);
    surface.set_font(Font::new(theme.component_font_size / zoom, FontFamily::Monospace));

    for component in components {
        let Some(anchor) = component.anchor else {
            continue;
        };
        let (x, y) = (anchor.x as f64, anchor.y as f64);

        surface.stroke_rect(
            x - COMPONENT_WIDTH / 2.0,
            y - COMPONENT_HEIGHT / 2.0,
            COMPONENT_WIDTH,
            COMPONENT_HEIGHT,
        );

        surface.set_fill_color(theme.component);
        surface.fill_text(component.display_name(), x + NAME_OFFSET.0, y + NAME_OFFSET.1);

        let mut visible = component.fields.iter().filter(|f| !f.text.is_empty()).peekable();
        if visible.peek().is_some() {
            surface.set_fill_color(theme.field);
            for field in visible {
                let (fx, fy) = field_origin(field, anchor);
                surface.fill_text(&field.text, fx, fy);
            }
        }
    }
}

/// Where a field's text goes. A zero coordinate means the field was never
/// placed on that axis and falls back relative to the anchor.
fn field_origin(field: &Field, anchor: Point) -> (f64, f64) {
    let x = if field.position.x != 0 { field.position.x } else { anchor.x };
    let y = if field.position.y != 0 {
        field.position.y as f64
    } else {
        anchor.y as f64 + FIELD_FALLBACK_DY
    };
    (x as f64, y)
}

fn draw_labels<S: DrawSurface + ?Sized>(surface: &mut S, labels: &[Label], theme: &Theme, zoom: f64) {
    surface.set_fill_color(theme.label);
    surface.set_font(Font::new(theme.label_font_size / zoom, FontFamily::Monospace));

    for label in labels {
        let (x, y) = (label.position.x as f64, label.position.y as f64);
        surface.fill_text(&label.text, x, y);
        surface.fill_circle(
            x + LABEL_DOT_OFFSET.0,
            y + LABEL_DOT_OFFSET.1,
            theme.label_dot_radius / zoom,
        );
    }
}

fn draw_title_block<S: DrawSurface + ?Sized>(surface: &mut S, model: &SchematicModel, theme: &Theme) {
    surface.set_fill_color(theme.title);
    surface.set_font(Font::new(theme.title_font_size, FontFamily::SansSerif));

    let (x, y) = TITLE_ORIGIN;
    let lines = [
        format!("Title: {}", model.title),
        format!("Rev: {}", model.revision),
        format!("Date: {}", model.date),
    ];
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, x, y + i as f64 * TITLE_LINE_HEIGHT);
    }
}
