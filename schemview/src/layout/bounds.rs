//! World-space bounding box and fit-to-view camera.

use serde::Serialize;

use crate::layout::viewport::{clamp_zoom, Viewport};
use crate::parser::schema::SchematicModel;

/// Approximate footprint of a component symbol, centered on its anchor.
pub const COMPONENT_WIDTH: f64 = 100.0;
pub const COMPONENT_HEIGHT: f64 = 60.0;

/// Approximate label text extent per character, and its height.
pub const LABEL_CHAR_WIDTH: f64 = 8.0;
pub const LABEL_HEIGHT: f64 = 12.0;

/// Margin kept between the fitted content and the container edge.
pub const DEFAULT_PADDING: f64 = 40.0;

/// Axis-aligned box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Returned for models without any drawable geometry.
    pub const DEFAULT: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 1000.0,
    };

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Zero width or height: no finite scale-to-fit exists.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Running min/max over contributed points.
#[derive(Debug, Default)]
struct Extent {
    min: Option<(f64, f64)>,
    max: Option<(f64, f64)>,
}

impl Extent {
    fn include(&mut self, x: f64, y: f64) {
        self.min = Some(match self.min {
            Some((mx, my)) => (mx.min(x), my.min(y)),
            None => (x, y),
        });
        self.max = Some(match self.max {
            Some((mx, my)) => (mx.max(x), my.max(y)),
            None => (x, y),
        });
    }

    fn into_bounds(self) -> Option<Bounds> {
        let ((min_x, min_y), (max_x, max_y)) = (self.min?, self.max?);
        Some(Bounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

/// Bounding box over every component footprint, wire endpoint and label.
pub fn compute_bounds(model: &SchematicModel) -> Bounds {
    let mut extent = Extent::default();
    let (half_w, half_h) = (COMPONENT_WIDTH / 2.0, COMPONENT_HEIGHT / 2.0);

    for anchor in model.components.iter().filter_map(|c| c.anchor) {
        let (x, y) = (anchor.x as f64, anchor.y as f64);
        extent.include(x - half_w, y - half_h);
        extent.include(x + half_w, y + half_h);
    }

    for wire in &model.wires {
        extent.include(wire.start.x as f64, wire.start.y as f64);
        extent.include(wire.end.x as f64, wire.end.y as f64);
    }

    for label in &model.labels {
        let (x, y) = (label.position.x as f64, label.position.y as f64);
        let text_width = label.text.chars().count() as f64 * LABEL_CHAR_WIDTH;
        extent.include(x, y);
        extent.include(x + text_width, y + LABEL_HEIGHT);
    }

    extent.into_bounds().unwrap_or(Bounds::DEFAULT)
}

/// Viewport that centers the model's bounds in a `width` x `height`
/// container, scaled to fit inside `padding` on every side.
pub fn fit_viewport(model: &SchematicModel, width: f64, height: f64, padding: f64) -> Viewport {
    let bounds = compute_bounds(model);

    if bounds.is_degenerate() {
        tracing::debug!(?bounds, "degenerate bounds, centering at zoom 1");
        return Viewport::new(width / 2.0, height / 2.0, 1.0);
    }

    let available_width = width - padding * 2.0;
    let available_height = height - padding * 2.0;
    let scale_x = available_width / bounds.width;
    let scale_y = available_height / bounds.height;
    let zoom = clamp_zoom(scale_x.min(scale_y));

    let (center_x, center_y) = bounds.center();
    let pan_x = width / 2.0 - center_x * zoom;
    let pan_y = height / 2.0 - center_y * zoom;

    tracing::debug!(?bounds, zoom, pan_x, pan_y, "fitted viewport");
    Viewport::new(pan_x, pan_y, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::*;

    fn component_at(x: i64, y: i64) -> Component {
        Component {
            library: "Device:R".to_string(),
            name: "R1".to_string(),
            anchor: Some(Point::new(x, y)),
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_empty_model_uses_default_bounds() {
        assert_eq!(compute_bounds(&SchematicModel::default()), Bounds::DEFAULT);
    }

    #[test]
    fn test_unanchored_components_contribute_nothing() {
        let model = SchematicModel {
            components: vec![Component::default()],
            ..Default::default()
        };
        assert_eq!(compute_bounds(&model), Bounds::DEFAULT);
    }

    #[test]
    fn test_component_footprint() {
        let model = SchematicModel {
            components: vec![component_at(100, 200)],
            ..Default::default()
        };
        assert_eq!(
            compute_bounds(&model),
            Bounds { x: 50.0, y: 170.0, width: 100.0, height: 60.0 }
        );
    }

    #[test]
    fn test_wires_and_labels() {
        let model = SchematicModel {
            wires: vec![Wire { start: Point::new(-100, 0), end: Point::new(300, 400) }],
            labels: vec![Label {
                position: Point::new(350, 500),
                text: "CLK".to_string(),
                orientation: 0,
            }],
            ..Default::default()
        };
        let bounds = compute_bounds(&model);
        assert_eq!(bounds.x, -100.0);
        assert_eq!(bounds.y, 0.0);
        assert_eq!(bounds.right(), 350.0 + 24.0);
        assert_eq!(bounds.bottom(), 512.0);
    }

    #[test]
    fn test_label_width_counts_chars() {
        let model = SchematicModel {
            labels: vec![Label {
                position: Point::new(0, 0),
                text: "µA".to_string(),
                orientation: 0,
            }],
            ..Default::default()
        };
        assert_eq!(compute_bounds(&model).width, 16.0);
    }

    #[test]
    fn test_fit_degenerate_centers_container() {
        let model = SchematicModel {
            wires: vec![Wire { start: Point::new(5, 5), end: Point::new(5, 5) }],
            ..Default::default()
        };
        for (w, h) in [(800.0, 600.0), (10.0, 4000.0)] {
            let vp = fit_viewport(&model, w, h, DEFAULT_PADDING);
            assert_eq!(vp.zoom(), 1.0);
            assert_eq!((vp.pan_x(), vp.pan_y()), (w / 2.0, h / 2.0));
        }
    }

    #[test]
    fn test_fit_centers_bounds() {
        let model = SchematicModel {
            wires: vec![Wire { start: Point::new(0, 0), end: Point::new(1000, 500) }],
            ..Default::default()
        };
        let vp = fit_viewport(&model, 1080.0, 1080.0, 40.0);
        // available 1000x1000 → min(1.0, 2.0)
        assert_eq!(vp.zoom(), 1.0);
        let (cx, cy) = vp.to_screen(500.0, 250.0);
        assert_eq!((cx, cy), (540.0, 540.0));
    }

    #[test]
    fn test_fit_clamps_zoom() {
        let tiny = SchematicModel {
            wires: vec![Wire { start: Point::new(0, 0), end: Point::new(2, 2) }],
            ..Default::default()
        };
        assert_eq!(fit_viewport(&tiny, 1000.0, 1000.0, 40.0).zoom(), 5.0);

        let huge = SchematicModel {
            wires: vec![Wire { start: Point::new(0, 0), end: Point::new(1_000_000, 1_000_000) }],
            ..Default::default()
        };
        assert_eq!(fit_viewport(&huge, 1000.0, 1000.0, 40.0).zoom(), 0.1);
    }

    #[test]
    fn test_fit_larger_padding_smaller_zoom() {
        let model = SchematicModel {
            components: vec![component_at(1000, 1000), component_at(3000, 2000)],
            ..Default::default()
        };
        let loose = fit_viewport(&model, 1200.0, 800.0, 20.0);
        let tight = fit_viewport(&model, 1200.0, 800.0, 80.0);
        assert!(tight.zoom() < loose.zoom());
    }
}
