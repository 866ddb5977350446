//! SchemView - legacy KiCad schematic parser, fit-to-view layout and renderer
//!
//! This library reads KiCad 4-5 (EESchema) schematic text into a typed model,
//! computes a camera that fits the model into a viewing area, and renders the
//! model through that camera onto any 2D drawing surface.
//!
//! # Quick Start
//!
//! ```
//! use schemview::{parse, fit_viewport, SchematicRenderer, SvgSurface};
//!
//! let model = parse("Wire Wire Line\n100 100 300 200\n");
//! let viewport = fit_viewport(&model, 800.0, 600.0, 40.0);
//!
//! let mut renderer = SchematicRenderer::new(SvgSurface::new(800.0, 600.0));
//! renderer.draw(Some(&model), &viewport);
//! let svg = renderer.into_surface().finish();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Features
//!
//! - **Best-effort parsing**: never fails; unrecognized lines are skipped
//! - **Fit-to-view**: bounds over components, wires and labels, clamped zoom
//! - **Backend-agnostic rendering**: implement [`DrawSurface`] or use the
//!   bundled [`SvgSurface`] and [`RecordingSurface`]

pub mod core;
pub mod layout;
pub mod parser;
pub mod render;

// Re-export main types
pub use crate::core::{
    discover_schematic_files, is_schematic_path, ModelSummary, RenderOptions, SchemViewCore,
    SchemViewError,
};
pub use layout::{
    compute_bounds, fit_viewport, Bounds, Viewport, DEFAULT_PADDING, MAX_ZOOM, MIN_ZOOM,
};
pub use parser::{
    detect_format, parse, Component, Field, Label, LegacyParser, Orientation, Point,
    SchematicFormat, SchematicModel, Wire,
};
pub use render::{
    Color, DrawCommand, DrawSurface, RecordingSurface, SchematicRenderer, SvgSurface, Theme,
};

/// Load and parse a schematic file (convenience wrapper).
pub fn load_schematic(path: &std::path::Path) -> Result<SchematicModel, SchemViewError> {
    SchemViewCore::load_schematic(path)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        fit_viewport, parse, DrawSurface, RenderOptions, SchemViewCore, SchemViewError,
        SchematicModel, SchematicRenderer, Viewport,
    };
}
