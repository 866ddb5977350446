pub mod recording;
pub mod renderer;
pub mod surface;
pub mod svg;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{SchematicRenderer, Theme};
pub use surface::{Color, DrawSurface, Font, FontFamily, ScopedTransform};
pub use svg::SvgSurface;
