pub mod bounds;
pub mod viewport;

pub use bounds::{compute_bounds, fit_viewport, Bounds, DEFAULT_PADDING};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
