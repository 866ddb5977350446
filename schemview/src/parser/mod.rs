pub mod schema;
pub mod legacy;
pub mod format_detector;

// Re-export for convenience
pub use schema::*;
pub use legacy::{parse, LegacyParser, LineMatcher, DEFAULT_MATCHERS};
pub use format_detector::{detect_format, SchematicFormat};
