//! Schematic format sniffing.
//!
//! Only the legacy EESchema text format is parsed. Detection is advisory: the
//! parser accepts any text, and callers use the result to warn about or
//! reject files written by newer KiCad versions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchematicFormat {
    /// KiCad 4-5 `EESchema Schematic File Version` text
    Legacy,
    /// KiCad 6+ S-expression `(kicad_sch …)`
    Modern,
    Unknown,
}

impl SchematicFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchematicFormat::Legacy => "KiCad legacy (EESchema)",
            SchematicFormat::Modern => "KiCad S-expression",
            SchematicFormat::Unknown => "unknown",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, SchematicFormat::Legacy)
    }
}

/// Detect the schematic format from file content.
pub fn detect_format(content: &str) -> SchematicFormat {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    if trimmed.starts_with("EESchema Schematic File Version") {
        SchematicFormat::Legacy
    } else if trimmed.starts_with("(kicad_sch") {
        SchematicFormat::Modern
    } else {
        SchematicFormat::Unknown
    }
}
