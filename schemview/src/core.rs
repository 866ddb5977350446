//! File loading and one-call rendering shared by the CLI and other hosts.
//! The parser, layout and renderer stay pure; all I/O happens here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout::bounds::{compute_bounds, fit_viewport, Bounds, DEFAULT_PADDING};
use crate::layout::viewport::Viewport;
use crate::parser::format_detector::{detect_format, SchematicFormat};
use crate::parser::legacy;
use crate::parser::schema::SchematicModel;
use crate::render::renderer::{SchematicRenderer, Theme};
use crate::render::svg::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub enum SchemViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for SchemViewError {
    fn from(e: serde_json::Error) -> Self {
        SchemViewError::Config(e.to_string())
    }
}

/// Container size, fit padding and presentation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub show_grid: bool,
    pub show_title_block: bool,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: DEFAULT_PADDING,
            show_grid: true,
            show_title_block: true,
            theme: Theme::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_json_str(json: &str) -> Result<Self, SchemViewError> {
        let options: RenderOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SchemViewError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), SchemViewError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(SchemViewError::Config(format!(
                "container size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(SchemViewError::Config(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

/// Entity counts for a loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub components: usize,
    pub placed_components: usize,
    pub fields: usize,
    pub wires: usize,
    pub labels: usize,
}

impl ModelSummary {
    pub fn of(model: &SchematicModel) -> Self {
        Self {
            components: model.components.len(),
            placed_components: model.components.iter().filter(|c| c.anchor.is_some()).count(),
            fields: model.components.iter().map(|c| c.fields.len()).sum(),
            wires: model.wires.len(),
            labels: model.labels.len(),
        }
    }
}

/// Recursively discover schematic files (`.sch`, `.kicad_sch`) in a directory.
pub fn discover_schematic_files(dir: &Path) -> Result<Vec<PathBuf>, SchemViewError> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files, 0)?;
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> Result<(), SchemViewError> {
    if depth > 20 {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "target" || name == "node_modules" {
                continue;
            }
            walk_dir(&path, files, depth + 1)?;
        } else if path.is_file() && is_schematic_path(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Extension check done by hosts before handing text to the parser.
pub fn is_schematic_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("sch") | Some("kicad_sch")
    )
}

pub struct SchemViewCore;

impl SchemViewCore {
    /// Read and parse a schematic. Non-legacy content is logged and parsed
    /// best-effort anyway, which usually yields a sparse model.
    pub fn load_schematic(path: &Path) -> Result<SchematicModel, SchemViewError> {
        let content = read_lossy(path)?;
        let format = detect_format(&content);
        if !format.is_legacy() {
            tracing::warn!(
                "{} does not look like a legacy schematic ({}); parsing best-effort",
                path.display(),
                format.as_str()
            );
        }
        Ok(legacy::parse(&content))
    }

    /// Like [`SchemViewCore::load_schematic`] but rejects S-expression files.
    pub fn load_schematic_strict(path: &Path) -> Result<SchematicModel, SchemViewError> {
        let content = read_lossy(path)?;
        match detect_format(&content) {
            SchematicFormat::Modern => Err(SchemViewError::UnsupportedFormat(format!(
                "{} is a KiCad 6+ schematic; only the legacy format is supported",
                path.display()
            ))),
            _ => Ok(legacy::parse(&content)),
        }
    }

    pub fn bounds(model: &SchematicModel) -> Bounds {
        compute_bounds(model)
    }

    /// Fit-to-view camera for the configured container.
    pub fn fit(model: &SchematicModel, options: &RenderOptions) -> Viewport {
        fit_viewport(model, options.width, options.height, options.padding)
    }

    /// Fit the model and render it to an SVG document.
    pub fn render_svg(model: &SchematicModel, options: &RenderOptions) -> String {
        let viewport = Self::fit(model, options);
        Self::render_svg_with_viewport(model, &viewport, options)
    }

    pub fn render_svg_with_viewport(
        model: &SchematicModel,
        viewport: &Viewport,
        options: &RenderOptions,
    ) -> String {
        let surface =
            SvgSurface::with_background(options.width, options.height, options.theme.background);
        let mut renderer = SchematicRenderer::new(surface)
            .with_theme(options.theme.clone())
            .show_grid(options.show_grid)
            .show_title_block(options.show_title_block);
        renderer.draw(Some(model), viewport);
        renderer.into_surface().finish()
    }
}

fn read_lossy(path: &Path) -> Result<String, SchemViewError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
