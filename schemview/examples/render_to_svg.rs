//! Render a legacy schematic to an SVG file and print what was found.

use schemview::prelude::*;
use schemview::{compute_bounds, ModelSummary};
use std::path::{Path, PathBuf};

fn main() -> Result<(), SchemViewError> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/sample.sch".to_string());
    let input = Path::new(&input);

    if !input.exists() {
        eprintln!("File not found: {}", input.display());
        eprintln!("Usage: cargo run --example render_to_svg [path/to/file.sch] [out.svg]");
        std::process::exit(1);
    }
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("svg"));

    let model = SchemViewCore::load_schematic(input)?;
    let summary = ModelSummary::of(&model);
    println!("Schematic: {}", input.display());
    println!("  Title: {}", model.title);
    println!(
        "  {} components, {} wires, {} labels",
        summary.components, summary.wires, summary.labels
    );

    let options = RenderOptions::default();
    let viewport = SchemViewCore::fit(&model, &options);
    let bounds = compute_bounds(&model);
    println!(
        "  Bounds {}x{} at ({}, {}), fitted zoom {:.3}",
        bounds.width,
        bounds.height,
        bounds.x,
        bounds.y,
        viewport.zoom()
    );

    let svg = SchemViewCore::render_svg_with_viewport(&model, &viewport, &options);
    std::fs::write(&output, svg)?;
    println!("Wrote {}", output.display());
    Ok(())
}
