//! SchemView CLI - render and inspect legacy KiCad schematics from the command line.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use schemview::{
    compute_bounds, discover_schematic_files, is_schematic_path, Bounds, ModelSummary,
    RenderOptions, SchemViewCore, SchemViewError, SchematicModel, Viewport,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "schemview")]
#[command(about = "Legacy KiCad schematic viewer: render to SVG and inspect", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a schematic to SVG
    Render {
        /// Path to a .sch or .kicad_sch file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        size: SizeArgs,

        /// Hide the background grid
        #[arg(long)]
        no_grid: bool,

        /// Hide the title block overlay
        #[arg(long)]
        no_title: bool,

        /// Zoom factor applied around the container center after fitting
        #[arg(long, value_name = "F")]
        zoom: Option<f64>,

        /// Screen-space pan applied after fitting
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        pan: Option<Vec<f64>>,

        /// JSON file with render options (flags override it)
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,
    },

    /// Print metadata, entity counts, bounds and the fitted viewport
    Inspect {
        /// Path to a .sch or .kicad_sch file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        #[command(flatten)]
        size: SizeArgs,
    },

    /// Summarize (and optionally render) every schematic in a directory
    Project {
        /// Path to project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Write one SVG per schematic into this directory
        #[arg(long, value_name = "OUT")]
        out_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(clap::Args)]
struct SizeArgs {
    /// Container width in pixels
    #[arg(long, value_name = "W")]
    width: Option<f64>,

    /// Container height in pixels
    #[arg(long, value_name = "H")]
    height: Option<f64>,

    /// Fit padding in pixels
    #[arg(long, value_name = "P")]
    padding: Option<f64>,
}

impl SizeArgs {
    fn apply(&self, options: &mut RenderOptions) {
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(padding) = self.padding {
            options.padding = padding;
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            file,
            output,
            size,
            no_grid,
            no_title,
            zoom,
            pan,
            config,
        } => handle_render(
            &file,
            output.as_deref(),
            &size,
            no_grid,
            no_title,
            zoom,
            pan.as_deref(),
            config.as_deref(),
        ),
        Commands::Inspect { file, format, size } => handle_inspect(&file, format, &size),
        Commands::Project {
            dir,
            out_dir,
            format,
        } => handle_project(&dir, out_dir.as_deref(), format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn check_extension(file: &Path) -> Result<(), SchemViewError> {
    if is_schematic_path(file) {
        Ok(())
    } else {
        Err(SchemViewError::UnsupportedFormat(format!(
            "{} must be .sch or .kicad_sch",
            file.display()
        )))
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_render(
    file: &Path,
    output: Option<&Path>,
    size: &SizeArgs,
    no_grid: bool,
    no_title: bool,
    zoom: Option<f64>,
    pan: Option<&[f64]>,
    config: Option<&Path>,
) -> Result<(), SchemViewError> {
    check_extension(file)?;

    let mut options = match config {
        Some(path) => RenderOptions::from_json_file(path)?,
        None => RenderOptions::default(),
    };
    size.apply(&mut options);
    if no_grid {
        options.show_grid = false;
    }
    if no_title {
        options.show_title_block = false;
    }
    options.validate()?;

    let model = SchemViewCore::load_schematic(file)?;
    let mut viewport = SchemViewCore::fit(&model, &options);
    if let Some(factor) = zoom {
        viewport = viewport.zoom_at_focus(factor, options.width / 2.0, options.height / 2.0);
    }
    if let Some([dx, dy]) = pan {
        viewport = viewport.pan(*dx, *dy);
    }
    tracing::info!(
        "rendering {} at zoom {:.3}, pan ({:.1}, {:.1})",
        file.display(),
        viewport.zoom(),
        viewport.pan_x(),
        viewport.pan_y()
    );

    let svg = SchemViewCore::render_svg_with_viewport(&model, &viewport, &options);
    match output {
        Some(path) => fs::write(path, svg)?,
        None => print!("{}", svg),
    }
    Ok(())
}

fn handle_inspect(
    file: &Path,
    format: OutputFormat,
    size: &SizeArgs,
) -> Result<(), SchemViewError> {
    check_extension(file)?;

    let mut options = RenderOptions::default();
    size.apply(&mut options);
    options.validate()?;

    let model = SchemViewCore::load_schematic(file)?;
    let report = Report::new(file, model, &options);
    match format {
        OutputFormat::Human => output_human(&[report]),
        OutputFormat::Json => output_json(&[report])?,
    }
    Ok(())
}

fn handle_project(
    dir: &Path,
    out_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<(), SchemViewError> {
    let options = RenderOptions::default();
    let files = discover_schematic_files(dir)?;
    tracing::info!("found {} schematic(s) under {}", files.len(), dir.display());

    if let Some(out) = out_dir {
        fs::create_dir_all(out)?;
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let model = SchemViewCore::load_schematic(file)?;
        if let Some(out) = out_dir {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("schematic");
            let target = out.join(format!("{}.svg", stem));
            fs::write(&target, SchemViewCore::render_svg(&model, &options))?;
            tracing::info!("wrote {}", target.display());
        }
        reports.push(Report::new(file, model, &options));
    }

    match format {
        OutputFormat::Human => {
            if reports.is_empty() {
                println!("No schematic files found in {}", dir.display());
            }
            output_human(&reports);
        }
        OutputFormat::Json => output_json(&reports)?,
    }
    Ok(())
}

struct Report {
    file: PathBuf,
    model: SchematicModel,
    summary: ModelSummary,
    bounds: Bounds,
    viewport: Viewport,
}

impl Report {
    fn new(file: &Path, model: SchematicModel, options: &RenderOptions) -> Self {
        Self {
            file: file.to_path_buf(),
            summary: ModelSummary::of(&model),
            bounds: compute_bounds(&model),
            viewport: SchemViewCore::fit(&model, options),
            model,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.file.display().to_string(),
            "title": self.model.title,
            "date": self.model.date,
            "revision": self.model.revision,
            "company": self.model.company,
            "summary": self.summary,
            "bounds": self.bounds,
            "viewport": self.viewport,
        })
    }
}

fn output_human(reports: &[Report]) {
    for report in reports {
        let model = &report.model;
        println!("\nFile: {}", report.file.display());
        println!("{}", "─".repeat(60));
        println!("  Title:    {}", model.title);
        println!("  Date:     {}", model.date);
        println!("  Revision: {}", model.revision);
        println!("  Company:  {}", model.company);

        let s = &report.summary;
        println!("\n  Contents:");
        println!(
            "    Components: {} ({} placed)",
            s.components, s.placed_components
        );
        println!("    Fields:     {}", s.fields);
        println!("    Wires:      {}", s.wires);
        println!("    Labels:     {}", s.labels);

        let b = &report.bounds;
        println!("\n  Bounds:   x={} y={} w={} h={}", b.x, b.y, b.width, b.height);
        let vp = &report.viewport;
        println!(
            "  Viewport: pan=({:.2}, {:.2}) zoom={:.4}",
            vp.pan_x(),
            vp.pan_y(),
            vp.zoom()
        );
    }
}

fn output_json(reports: &[Report]) -> Result<(), SchemViewError> {
    let output = serde_json::json!({
        "results": reports.iter().map(Report::to_json).collect::<Vec<_>>(),
        "summary": {
            "total_files": reports.len(),
            "total_components": reports.iter().map(|r| r.summary.components).sum::<usize>(),
            "total_wires": reports.iter().map(|r| r.summary.wires).sum::<usize>(),
            "total_labels": reports.iter().map(|r| r.summary.labels).sum::<usize>(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
