//! Export command implementation.
//!
//! Loads a sprite, exports one frame and writes the document to a file or stdout.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{Config, OutputFormat};
use crate::error::{PxSvgError, Result};
use crate::export::{ExportOptions, ExportReport, Exporter, Strategy};
use crate::load::load_sprite;
use crate::output::{display_path, plural, Printer};

/// Export one frame as SVG or as per-layer JSON
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Sprite manifest (.yaml) or .png image
    pub input: PathBuf,

    /// 1-based frame to export
    #[arg(long, short)]
    pub frame: Option<u32>,

    /// Output document: svg or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// SVG encoding: flat, optimized or css
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Do not wrap each layer in its own group
    #[arg(long)]
    pub no_groups: bool,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./pxsvg.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Settings for one export after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    format: OutputFormat,
    frame: u32,
    options: ExportOptions,
}

fn resolve(args: &ExportArgs, config: &Config) -> Result<Resolved> {
    let mut options = config.export_options()?;
    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if args.no_groups {
        options.layer_groups = false;
    }

    Ok(Resolved {
        format: args.format.unwrap_or(config.format),
        frame: args.frame.unwrap_or(config.frame),
        options,
    })
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::resolve(args.config.as_deref(), &cwd)?;
    let resolved = resolve(&args, &config)?;

    let sprite = load_sprite(&args.input)?;
    printer.status(
        "Exporting",
        &format!(
            "{} frame {} ({}x{}, {})",
            display_path(&args.input),
            resolved.frame,
            sprite.width(),
            sprite.height(),
            plural(sprite.layers().len(), "layer", "layers"),
        ),
    );

    let exporter = Exporter::new(&sprite, resolved.options);
    let (document, detail, report) = match resolved.format {
        OutputFormat::Svg => {
            let export = exporter.svg(resolved.frame);
            let detail = export.strategy.map(|s| s.to_string());
            (export.svg, detail, export.report)
        }
        OutputFormat::Json => {
            let export = exporter.layers_json(resolved.frame)?;
            let detail = plural(export.layer_count, "layer", "layers");
            (Some(export.json), Some(detail), export.report)
        }
    };

    print_report(&report, printer);

    let Some(document) = document else {
        printer.warning("Skipped", "nothing to export");
        return Ok(());
    };

    match &args.output {
        Some(path) => {
            write_document(path, &document)?;
            let detail = detail.unwrap_or_default();
            printer.status(
                "Wrote",
                &format!("{} {}", printer.cyan(&display_path(path)), printer.dim(&format!("({})", detail))),
            );
        }
        None => println!("{}", document),
    }

    Ok(())
}

fn print_report(report: &ExportReport, printer: &Printer) {
    for diagnostic in report.iter() {
        printer.diagnostic(diagnostic);
    }
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PxSvgError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    fs::write(path, document).map_err(|e| PxSvgError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e),
    })
}
