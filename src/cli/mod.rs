pub mod completions;
pub mod export;
pub mod info;

use clap::{Parser, Subcommand};

/// pxsvg - Export frames of layered pixel-art sprites as SVG
#[derive(Parser, Debug)]
#[command(name = "pxsvg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one frame as SVG or as per-layer JSON
    Export(export::ExportArgs),

    /// Show how the layers of a frame would be exported
    Info(info::InfoArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
