use clap::Parser;
use miette::Result;
use pxsvg::cli::{Cli, Commands};
use pxsvg::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Export(args) => pxsvg::cli::export::run(args, &printer)?,
        Commands::Info(args) => pxsvg::cli::info::run(args, &printer)?,
        Commands::Completions(args) => pxsvg::cli::completions::run(args)?,
    }

    Ok(())
}
