use clap::{Args, Subcommand};
use rebitmap_canvas::CanvasConfig;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod encode;
pub mod limits;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed a file into a PNG image.
    Encode(EncodeArgs),
    /// Show the admissible file sizes for the canvas bounds.
    Limits(LimitsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: CanvasConfig) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, config),
        Command::Limits(args) => limits::run(args, format, config),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to embed.
    pub input: PathBuf,
    /// PNG file to write. Default: the input path with `.png` appended.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct LimitsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
