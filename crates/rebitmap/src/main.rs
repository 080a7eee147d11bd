mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use rebitmap_canvas::{CanvasConfig, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "rebitmap", version, about = "Embed files losslessly into RGB images")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Maximum canvas width in pixels.
    #[arg(long, env = "REBITMAP_MAX_WIDTH", default_value_t = DEFAULT_MAX_WIDTH, global = true)]
    max_width: u32,

    /// Maximum canvas height in pixels.
    #[arg(long, env = "REBITMAP_MAX_HEIGHT", default_value_t = DEFAULT_MAX_HEIGHT, global = true)]
    max_height: u32,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig {
            max_width: self.max_width,
            max_height: self.max_height,
            ..CanvasConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = cli.canvas_config();
    let result = cmd::run(cli.command, format, config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
