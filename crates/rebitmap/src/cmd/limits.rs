use rebitmap_canvas::CanvasConfig;
use rebitmap_codec::HEADER_SIZE;
use serde::Serialize;

use crate::cmd::LimitsArgs;
use crate::exit::{encode_error, kilobytes, megabytes, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};

#[derive(Serialize)]
struct LimitsOutput {
    schema_id: &'static str,
    max_width: u32,
    max_height: u32,
    redundancy: u32,
    header_size: usize,
    min_file_size: u64,
    max_file_size: u64,
    usable_max_file_size: Option<u64>,
}

pub fn run(_args: LimitsArgs, format: OutputFormat, config: CanvasConfig) -> CliResult<i32> {
    config
        .check()
        .map_err(|err| encode_error("invalid bounds", err))?;

    let out = LimitsOutput {
        schema_id: "https://schemas.3leaps.dev/rebitmap/cli/v1/limits.schema.json",
        max_width: config.max_width,
        max_height: config.max_height,
        redundancy: config.redundancy,
        header_size: HEADER_SIZE,
        min_file_size: config.min_file_size(),
        max_file_size: config.max_file_size(),
        usable_max_file_size: config.usable_max_file_size(),
    };
    let usable = match out.usable_max_file_size {
        Some(size) => format!(
            "{} bytes ({} MB, after width padding)",
            size,
            megabytes(size)
        ),
        None => "none (no admitted size fits the padded canvas)".to_string(),
    };

    let rows = [
        (
            "Canvas",
            format!("{}x{} (max)", out.max_width, out.max_height),
        ),
        ("Redundancy", format!("{} px/unit", out.redundancy)),
        ("Header", format!("{} bytes", out.header_size)),
        (
            "Min file",
            format!("{} bytes ({} KB)", out.min_file_size, kilobytes(out.min_file_size)),
        ),
        (
            "Max file",
            format!("{} bytes ({} MB)", out.max_file_size, megabytes(out.max_file_size)),
        ),
        ("Usable max", usable),
    ];
    let raw = format!("{} {}", out.min_file_size, out.max_file_size);

    print_report(&out, &rows, &raw, format);
    Ok(SUCCESS)
}
