use std::path::{Path, PathBuf};

use rebitmap_canvas::{CanvasConfig, Encoder, PixelCanvas};
use serde::Serialize;

use crate::cmd::EncodeArgs;
use crate::exit::{encode_error, image_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{hex, print_report, OutputFormat};

#[derive(Serialize)]
struct EncodeOutput {
    schema_id: &'static str,
    input: String,
    output: String,
    name: String,
    file_size: i64,
    width: i32,
    height: i32,
    units: usize,
    md5: String,
}

pub fn run(args: EncodeArgs, format: OutputFormat, config: CanvasConfig) -> CliResult<i32> {
    let encoder = Encoder::with_config(config);
    let encoded = encoder
        .encode_file(&args.input)
        .map_err(|err| encode_error("encode failed", err))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));

    let out = EncodeOutput {
        schema_id: "https://schemas.3leaps.dev/rebitmap/cli/v1/encode-result.schema.json",
        input: args.input.display().to_string(),
        output: output.display().to_string(),
        name: encoded.header.name(),
        file_size: encoded.header.file_original_length,
        width: encoded.header.width,
        height: encoded.header.height,
        units: encoded.units,
        md5: hex(encoded.header.hash()),
    };

    save_png(&output, encoded.canvas)?;
    tracing::info!(path = %output.display(), "wrote image");

    let rows = [
        ("Input", out.input.clone()),
        ("Output", out.output.clone()),
        ("Name", out.name.clone()),
        ("Size", format!("{} bytes", out.file_size)),
        ("Canvas", format!("{}x{}", out.width, out.height)),
        ("Units", out.units.to_string()),
        ("MD5", out.md5.clone()),
    ];
    let raw = out.output.clone();
    print_report(&out, &rows, &raw, format);

    Ok(SUCCESS)
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".png");
    PathBuf::from(name)
}

fn save_png(path: &Path, canvas: PixelCanvas) -> CliResult<()> {
    let (width, height) = (canvas.width(), canvas.height());
    let image = image::RgbImage::from_raw(width, height, canvas.into_raw())
        .ok_or_else(|| CliError::new(INTERNAL, "canvas buffer does not match its dimensions"))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|err| image_error(&format!("failed writing {}", path.display()), err))
}
