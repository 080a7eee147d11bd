#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

use rebitmap::canvas::{from_color, Rgb, DEFAULT_REDUNDANCY};
use rebitmap::codec::{decode_header, SixBitStream, HEADER_SIZE};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rebitmap-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn encode_writes_png_that_reads_back() {
    let dir = unique_temp_dir("encode");
    let input = dir.join("notes.bin");
    let output = dir.join("notes.png");
    let data: Vec<u8> = (0..18_000u32).map(|i| (i * 7 % 251) as u8).collect();
    std::fs::write(&input, &data).expect("input should be writable");

    let result = Command::new(env!("CARGO_BIN_EXE_rebitmap"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("encode")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("encode should run");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("encode-result.schema.json"));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("encode should emit json");
    assert_eq!(report.get("name").and_then(|v| v.as_str()), Some("notes.bin"));

    let image = image::open(&output).expect("png should decode").to_rgb8();
    assert_eq!(image.width() % DEFAULT_REDUNDANCY, 0);
    let units: Vec<u8> = image
        .pixels()
        .step_by(DEFAULT_REDUNDANCY as usize)
        .map(|p| from_color(Rgb(p.0)))
        .collect();

    let mut unpacker = SixBitStream::unpacker(&units);
    let header = decode_header(&unpacker.read(HEADER_SIZE).unwrap()).unwrap();
    assert_eq!(header.width as u32, image.width());
    assert_eq!(header.height as u32, image.height());
    let payload = unpacker
        .read(header.file_original_length as usize)
        .unwrap();
    assert_eq!(payload.as_ref(), data.as_slice());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encode_small_file_returns_60() {
    let dir = unique_temp_dir("small");
    let input = dir.join("tiny.txt");
    std::fs::write(&input, b"too small").expect("input should be writable");

    let result = Command::new(env!("CARGO_BIN_EXE_rebitmap"))
        .arg("encode")
        .arg(&input)
        .output()
        .expect("encode should run");

    assert_eq!(result.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("min size is"));
    assert!(!dir.join("tiny.txt.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encode_with_zero_bounds_returns_64() {
    let dir = unique_temp_dir("bounds");
    let input = dir.join("data.bin");
    std::fs::write(&input, vec![7u8; 20_000]).expect("input should be writable");

    let result = Command::new(env!("CARGO_BIN_EXE_rebitmap"))
        .arg("--max-width")
        .arg("0")
        .arg("encode")
        .arg(&input)
        .output()
        .expect("encode should run");

    assert_eq!(result.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("canvas bounds must be non-zero"));
    assert!(!dir.join("data.bin.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn limits_reports_default_window() {
    let result = Command::new(env!("CARGO_BIN_EXE_rebitmap"))
        .arg("--format")
        .arg("json")
        .arg("limits")
        .output()
        .expect("limits should run");

    assert!(result.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("limits should emit json");
    assert_eq!(payload.get("min_file_size").and_then(|v| v.as_u64()), Some(16_642));
    assert_eq!(payload.get("max_file_size").and_then(|v| v.as_u64()), Some(294_746));
    assert_eq!(
        payload.get("usable_max_file_size").and_then(|v| v.as_u64()),
        Some(294_429)
    );
}

#[test]
fn limits_honors_env_bounds() {
    let result = Command::new(env!("CARGO_BIN_EXE_rebitmap"))
        .env("REBITMAP_MAX_WIDTH", "400")
        .env("REBITMAP_MAX_HEIGHT", "300")
        .arg("--format")
        .arg("raw")
        .arg("limits")
        .output()
        .expect("limits should run");

    assert!(result.status.success());
    // 300 * 400 * 6 / 32 - 97
    assert_eq!(String::from_utf8_lossy(&result.stdout).trim(), "16642 22403");
}
