use std::fs;
use std::path::Path;

use rebitmap_codec::{packed_len, Header, SixBitStream, HEADER_SIZE};
use tracing::{debug, info};

use crate::canvas::PixelCanvas;
use crate::checksum::digest;
use crate::config::CanvasConfig;
use crate::error::{EncodeError, Result};
use crate::layout::fit_canvas;
use crate::validate::validate;

/// A finished container: the header that was embedded and the painted
/// canvas carrying it.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub header: Header,
    pub canvas: PixelCanvas,
    /// Packed units painted onto the canvas, header included.
    pub units: usize,
}

/// Runs the full file → canvas pipeline.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CanvasConfig,
}

impl Encoder {
    /// Create an encoder with the default 1850x850 bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with explicit bounds and redundancy.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Encode the file at `path`, named after its final path component.
    ///
    /// Size and name are checked against file metadata before the file is
    /// read.
    pub fn encode_file(&self, path: impl AsRef<Path>) -> Result<Encoded> {
        self.config.check()?;

        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| EncodeError::MissingFileName(path.to_path_buf()))?;

        let metadata = fs::metadata(path).map_err(|source| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        validate(metadata.len(), &name, &self.config)?;

        let data = fs::read(path).map_err(|source| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, bytes = data.len(), "loaded input file");

        self.build(&name, &data)
    }

    /// Encode in-memory file contents under `name`.
    pub fn encode(&self, name: &str, data: &[u8]) -> Result<Encoded> {
        self.config.check()?;
        validate(data.len() as u64, name, &self.config)?;
        self.build(name, data)
    }

    // config checked and input validated by the caller
    fn build(&self, name: &str, data: &[u8]) -> Result<Encoded> {
        let hash = digest(data)?;
        let source_len = HEADER_SIZE + data.len();
        let units = packed_len(source_len);
        let layout = fit_canvas(&self.config, units as u64)?;
        debug!(units, ?layout, "planned canvas");

        // bounds were checked against i32::MAX by the config
        let header = Header::new(
            layout.width as i32,
            layout.height as i32,
            data.len() as i64,
            name,
            &hash,
        )?;

        let mut packer = SixBitStream::packer_with_capacity(source_len);
        packer.write(&header.to_bytes())?;
        packer.write(data)?;
        let packed = packer.into_packed()?;
        debug!(units = packed.len(), "packed header and payload");

        let mut canvas = PixelCanvas::new(layout.width, layout.height);
        canvas.paint(&packed, self.config.redundancy)?;

        info!(
            file = name,
            bytes = data.len(),
            width = layout.width,
            height = layout.height,
            "encoded file into canvas"
        );

        Ok(Encoded {
            header,
            canvas,
            units: packed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::from_color;
    use rebitmap_codec::decode_header;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i ^ (i >> 7)) as u8).collect()
    }

    #[test]
    fn test_encode_then_read_back() {
        let data = sample(20_000);
        let encoded = Encoder::new().encode("data.bin", &data).unwrap();

        let canvas = &encoded.canvas;
        assert_eq!(canvas.width() % 4, 0);
        assert_eq!(encoded.header.width, canvas.width() as i32);
        assert_eq!(encoded.header.height, canvas.height() as i32);
        assert_eq!(encoded.units, packed_len(HEADER_SIZE + data.len()));

        let units: Vec<u8> = canvas.pixels().step_by(4).map(from_color).collect();
        let mut unpacker = SixBitStream::unpacker(&units);
        let header = decode_header(&unpacker.read(HEADER_SIZE).unwrap()).unwrap();
        assert_eq!(header, encoded.header);
        assert_eq!(header.name(), "data.bin");
        assert_eq!(header.file_original_length, 20_000);

        let payload = unpacker.read(data.len()).unwrap();
        assert_eq!(payload.as_ref(), data.as_slice());
        assert_eq!(header.hash(), &digest(&payload).unwrap());
    }

    #[test]
    fn test_precondition_errors_stop_pipeline() {
        let encoder = Encoder::new();

        let err = encoder.encode("empty", &[]).unwrap_err();
        assert!(matches!(err, EncodeError::FileTooSmall { .. }));
        assert!(err.is_precondition());

        let err = encoder
            .encode(&"n".repeat(33), &sample(20_000))
            .unwrap_err();
        assert!(matches!(err, EncodeError::NameTooLong { len: 33, .. }));
    }

    #[test]
    fn test_largest_file_overflows_after_padding() {
        let config = CanvasConfig::default();
        let data = sample(config.max_file_size() as usize);
        let err = Encoder::with_config(config).encode("max", &data).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::PayloadExceedsCanvas {
                width: 1852,
                height: 850,
                ..
            }
        ));
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_usable_maximum_is_the_overflow_edge() {
        let config = CanvasConfig::default();
        let usable = config.usable_max_file_size().unwrap();
        assert_eq!(usable, 294_429);

        let encoder = Encoder::with_config(config);
        let encoded = encoder.encode("edge", &sample(usable as usize)).unwrap();
        assert_eq!(encoded.canvas.width(), 1848);
        assert_eq!(encoded.canvas.height(), 850);

        let err = encoder
            .encode("edge", &sample(usable as usize + 1))
            .unwrap_err();
        assert!(matches!(err, EncodeError::PayloadExceedsCanvas { .. }));
    }

    #[test]
    fn test_custom_bounds() {
        let config = CanvasConfig {
            max_width: 4000,
            max_height: 200,
            redundancy: 4,
        };
        let data = sample(config.min_file_size() as usize + 10);
        let encoded = Encoder::with_config(config).encode("wide", &data).unwrap();
        assert_eq!(encoded.canvas.height(), 200);
        assert!(encoded.canvas.width() <= 4000);
        assert_eq!(encoded.canvas.width() % 4, 0);
    }
}
