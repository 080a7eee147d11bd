use std::path::PathBuf;

/// Errors that can occur while turning a file into a canvas.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The file holds more bytes than the largest canvas can carry.
    #[error("file too large ({size} bytes, max {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// The file is empty or smaller than the minimum container payload.
    #[error("file too small ({size} bytes, min {min})")]
    FileTooSmall { size: u64, min: u64 },

    /// The file name does not fit the header name field.
    #[error("file name too long ({len} bytes, max {max})")]
    NameTooLong { len: usize, max: usize },

    /// The input path has no final component to use as a name.
    #[error("path has no file name: {0}")]
    MissingFileName(PathBuf),

    /// The digest algorithm produced something other than 128 bits.
    #[error("checksum has {len} bytes, expected 16")]
    ChecksumSizeFault { len: usize },

    /// The planned canvas does not fit the configured bounds.
    #[error("payload needs a {width}x{height} canvas, max {max_width}x{max_height}")]
    PayloadExceedsCanvas {
        width: u64,
        height: u64,
        max_width: u32,
        max_height: u32,
    },

    /// The canvas configuration cannot produce any image.
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),

    /// Codec-level error.
    #[error("codec error: {0}")]
    Codec(#[from] rebitmap_codec::CodecError),

    /// Reading the input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EncodeError {
    /// True for rejections caused by the input rather than by a defect in
    /// the pipeline.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EncodeError::FileTooLarge { .. }
                | EncodeError::FileTooSmall { .. }
                | EncodeError::NameTooLong { .. }
                | EncodeError::MissingFileName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EncodeError>;
