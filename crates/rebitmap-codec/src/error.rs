use crate::bitpack::Mode;

/// Errors that can occur while packing, unpacking or parsing container headers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream was asked to work in the direction it was not built for.
    #[error("operation not supported by a {0} stream")]
    InvalidOperationForMode(Mode),

    /// The unit stream ended before the expected number of bytes was recovered.
    #[error("six-bit stream truncated ({decoded} of {expected} bytes recovered)")]
    TruncatedStream { expected: usize, decoded: usize },

    /// A packed unit had one of its two top bits set.
    #[error("unit {value:#04x} at index {index} is not a six-bit value")]
    UnitOutOfRange { index: usize, value: u8 },

    /// The header buffer has the wrong size or an unknown marker.
    #[error("malformed container header: {0}")]
    HeaderMalformed(&'static str),

    /// The file name does not fit the fixed-width name field.
    #[error("file name too long ({len} bytes, max {max})")]
    NameTooLong { len: usize, max: usize },

    /// The digest handed to the header is not 128 bits wide.
    #[error("checksum has {len} bytes, expected {expected}")]
    ChecksumSizeFault { len: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
