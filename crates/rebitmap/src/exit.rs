use std::fmt;
use std::io;

use rebitmap_canvas::EncodeError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn encode_error(context: &str, err: EncodeError) -> CliError {
    match err {
        EncodeError::Io { source, path } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        EncodeError::FileTooLarge { max, .. } => CliError::new(
            DATA_INVALID,
            format!("{context}: {err} (max size is {} MB)", megabytes(max)),
        ),
        EncodeError::FileTooSmall { min, .. } => CliError::new(
            DATA_INVALID,
            format!("{context}: {err} (min size is {} KB)", kilobytes(min)),
        ),
        EncodeError::NameTooLong { .. } | EncodeError::MissingFileName(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        EncodeError::InvalidConfig(_) => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn image_error(context: &str, err: image::ImageError) -> CliError {
    match err {
        image::ImageError::IoError(source) => io_error(context, source),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

/// Bytes as mebibytes, two decimals.
pub fn megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / (1024.0 * 1024.0))
}

/// Bytes as kibibytes, two decimals.
pub fn kilobytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_data_invalid() {
        let err = encode_error(
            "encode failed",
            EncodeError::FileTooSmall { size: 0, min: 16_642 },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("min size is 16.25 KB"));

        let err = encode_error(
            "encode failed",
            EncodeError::FileTooLarge {
                size: 1 << 20,
                max: 294_746,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("max size is 0.28 MB"));
    }

    #[test]
    fn internal_faults_map_to_internal() {
        let err = encode_error(
            "encode failed",
            EncodeError::PayloadExceedsCanvas {
                width: 1852,
                height: 850,
                max_width: 1850,
                max_height: 850,
            },
        );
        assert_eq!(err.code, INTERNAL);
    }

    #[test]
    fn missing_input_maps_to_failure() {
        let err = encode_error(
            "encode failed",
            EncodeError::Io {
                path: "/nope".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("/nope"));
    }
}
