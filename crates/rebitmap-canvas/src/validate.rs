use rebitmap_codec::NAME_SIZE;

use crate::config::CanvasConfig;
use crate::error::{EncodeError, Result};

/// Check a candidate file against the size window and the name width.
///
/// Runs before any byte of the file is transformed.
pub fn validate(len: u64, name: &str, config: &CanvasConfig) -> Result<()> {
    let max = config.max_file_size();
    if len > max {
        return Err(EncodeError::FileTooLarge { size: len, max });
    }

    let min = config.min_file_size();
    if len < min {
        return Err(EncodeError::FileTooSmall { size: len, min });
    }

    let name_len = name.len();
    if name_len > NAME_SIZE {
        return Err(EncodeError::NameTooLong {
            len: name_len,
            max: NAME_SIZE,
        });
    }

    Ok(())
}
