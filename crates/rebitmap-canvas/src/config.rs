use rebitmap_codec::{packed_len, HEADER_SIZE};

use crate::error::{EncodeError, Result};
use crate::layout::fit_canvas;

/// Default maximum canvas width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1850;

/// Default maximum canvas height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 850;

/// Default number of identical pixels painted per unit.
pub const DEFAULT_REDUNDANCY: u32 = 4;

/// Canvas bounds and redundancy used by validation and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Maximum canvas width in pixels. Default: 1850.
    pub max_width: u32,
    /// Maximum canvas height in pixels. Default: 850.
    pub max_height: u32,
    /// Horizontally adjacent pixels carrying each unit. Default: 4.
    pub redundancy: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            redundancy: DEFAULT_REDUNDANCY,
        }
    }
}

impl CanvasConfig {
    /// Reject bounds that cannot hold a single unit or overflow the header
    /// fields.
    pub fn check(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(EncodeError::InvalidConfig(
                "canvas bounds must be non-zero".to_string(),
            ));
        }
        if self.max_width > i32::MAX as u32 || self.max_height > i32::MAX as u32 {
            return Err(EncodeError::InvalidConfig(format!(
                "canvas bounds must not exceed {}",
                i32::MAX
            )));
        }
        if self.redundancy == 0 || self.redundancy > self.max_width {
            return Err(EncodeError::InvalidConfig(format!(
                "redundancy must be between 1 and {}",
                self.max_width
            )));
        }
        Ok(())
    }

    /// Units taken by the header, truncated as `HEADER_SIZE * 8 / 6`.
    pub fn header_units(&self) -> u64 {
        HEADER_SIZE as u64 * 8 / 6
    }

    /// Largest file, in bytes, the size check admits.
    ///
    /// This ignores width padding. Files just below this limit can still
    /// plan a canvas whose padded width exceeds `max_width`; see
    /// [`usable_max_file_size`](Self::usable_max_file_size) for the largest
    /// file that actually encodes.
    pub fn max_file_size(&self) -> u64 {
        let bits = u64::from(self.max_height) * u64::from(self.max_width) * 6;
        let bytes = bits / (u64::from(self.redundancy.max(1)) * 8);
        bytes.saturating_sub(HEADER_SIZE as u64 + 1)
    }

    /// Largest admitted file that also fits the canvas after width padding.
    ///
    /// `None` when the config is invalid or no admitted size fits.
    pub fn usable_max_file_size(&self) -> Option<u64> {
        self.check().ok()?;
        let min = self.min_file_size();
        (min..=self.max_file_size()).rev().find(|&size| {
            let units = packed_len(HEADER_SIZE + size as usize) as u64;
            fit_canvas(self, units).is_ok()
        })
    }

    /// Smallest file, in bytes, the configured canvas admits.
    pub fn min_file_size(&self) -> u64 {
        let side = self.header_units() + 1;
        side * side + 1
    }
}
