use tracing::debug;

use crate::config::CanvasConfig;
use crate::error::{EncodeError, Result};

/// Concrete canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
}

impl Layout {
    /// Pixels on the canvas.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Pick a canvas holding `total_units` pixels within the bounds.
///
/// Prefers the smallest square whose side exceeds `sqrt(total_units)`. When
/// that square is wider than the smaller bound, the smaller bound is used in
/// full and the other side grows to cover the rest.
pub fn plan(max_width: u32, max_height: u32, total_units: u64) -> (u32, u32) {
    let min_side = max_width.min(max_height);
    if min_side == 0 {
        return (0, 0);
    }

    let square = total_units.isqrt() + 1;
    if square <= u64::from(min_side) {
        let side = square as u32;
        return (side, side);
    }

    let second_side = u32::try_from(total_units.div_ceil(u64::from(min_side))).unwrap_or(u32::MAX);
    if max_height == min_side {
        (second_side, min_side)
    } else {
        (min_side, second_side)
    }
}

/// Plan the canvas for `units` packed units under `config`.
///
/// Every unit takes `redundancy` pixels, and the width is padded up to a
/// multiple of `redundancy` so no unit straddles two rows. The padded canvas
/// must still fit the bounds; a larger canvas is never attempted.
pub fn plan_canvas(config: &CanvasConfig, units: u64) -> Result<Layout> {
    config.check()?;
    let layout = fit_canvas(config, units)?;
    debug!(units, ?layout, "planned canvas");
    Ok(layout)
}

/// [`plan_canvas`] for a config that already passed [`CanvasConfig::check`].
pub(crate) fn fit_canvas(config: &CanvasConfig, units: u64) -> Result<Layout> {
    let redundancy = config.redundancy;
    let total_units = units.saturating_mul(u64::from(redundancy));
    let (width, height) = plan(config.max_width, config.max_height, total_units);
    let padded = u64::from(width).div_ceil(u64::from(redundancy)) * u64::from(redundancy);

    if padded > u64::from(config.max_width)
        || height > config.max_height
        || padded * u64::from(height) < total_units
    {
        return Err(EncodeError::PayloadExceedsCanvas {
            width: padded,
            height: u64::from(height),
            max_width: config.max_width,
            max_height: config.max_height,
        });
    }

    Ok(Layout {
        width: padded as u32,
        height,
    })
}
