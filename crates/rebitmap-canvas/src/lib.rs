//! Turn a file into a self-describing RGB canvas.
//!
//! This is the "just works" layer. Hand it a path and it validates the
//! file, digests it, packs header and bytes into six-bit units, picks a
//! canvas that fits them and paints every unit as a run of identical
//! pixels.

pub mod canvas;
pub mod checksum;
pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod validate;

pub use canvas::PixelCanvas;
pub use checksum::digest;
pub use color::{from_color, to_color, Rgb, LEVELS};
pub use config::{CanvasConfig, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_REDUNDANCY};
pub use encoder::{Encoded, Encoder};
pub use error::{EncodeError, Result};
pub use layout::{plan, plan_canvas, Layout};
pub use validate::validate;
