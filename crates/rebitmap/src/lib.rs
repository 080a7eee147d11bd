//! Embed arbitrary files losslessly into RGB images.
//!
//! rebitmap packs a file, prefixed by a 96-byte self-describing header,
//! into six-bit units and paints each unit as a short run of identical,
//! evenly quantized pixels.
//!
//! # Crate Structure
//!
//! - [`codec`] — Six-bit repacking and the container header
//! - [`canvas`] — Validation, layout planning, color mapping and the encode pipeline

/// Re-export codec types.
pub mod codec {
    pub use rebitmap_codec::*;
}

/// Re-export canvas types.
pub mod canvas {
    pub use rebitmap_canvas::*;
}
