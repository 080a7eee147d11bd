//! Six-bit repacking codec and fixed-layout container header.
//!
//! This is the bit-level core of rebitmap. A file is carried as:
//! - A 96-byte header (marker, canvas size, original length, name, MD5)
//! - The raw file bytes
//!
//! both regrouped from 8-bit bytes into 6-bit units, three bytes to four units.

pub mod bitpack;
pub mod error;
pub mod header;

pub use bitpack::{pack, packed_len, unpack, Mode, SixBitStream};
pub use error::{CodecError, Result};
pub use header::{
    decode_header, encode_header, Header, HASH_SIZE, HEADER_SIZE, MARKER, MARKER_SIZE,
    NAME_SIZE,
};
