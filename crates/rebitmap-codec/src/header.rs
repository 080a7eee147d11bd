use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CodecError, Result};

/// Container header: marker (32) + width (4) + height (4) + length (8) +
/// name (32) + hash (16) = 96 bytes.
pub const HEADER_SIZE: usize = 96;

/// Width of the format signature.
pub const MARKER_SIZE: usize = 32;

/// Width of the zero-padded UTF-8 name field.
pub const NAME_SIZE: usize = 32;

/// Width of the MD5 digest field.
pub const HASH_SIZE: usize = 16;

/// Format signature: two GUIDs in their mixed-endian wire form,
/// `0c3cd8ec-eb14-4dc4-aab2-4ddd40ae0c5e` then
/// `922b0bc5-6733-45c4-b3f4-bfd9832e98d3`.
pub const MARKER: [u8; MARKER_SIZE] = [
    0xec, 0xd8, 0x3c, 0x0c, 0x14, 0xeb, 0xc4, 0x4d, 0xaa, 0xb2, 0x4d, 0xdd, 0x40, 0xae, 0x0c, 0x5e,
    0xc5, 0x0b, 0x2b, 0x92, 0x33, 0x67, 0xc4, 0x45, 0xb3, 0xf4, 0xbf, 0xd9, 0x83, 0x2e, 0x98, 0xd3,
];

/// Metadata record placed in front of the file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    marker: [u8; MARKER_SIZE],
    /// Pixel width of the produced image.
    pub width: i32,
    /// Pixel height of the produced image.
    pub height: i32,
    /// Length of the original file in bytes.
    pub file_original_length: i64,
    name: [u8; NAME_SIZE],
    hash: [u8; HASH_SIZE],
}

impl Header {
    /// Build a header, checking the name and digest widths.
    pub fn new(
        width: i32,
        height: i32,
        file_original_length: i64,
        name: &str,
        hash: &[u8],
    ) -> Result<Self> {
        let name_bytes = name.as_bytes();
        if name_bytes.len() > NAME_SIZE {
            return Err(CodecError::NameTooLong {
                len: name_bytes.len(),
                max: NAME_SIZE,
            });
        }
        let hash: [u8; HASH_SIZE] = hash.try_into().map_err(|_| CodecError::ChecksumSizeFault {
            len: hash.len(),
            expected: HASH_SIZE,
        })?;

        let mut padded = [0u8; NAME_SIZE];
        padded[..name_bytes.len()].copy_from_slice(name_bytes);

        Ok(Self {
            marker: MARKER,
            width,
            height,
            file_original_length,
            name: padded,
            hash,
        })
    }

    pub fn marker(&self) -> &[u8; MARKER_SIZE] {
        &self.marker
    }

    /// Raw name field including zero padding.
    pub fn name_bytes(&self) -> &[u8; NAME_SIZE] {
        &self.name
    }

    /// File name with trailing zero padding removed.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the name is
    /// informational only.
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    pub fn hash(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    /// Serialize into the fixed 96-byte wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        encode_header(self, &mut buf);
        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&buf);
        out
    }
}

/// Encode a header into the wire format.
///
/// Wire format (integers little-endian):
/// ```text
/// ┌─────────────┬───────┬────────┬────────────┬─────────────┬───────────┐
/// │ Marker (32) │ Width │ Height │ Length     │ Name (32)   │ Hash (16) │
/// │             │ (i32) │ (i32)  │ (i64)      │ zero-padded │ MD5       │
/// └─────────────┴───────┴────────┴────────────┴─────────────┴───────────┘
/// ```
pub fn encode_header(header: &Header, dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE);
    dst.put_slice(&header.marker);
    dst.put_i32_le(header.width);
    dst.put_i32_le(header.height);
    dst.put_i64_le(header.file_original_length);
    dst.put_slice(&header.name);
    dst.put_slice(&header.hash);
}

/// Decode a header from exactly [`HEADER_SIZE`] bytes.
pub fn decode_header(src: &[u8]) -> Result<Header> {
    if src.len() != HEADER_SIZE {
        return Err(CodecError::HeaderMalformed("header must be exactly 96 bytes"));
    }

    let mut src = src;
    let mut marker = [0u8; MARKER_SIZE];
    src.copy_to_slice(&mut marker);
    if marker != MARKER {
        return Err(CodecError::HeaderMalformed("unknown format marker"));
    }

    let width = src.get_i32_le();
    let height = src.get_i32_le();
    let file_original_length = src.get_i64_le();
    let mut name = [0u8; NAME_SIZE];
    src.copy_to_slice(&mut name);
    let mut hash = [0u8; HASH_SIZE];
    src.copy_to_slice(&mut hash);

    Ok(Header {
        marker,
        width,
        height,
        file_original_length,
        name,
        hash,
    })
}
