use md5::{Digest, Md5};
use rebitmap_codec::HASH_SIZE;

use crate::error::{EncodeError, Result};

/// MD5 of the whole in-memory file.
pub fn digest(data: &[u8]) -> Result<[u8; HASH_SIZE]> {
    let out = Md5::digest(data);
    out.as_slice()
        .try_into()
        .map_err(|_| EncodeError::ChecksumSizeFault { len: out.len() })
}
