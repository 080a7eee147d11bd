//! Six-bit repacking of byte streams.
//!
//! Every three source bytes (24 bits) become four units of six bits, each
//! stored in the low bits of its own byte:
//!
//! ```text
//! source  │aaaaaabb│bbbbcccc│ccdddddd│
//! packed  │00aaaaaa│00bbbbbb│00cccccc│00dddddd│
//! ```
//!
//! A trailing group of one or two bytes still emits its last, partially
//! filled unit with the unused low bits left at zero. Callers that unpack
//! must know how many bytes to recover; the unit count alone is ambiguous.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::error::{CodecError, Result};

const UNIT_MASK: u8 = 0b0011_1111;

/// Direction a [`SixBitStream`] was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pack,
    Unpack,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Pack => f.write_str("pack"),
            Mode::Unpack => f.write_str("unpack"),
        }
    }
}

/// Low bits of the most recently emitted unit that are still unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreeBits {
    Zero,
    Four,
    Two,
}

/// Low bits of the previously consumed unit that belong to the next byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Carry {
    None,
    Four,
    Two,
}

#[derive(Debug, Clone)]
enum State {
    Pack(FreeBits),
    Unpack { carry: Carry, cursor: usize },
}

/// Stateful six-bit codec working in exactly one direction.
///
/// A packer accepts any number of [`write`](Self::write) calls and carries
/// the partial unit across them, so packing `a` then `b` yields the same
/// units as packing `a ‖ b`. An unpacker walks a unit buffer with a cursor
/// and recovers bytes on demand with [`read`](Self::read).
#[derive(Debug, Clone)]
pub struct SixBitStream {
    buf: BytesMut,
    state: State,
}

impl SixBitStream {
    /// Create an empty packer.
    pub fn packer() -> Self {
        Self::packer_with_capacity(0)
    }

    /// Create a packer with room for the units of `source_len` bytes.
    pub fn packer_with_capacity(source_len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(packed_len(source_len)),
            state: State::Pack(FreeBits::Zero),
        }
    }

    /// Create an unpacker over a packed unit stream.
    pub fn unpacker(units: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(units),
            state: State::Unpack {
                carry: Carry::None,
                cursor: 0,
            },
        }
    }

    /// Direction of this stream.
    pub fn mode(&self) -> Mode {
        match self.state {
            State::Pack(_) => Mode::Pack,
            State::Unpack { .. } => Mode::Unpack,
        }
    }

    /// Pack `src`, continuing from the state left by the previous write.
    pub fn write(&mut self, src: &[u8]) -> Result<()> {
        let State::Pack(free) = &mut self.state else {
            return Err(CodecError::InvalidOperationForMode(Mode::Unpack));
        };

        pack_into(&mut self.buf, free, src);
        trace!(bytes = src.len(), units = self.buf.len(), "packed chunk");
        Ok(())
    }

    /// Recover the next `len` bytes from the unit stream.
    ///
    /// Fails with [`CodecError::TruncatedStream`] when the units run out
    /// first and with [`CodecError::UnitOutOfRange`] on a unit wider than
    /// six bits.
    pub fn read(&mut self, len: usize) -> Result<Bytes> {
        let State::Unpack { carry, cursor } = &mut self.state else {
            return Err(CodecError::InvalidOperationForMode(Mode::Pack));
        };

        let units = &self.buf[..];
        let mut out = BytesMut::with_capacity(len);

        while out.len() < len {
            let needed = if *carry == Carry::None { 2 } else { 1 };
            if *cursor + needed > units.len() {
                return Err(CodecError::TruncatedStream {
                    expected: len,
                    decoded: out.len(),
                });
            }

            let byte = match *carry {
                Carry::None => {
                    let hi = unit_at(units, *cursor)?;
                    let lo = unit_at(units, *cursor + 1)?;
                    *cursor += 2;
                    *carry = Carry::Four;
                    (hi << 2) | (lo >> 4)
                }
                Carry::Four => {
                    let prev = units[*cursor - 1];
                    let next = unit_at(units, *cursor)?;
                    *cursor += 1;
                    *carry = Carry::Two;
                    ((prev & 0b0000_1111) << 4) | (next >> 2)
                }
                Carry::Two => {
                    let prev = units[*cursor - 1];
                    let next = unit_at(units, *cursor)?;
                    *cursor += 1;
                    *carry = Carry::None;
                    ((prev & 0b0000_0011) << 6) | next
                }
            };
            out.put_u8(byte);
        }

        Ok(out.freeze())
    }

    /// Units not yet consumed by an unpacker, or zero for a packer.
    pub fn remaining_units(&self) -> usize {
        match self.state {
            State::Pack(_) => 0,
            State::Unpack { cursor, .. } => self.buf.len() - cursor,
        }
    }

    /// Units emitted so far by a packer.
    pub fn packed(&self) -> Result<&[u8]> {
        match self.state {
            State::Pack(_) => Ok(&self.buf),
            State::Unpack { .. } => Err(CodecError::InvalidOperationForMode(Mode::Unpack)),
        }
    }

    /// Finish packing and take the unit stream.
    pub fn into_packed(self) -> Result<Bytes> {
        match self.state {
            State::Pack(_) => Ok(self.buf.freeze()),
            State::Unpack { .. } => Err(CodecError::InvalidOperationForMode(Mode::Unpack)),
        }
    }
}

/// Number of units produced by packing `source_len` bytes.
pub fn packed_len(source_len: usize) -> usize {
    const TAIL: [usize; 3] = [0, 2, 3];
    source_len / 3 * 4 + TAIL[source_len % 3]
}

/// Pack a complete byte buffer in one call.
pub fn pack(src: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(packed_len(src.len()));
    let mut free = FreeBits::Zero;
    pack_into(&mut buf, &mut free, src);
    buf.freeze()
}

/// Recover exactly `len` bytes from a packed unit stream.
pub fn unpack(units: &[u8], len: usize) -> Result<Bytes> {
    SixBitStream::unpacker(units).read(len)
}

fn pack_into(buf: &mut BytesMut, free: &mut FreeBits, src: &[u8]) {
    buf.reserve(packed_len(src.len()));
    for &byte in src {
        *free = match *free {
            FreeBits::Zero => {
                buf.put_u8(byte >> 2);
                buf.put_u8((byte & 0b0000_0011) << 4);
                FreeBits::Four
            }
            FreeBits::Four => {
                merge_last(buf, byte >> 4);
                buf.put_u8((byte & 0b0000_1111) << 2);
                FreeBits::Two
            }
            FreeBits::Two => {
                merge_last(buf, byte >> 6);
                buf.put_u8(byte & UNIT_MASK);
                FreeBits::Zero
            }
        };
    }
}

/// Fold `bits` into the unfilled low bits of the last emitted unit.
fn merge_last(buf: &mut BytesMut, bits: u8) {
    if let Some(last) = buf.last_mut() {
        *last |= bits;
    }
}

fn unit_at(units: &[u8], index: usize) -> Result<u8> {
    let value = units[index];
    if value & !UNIT_MASK != 0 {
        return Err(CodecError::UnitOutOfRange { index, value });
    }
    Ok(value)
}
