//! Unsigned little-endian integers at the start of a buffer.

use alloc::string::String;
use alloc::string::ToString;

use crate::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Width {
    U8 = 1,
    U16 = 2,
    U32 = 4,
    U64 = 8,
}

impl Width {
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// Assembles the first `width` bytes little-endian. Trailing bytes are
/// ignored.
pub fn decode(buffer: &[u8], width: Width) -> Result<u64, Error> {
    let width = width.bytes();
    if buffer.len() < width {
        return Err(Error::BufferTooShort {
            width,
            len: buffer.len(),
        });
    }

    Ok(buffer[..width]
        .iter()
        .enumerate()
        .fold(0_u64, |value, (i, &byte)| value | ((byte as u64) << (8 * i))))
}

/// Same as [`decode`], rendered in decimal.
pub fn decode_decimal(buffer: &[u8], width: Width) -> Result<String, Error> {
    decode(buffer, width).map(|value| value.to_string())
}
