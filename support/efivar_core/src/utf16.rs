//! UTF-16LE variable payloads (`L"..."` strings) to UTF-8.
//!
//! Every 16-bit code unit is encoded on its own: surrogate pairs are not
//! combined into one code point, so a unit in `0xD800..=0xDFFF` comes out
//! as a 3-byte sequence like any other unit above `0x7FF`. Text outside
//! the BMP therefore doesn't round-trip.

use alloc::vec::Vec;

use crate::FormattedValue;

/// Code units up to the first zero unit. An odd trailing byte is dropped.
fn code_units(buffer: &[u8]) -> impl Iterator<Item = u16> + '_ {
    buffer
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
}

#[inline]
const fn encoded_len(unit: u16) -> usize {
    if unit < 0x80 {
        1
    } else if unit < 0x800 {
        2
    } else {
        3
    }
}

/// Decodes `buffer` as NUL-terminated UTF-16LE.
///
/// The output is sized in a first pass and filled in a second one. An
/// allocation failure gives an empty value.
pub fn decode(buffer: &[u8]) -> FormattedValue {
    let len: usize = code_units(buffer).map(encoded_len).sum();

    let mut out = Vec::new();
    if out.try_reserve_exact(len).is_err() {
        log::warn!("Cannot allocate {len} bytes for a UTF-16 string");
        return FormattedValue::default();
    }

    for unit in code_units(buffer) {
        match encoded_len(unit) {
            1 => out.push(unit as u8),
            2 => {
                out.push(0xc0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    debug_assert_eq!(out.len(), len);

    FormattedValue::from_bytes(out)
}
