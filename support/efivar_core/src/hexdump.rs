//! The first-generation rendering: every byte as two lowercase hex digits.

use alloc::vec::Vec;

use crate::Error;
use crate::FormattedValue;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Room for the dump of `count` bytes, exactly `3 * count - 1`.
fn reserve_dump(count: usize) -> Result<Vec<u8>, Error> {
    let len = count
        .checked_mul(3)
        .map(|len| len.saturating_sub(1))
        .ok_or(Error::OutOfMemory)?;
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    Ok(out)
}

/// Formats `buffer` as `"xx xx ... xx"` with no trailing separator.
pub fn format(buffer: &[u8]) -> Result<FormattedValue, Error> {
    if buffer.is_empty() {
        return Ok(FormattedValue::default());
    }

    let mut out = reserve_dump(buffer.len())?;

    for (i, &byte) in buffer.iter().enumerate() {
        if i != 0 {
            out.push(b' ');
        }
        out.push(HEX_DIGITS[(byte >> 4) as usize]);
        out.push(HEX_DIGITS[(byte & 0xf) as usize]);
    }

    Ok(FormattedValue::from_bytes(out))
}
