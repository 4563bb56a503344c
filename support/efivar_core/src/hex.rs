//! Fixed-count decoding of ASCII hex digit pairs.

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid hex digit at offset {0}")]
    InvalidDigit(usize),
}

#[inline]
fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes exactly `2 * N` hex digits, no separators, into `N` bytes.
///
/// The digit at `2i` is the high nibble of byte `i`, the one at `2i + 1`
/// the low nibble. Decoding stops at the first character that is not a
/// hex digit.
pub fn decode<const N: usize>(chars: &[u8]) -> Result<[u8; N], HexError> {
    if chars.len() != 2 * N {
        return Err(HexError::InvalidLength {
            expected: 2 * N,
            actual: chars.len(),
        });
    }

    let mut bytes = [0_u8; N];
    for (i, pair) in chars.chunks_exact(2).enumerate() {
        let high = nibble(pair[0]).ok_or(HexError::InvalidDigit(2 * i))?;
        let low = nibble(pair[1]).ok_or(HexError::InvalidDigit(2 * i + 1))?;
        bytes[i] = (high << 4) | low;
    }

    Ok(bytes)
}
