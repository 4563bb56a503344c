//! Output formats and the formatted value handed to the sinks.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write;

use crate::hexdump;
use crate::integer;
use crate::integer::Width;
use crate::utf16;
use crate::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// NUL-terminated UTF-16LE text.
    #[default]
    String,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Space separated hex bytes, the first-generation output.
    HexDump,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::String,
        OutputFormat::UInt8,
        OutputFormat::UInt16,
        OutputFormat::UInt32,
        OutputFormat::UInt64,
        OutputFormat::HexDump,
    ];

    pub const fn flag(self) -> &'static str {
        match self {
            OutputFormat::String => "--string",
            OutputFormat::UInt8 => "--uint8",
            OutputFormat::UInt16 => "--uint16",
            OutputFormat::UInt32 => "--uint32",
            OutputFormat::UInt64 => "--uint64",
            OutputFormat::HexDump => "--hex",
        }
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.flag() == flag)
    }
}

fn integer_value(buffer: &[u8], width: Width) -> Result<FormattedValue, Error> {
    integer::decode_decimal(buffer, width).map(FormattedValue::from)
}

/// Renders a variable's raw bytes in the requested format.
pub fn format_value(buffer: &[u8], format: OutputFormat) -> Result<FormattedValue, Error> {
    match format {
        OutputFormat::String => Ok(utf16::decode(buffer)),
        OutputFormat::UInt8 => integer_value(buffer, Width::U8),
        OutputFormat::UInt16 => integer_value(buffer, Width::U16),
        OutputFormat::UInt32 => integer_value(buffer, Width::U32),
        OutputFormat::UInt64 => integer_value(buffer, Width::U64),
        OutputFormat::HexDump => hexdump::format(buffer),
    }
}

/// Text produced by [`format_value`].
///
/// This is UTF-8, except that UTF-16 surrogates decoded from a variable
/// are kept as separate 3-byte sequences. [`FormattedValue::as_str`]
/// returns `None` for those, `Display` replaces them with U+FFFD, and
/// [`FormattedValue::ucs2_units`] gives back the original code units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedValue(Vec<u8>);

impl FormattedValue {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// UCS-2 code units of the value, for the firmware's console and
    /// variable store. Bytes that don't start a 1 to 3 byte sequence turn
    /// into U+FFFD.
    pub fn ucs2_units(&self) -> impl Iterator<Item = u16> + '_ {
        const REPLACEMENT: u16 = 0xfffd;

        let mut bytes = self.0.iter().copied().peekable();
        core::iter::from_fn(move || {
            let lead = bytes.next()?;
            let (continuation, mut unit) = match lead {
                0x00..=0x7f => return Some(lead as u16),
                0xc0..=0xdf => (1, (lead & 0x1f) as u16),
                0xe0..=0xef => (2, (lead & 0x0f) as u16),
                _ => return Some(REPLACEMENT),
            };
            for _ in 0..continuation {
                match bytes.next_if(|&b| b & 0xc0 == 0x80) {
                    Some(b) => unit = (unit << 6) | (b & 0x3f) as u16,
                    None => return Some(REPLACEMENT),
                }
            }
            Some(unit)
        })
    }
}

impl From<String> for FormattedValue {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::format_value;
    use super::FormattedValue;
    use super::OutputFormat;
    use crate::Error;

    const BOOT_CURRENT: [u8; 2] = [0x03, 0x00];
    const PLATFORM_LANG: &[u8] = b"e\0n\0-\0U\0S\0\0\0";

    #[test]
    fn flags() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_flag(format.flag()), Some(format));
        }
        assert_eq!(OutputFormat::from_flag("--set"), None);
        assert_eq!(OutputFormat::from_flag("--UINT8"), None);
        assert_eq!(OutputFormat::from_flag("uint8"), None);
        assert_eq!(OutputFormat::default(), OutputFormat::String);
    }

    #[test]
    fn dispatch() {
        let cases: [(&[u8], OutputFormat, &[u8]); 6] = [
            (PLATFORM_LANG, OutputFormat::String, b"en-US"),
            (&BOOT_CURRENT, OutputFormat::UInt8, b"3"),
            (&BOOT_CURRENT, OutputFormat::UInt16, b"3"),
            (&[0x10, 0x27, 0, 0], OutputFormat::UInt32, b"10000"),
            (&[1, 0, 0, 0, 0, 0, 0, 1], OutputFormat::UInt64, b"72057594037927937"),
            (&BOOT_CURRENT, OutputFormat::HexDump, b"03 00"),
        ];
        for (buffer, format, expected) in cases {
            assert_eq!(
                format_value(buffer, format).unwrap().as_bytes(),
                expected,
                "{format:?}"
            );
        }
    }

    #[test]
    fn dispatch_short_buffer() {
        assert_eq!(
            format_value(&BOOT_CURRENT, OutputFormat::UInt32),
            Err(Error::BufferTooShort { width: 4, len: 2 })
        );
        assert_eq!(
            format_value(&[], OutputFormat::UInt8),
            Err(Error::BufferTooShort { width: 1, len: 0 })
        );
    }

    #[test]
    fn empty_buffer_is_empty_text() {
        assert!(format_value(&[], OutputFormat::String).unwrap().is_empty());
        assert!(format_value(&[], OutputFormat::HexDump).unwrap().is_empty());
    }

    #[test]
    fn formatting_is_repeatable() {
        let buffer = [0x48, 0x00, 0x69, 0x00, 0x3d, 0xd8, 0x00, 0xde, 0x00, 0x00];
        for format in OutputFormat::ALL {
            assert_eq!(format_value(&buffer, format), format_value(&buffer, format));
        }
    }

    #[test]
    fn display_is_lossy() {
        let value = format_value(&[0x3d, 0xd8, 0x41, 0x00], OutputFormat::String).unwrap();
        assert_eq!(value.to_string(), "\u{fffd}\u{fffd}\u{fffd}A");
        assert_eq!(FormattedValue::from(String::from("42")).to_string(), "42");
    }

    #[test]
    fn ucs2_units() {
        let value = format_value(PLATFORM_LANG, OutputFormat::String).unwrap();
        assert!(value.ucs2_units().eq("en-US".encode_utf16()));

        let value = format_value(&[0xe9, 0x00, 0x2c, 0x20, 0x34, 0xd8], OutputFormat::String).unwrap();
        assert!(value.ucs2_units().eq([0xe9_u16, 0x202c, 0xd834]));

        let broken = FormattedValue::from_bytes(vec![0xe2, 0x82, b'a', 0xff]);
        assert!(broken.ucs2_units().eq([0xfffd_u16, b'a' as u16, 0xfffd]));
    }
}
