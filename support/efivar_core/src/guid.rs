//! GUIDs in the canonical `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` form.

use core::str::FromStr;

use crate::hex;
use crate::hex::HexError;

/// Length of the canonical text form.
pub const GUID_TEXT_LEN: usize = 36;

const DASH_POSITIONS: [usize; 4] = [8, 13, 18, 23];

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuidError {
    #[error("invalid GUID format, expected XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX")]
    InvalidFormat,
}

impl From<HexError> for GuidError {
    fn from(_: HexError) -> Self {
        GuidError::InvalidFormat
    }
}

/// A 128-bit vendor identifier with the fields laid out the way the
/// firmware declares them.
///
/// The only ways to get one are [`Guid::parse`] and the well-known
/// constants, so a `Guid` always came from well-formed text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

impl Guid {
    /// `8BE4DF61-93CA-11D2-AA0D-00E098032B8C`, used when no GUID is given.
    pub const GLOBAL_VARIABLE: Guid = Guid {
        data1: 0x8be4_df61,
        data2: 0x93ca,
        data3: 0x11d2,
        data4: [0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b, 0x8c],
    };

    /// Parses the canonical text form. Hex digits may be of either case.
    ///
    /// The first three groups are read big-endian into `data1`, `data2`
    /// and `data3`; the last two groups are copied into `data4` in text
    /// order.
    pub fn parse(s: &str) -> Result<Self, GuidError> {
        let s = s.as_bytes();
        if s.len() != GUID_TEXT_LEN || DASH_POSITIONS.iter().any(|&i| s[i] != b'-') {
            return Err(GuidError::InvalidFormat);
        }

        let data1 = u32::from_be_bytes(hex::decode::<4>(&s[0..8])?);
        let data2 = u16::from_be_bytes(hex::decode::<2>(&s[9..13])?);
        let data3 = u16::from_be_bytes(hex::decode::<2>(&s[14..18])?);

        let mut data4 = [0_u8; 8];
        data4[..2].copy_from_slice(&hex::decode::<2>(&s[19..23])?);
        data4[2..].copy_from_slice(&hex::decode::<6>(&s[24..36])?);

        Ok(Self {
            data1,
            data2,
            data3,
            data4,
        })
    }

    pub const fn data1(&self) -> u32 {
        self.data1
    }

    pub const fn data2(&self) -> u16 {
        self.data2
    }

    pub const fn data3(&self) -> u16 {
        self.data3
    }

    pub const fn data4(&self) -> [u8; 8] {
        self.data4
    }

    /// The 16 bytes as they sit in firmware memory: the first three
    /// fields little-endian, `data4` as is.
    pub const fn to_efi_bytes(&self) -> [u8; 16] {
        let d1 = self.data1.to_le_bytes();
        let d2 = self.data2.to_le_bytes();
        let d3 = self.data3.to_le_bytes();
        let d4 = self.data4;
        [
            d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], d4[0], d4[1], d4[2], d4[3],
            d4[4], d4[5], d4[6], d4[7],
        ]
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::GLOBAL_VARIABLE
    }
}

impl FromStr for Guid {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
