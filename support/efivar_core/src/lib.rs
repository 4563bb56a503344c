//! Decoding of EFI variable values and canonical GUID text.
//!
//! The crate turns the raw bytes the firmware hands back for a variable
//! into text, and the command line of the `efivar` command into a
//! [`Request`]. It never talks to the firmware itself: everything outside
//! of parsing and formatting goes through the [`Host`] trait.
//!
//! ```ignore
//! let request = efivar_core::parse_request(&["--uint32", "Timeout"])?;
//! let value = efivar_core::format_value(&[0x05, 0, 0, 0], request.format)?;
//! assert_eq!(value.as_bytes(), b"5");
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod command;
mod error;
pub mod format;
pub mod guid;
pub mod hex;
pub mod hexdump;
pub mod integer;
pub mod request;
pub mod utf16;

mod tests;

pub use command::execute;
pub use command::run;
pub use command::CommandInfo;
pub use command::Host;
pub use command::EFIVAR_COMMAND;
pub use error::Error;
pub use error::LookupError;
pub use format::format_value;
pub use format::FormattedValue;
pub use format::OutputFormat;
pub use guid::Guid;
pub use guid::GuidError;
pub use request::is_ucs2_name;
pub use request::parse_request;
pub use request::split_command_line;
pub use request::Request;
