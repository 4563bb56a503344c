//! The `efivar` command line.
//!
//! ```text
//! efivar [--string|--uint8|--uint16|--uint32|--uint64|--hex] <name> [<guid>]
//! efivar --set <env> [--string|--uint8|--uint16|--uint32|--uint64|--hex] <name> [<guid>]
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::Error;
use crate::Guid;
use crate::OutputFormat;

pub const USAGE: &str = "Usage: efivar [--string|--uint8|--uint16|--uint32|--uint64|--hex] <name> [<guid>] | efivar --set <env> [...] <name> [<guid>]";
pub const SET_USAGE: &str = "Usage: efivar --set <env> [...] <name> [<guid>]";
pub const INVALID_GUID: &str = "Invalid GUID format. Expected XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX";
pub const INVALID_NAME: &str = "Invalid variable name. Expected UCS-2 characters only";

const SET_FLAG: &str = "--set";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    /// Variable name, e.g. `Boot0001`.
    pub name: &'a str,
    /// Vendor GUID text, parsed only when the variable is looked up.
    pub guid_text: Option<&'a str>,
    pub format: OutputFormat,
    /// Environment variable receiving the value instead of the console.
    pub set_target: Option<&'a str>,
}

impl Request<'_> {
    /// The vendor GUID, [`Guid::GLOBAL_VARIABLE`] unless one was given.
    pub fn guid(&self) -> Result<Guid, Error> {
        match self.guid_text {
            Some(text) => Guid::parse(text).map_err(|_| Error::BadArgument(INVALID_GUID)),
            None => Ok(Guid::GLOBAL_VARIABLE),
        }
    }
}

/// Parses the arguments following the command name.
///
/// The tokens are consumed left to right without backtracking:
/// `--set <env>`, then a format flag, then the mandatory name, then the
/// GUID. Anything after the GUID is ignored.
pub fn parse_request<S: AsRef<str>>(args: &[S]) -> Result<Request<'_>, Error> {
    let mut tokens = args.iter().map(|arg| arg.as_ref()).peekable();

    let mut set_target = None;
    if tokens.next_if_eq(&SET_FLAG).is_some() {
        if args.len() < 3 {
            return Err(Error::BadArgument(SET_USAGE));
        }
        set_target = tokens.next();
    }

    let format = match tokens.peek().and_then(|token| OutputFormat::from_flag(token)) {
        Some(format) => {
            tokens.next();
            format
        }
        None => OutputFormat::String,
    };

    let name = tokens.next().ok_or(Error::BadArgument(if set_target.is_some() {
        SET_USAGE
    } else {
        USAGE
    }))?;
    let guid_text = tokens.next();

    let request = Request {
        name,
        guid_text,
        format,
        set_target,
    };
    log::trace!("{request:?}");

    Ok(request)
}

/// Splits a shell command line the way the UEFI Shell builds `argv`.
///
/// Whitespace separates arguments, double quotes group words and are
/// dropped, `""` is an empty argument, and `^` takes the next character
/// literally (`^"`, `^^`, `^ `). Used only when the shell parameters
/// protocol isn't there to hand out the parsed arguments.
pub fn split_command_line(command_line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut arg = String::new();
    let mut in_arg = false;
    let mut quoted = false;

    let mut chars = command_line.chars();
    while let Some(c) = chars.next() {
        match c {
            '^' => {
                arg.push(chars.next().unwrap_or('^'));
                in_arg = true;
            }
            '"' => {
                quoted = !quoted;
                in_arg = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_arg {
                    args.push(core::mem::take(&mut arg));
                    in_arg = false;
                }
            }
            c => {
                arg.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(arg);
    }

    args
}

/// Firmware variable names are NUL-terminated UCS-2: no NUL inside and
/// nothing outside the BMP.
pub fn is_ucs2_name(name: &str) -> bool {
    name.chars().all(|c| c != '\0' && (c as u32) <= 0xffff)
}
