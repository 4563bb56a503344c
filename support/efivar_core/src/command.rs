use core::fmt;

use crate::format_value;
use crate::is_ucs2_name;
use crate::parse_request;
use crate::request;
use crate::Error;
use crate::FormattedValue;
use crate::Guid;
use crate::LookupError;
use crate::Request;

/// What a command dispatcher needs to know to register `efivar`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.summary)
    }
}

pub const EFIVAR_COMMAND: CommandInfo = CommandInfo {
    name: "efivar",
    summary: "Read an EFI variable and print it or store it in an environment variable.",
    usage: request::USAGE,
};

/// The environment the command runs in: the firmware variable store,
/// the environment variable store and the console.
pub trait Host {
    /// Raw variable contents, released when dropped.
    type Buffer: AsRef<[u8]>;

    fn lookup_variable(&mut self, name: &str, guid: &Guid) -> Result<Self::Buffer, LookupError>;

    fn env_set(&mut self, name: &str, value: &FormattedValue);

    fn emit_line(&mut self, value: &FormattedValue);
}

/// Looks up the requested variable and prints or stores it.
pub fn execute<H: Host>(request: &Request<'_>, host: &mut H) -> Result<(), Error> {
    let guid = request.guid()?;
    if !is_ucs2_name(request.name) || !request.set_target.is_none_or(is_ucs2_name) {
        return Err(Error::BadArgument(request::INVALID_NAME));
    }
    let buffer = host.lookup_variable(request.name, &guid)?;
    let data = buffer.as_ref();
    log::debug!(
        "{}: {} bytes, formatting as {:?}",
        request.name,
        data.len(),
        request.format
    );

    let value = format_value(data, request.format)?;
    match request.set_target {
        Some(env) => host.env_set(env, &value),
        None => host.emit_line(&value),
    }

    Ok(())
}

/// Runs `efivar` with the arguments following the command name.
pub fn run<S: AsRef<str>, H: Host>(args: &[S], host: &mut H) -> Result<(), Error> {
    let request = parse_request(args)?;
    execute(&request, host)
}
