#![cfg(test)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::request::INVALID_GUID;
use crate::request::INVALID_NAME;
use crate::request::SET_USAGE;
use crate::run;
use crate::Error;
use crate::FormattedValue;
use crate::Guid;
use crate::Host;
use crate::LookupError;
use crate::EFIVAR_COMMAND;

const EFI_NOT_FOUND: usize = (1 << (usize::BITS - 1)) | 14;

const VENDOR: &str = "3ce6e0d6-1b22-4c43-bd3e-2b4b0a1cdfd8";

/// Variable contents that count how many of them are alive.
struct TrackedBuffer {
    data: Vec<u8>,
    live: Rc<Cell<usize>>,
}

impl AsRef<[u8]> for TrackedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for TrackedBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Default)]
struct FakeFirmware {
    variables: BTreeMap<(String, Guid), Vec<u8>>,
    lookups: Vec<(String, Guid)>,
    env: BTreeMap<String, FormattedValue>,
    lines: Vec<FormattedValue>,
    live: Rc<Cell<usize>>,
}

impl FakeFirmware {
    fn with_variables() -> Self {
        let mut firmware = Self::default();
        let vendor = Guid::parse(VENDOR).unwrap();
        for (name, guid, data) in [
            ("Timeout", Guid::GLOBAL_VARIABLE, vec![0x05, 0x00]),
            ("BootOrder", Guid::GLOBAL_VARIABLE, vec![0x01, 0x00, 0x00, 0x00]),
            (
                "PlatformLang",
                Guid::GLOBAL_VARIABLE,
                b"e\0n\0-\0U\0S\0\0\0".to_vec(),
            ),
            ("Empty", Guid::GLOBAL_VARIABLE, vec![]),
            ("Counter", vendor, 0x1122_3344_5566_7788_u64.to_le_bytes().to_vec()),
        ] {
            firmware.variables.insert((name.to_string(), guid), data);
        }
        firmware
    }

    fn lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl Host for FakeFirmware {
    type Buffer = TrackedBuffer;

    fn lookup_variable(&mut self, name: &str, guid: &Guid) -> Result<TrackedBuffer, LookupError> {
        self.lookups.push((name.to_string(), *guid));
        let data = self
            .variables
            .get(&(name.to_string(), *guid))
            .cloned()
            .ok_or(LookupError {
                status: EFI_NOT_FOUND,
            })?;
        self.live.set(self.live.get() + 1);
        Ok(TrackedBuffer {
            data,
            live: self.live.clone(),
        })
    }

    fn env_set(&mut self, name: &str, value: &FormattedValue) {
        self.env.insert(name.to_string(), value.clone());
    }

    fn emit_line(&mut self, value: &FormattedValue) {
        self.lines.push(value.clone());
    }
}

#[test]
fn test_print_string_by_default() {
    let mut firmware = FakeFirmware::with_variables();
    assert_eq!(run(&["PlatformLang"], &mut firmware), Ok(()));
    assert_eq!(firmware.lines(), ["en-US"]);
    assert_eq!(
        firmware.lookups,
        [("PlatformLang".to_string(), Guid::GLOBAL_VARIABLE)]
    );
    assert!(firmware.env.is_empty());
    assert_eq!(firmware.live.get(), 0);
}

#[test]
fn test_print_integers() {
    let mut firmware = FakeFirmware::with_variables();
    run(&["--uint16", "Timeout"], &mut firmware).unwrap();
    run(&["--uint8", "BootOrder"], &mut firmware).unwrap();
    run(&["--uint64", "Counter", VENDOR], &mut firmware).unwrap();
    run(&["--hex", "Timeout"], &mut firmware).unwrap();
    assert_eq!(
        firmware.lines(),
        ["5", "1", "1234605616436508552", "05 00"]
    );
    assert_eq!(firmware.live.get(), 0);
}

#[test]
fn test_set_stores_instead_of_printing() {
    let mut firmware = FakeFirmware::with_variables();
    run(&["--set", "timeout", "--uint16", "Timeout"], &mut firmware).unwrap();
    run(&["--set", "lang", "PlatformLang"], &mut firmware).unwrap();
    assert!(firmware.lines.is_empty());
    assert_eq!(firmware.env["timeout"].as_str(), Some("5"));
    assert_eq!(firmware.env["lang"].as_str(), Some("en-US"));
}

#[test]
fn test_empty_variable() {
    let mut firmware = FakeFirmware::with_variables();
    run(&["Empty"], &mut firmware).unwrap();
    run(&["--hex", "Empty"], &mut firmware).unwrap();
    run(&["--set", "e", "Empty"], &mut firmware).unwrap();
    assert_eq!(firmware.lines(), ["", ""]);
    assert!(firmware.env["e"].is_empty());

    assert_eq!(
        run(&["--uint8", "Empty"], &mut firmware),
        Err(Error::BufferTooShort { width: 1, len: 0 })
    );
    assert_eq!(firmware.lines.len(), 2);
    assert_eq!(firmware.live.get(), 0);
}

// OutOfMemory is not forced here: the hex dump only fails to reserve for
// buffers no host can hand out. `hexdump::reserve_dump` covers that branch.
#[test]
fn test_errors_release_buffers() {
    let mut firmware = FakeFirmware::with_variables();

    assert_eq!(
        run(&["--uint32", "Timeout"], &mut firmware),
        Err(Error::BufferTooShort { width: 4, len: 2 })
    );
    assert_eq!(firmware.live.get(), 0);

    assert_eq!(
        run(&["--set", "x", "--uint64", "BootOrder"], &mut firmware),
        Err(Error::BufferTooShort { width: 8, len: 4 })
    );
    assert_eq!(firmware.live.get(), 0);
    assert!(firmware.env.is_empty());

    assert_eq!(
        run(&["Missing"], &mut firmware),
        Err(Error::LookupFailure(LookupError {
            status: EFI_NOT_FOUND
        }))
    );
    assert_eq!(
        run(&["Counter"], &mut firmware),
        Err(Error::LookupFailure(LookupError {
            status: EFI_NOT_FOUND
        }))
    );
    assert_eq!(firmware.live.get(), 0);
    assert!(firmware.lines.is_empty());
}

#[test]
fn test_bad_arguments_skip_lookup() {
    let mut firmware = FakeFirmware::with_variables();
    assert_eq!(
        run(&["--set", "onlyenv"], &mut firmware),
        Err(Error::BadArgument(SET_USAGE))
    );
    assert_eq!(
        run(&["Timeout", "not-a-guid"], &mut firmware),
        Err(Error::BadArgument(INVALID_GUID))
    );
    assert_eq!(
        run(&[] as &[&str], &mut firmware),
        Err(Error::BadArgument(EFIVAR_COMMAND.usage))
    );
    assert!(firmware.lookups.is_empty());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::BufferTooShort { width: 4, len: 2 }.to_string(),
        "variable holds 2 bytes, 4 needed"
    );
    assert_eq!(
        Error::LookupFailure(LookupError {
            status: EFI_NOT_FOUND
        })
        .to_string(),
        format!("cannot read variable: firmware status {EFI_NOT_FOUND:#x}")
    );
    assert_eq!(Error::BadArgument(SET_USAGE).to_string(), SET_USAGE);
}

#[test]
fn test_non_ucs2_names_skip_lookup() {
    let mut firmware = FakeFirmware::with_variables();
    assert_eq!(
        run(&["Boot\u{1f600}"], &mut firmware),
        Err(Error::BadArgument(INVALID_NAME))
    );
    assert_eq!(
        run(&["--set", "env\u{10000}", "Timeout"], &mut firmware),
        Err(Error::BadArgument(INVALID_NAME))
    );
    assert_eq!(
        run(&["Time\0out"], &mut firmware),
        Err(Error::BadArgument(INVALID_NAME))
    );
    assert!(firmware.lookups.is_empty());
    assert!(firmware.env.is_empty());

    run(&["--set", "Grüße", "--uint16", "Timeout"], &mut firmware).unwrap();
    assert_eq!(firmware.env["Grüße"].as_str(), Some("5"));
}

#[test]
fn test_command_help() {
    assert_eq!(
        EFIVAR_COMMAND.to_string(),
        format!("efivar - {}", EFIVAR_COMMAND.summary)
    );
    assert!(EFIVAR_COMMAND.usage.starts_with("Usage: efivar "));
}
