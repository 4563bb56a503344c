#![no_std]
#![no_main]
#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod firmware;

use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::arch::asm;
use core::fmt::Write;

use efivar_core::Error;
use efivar_core::LookupError;
use efivar_core::EFIVAR_COMMAND;
use efivar_logger::EfiVarConfig;
use efivar_logger::LogDevice;
use log::LevelFilter;
use uefi::boot;
use uefi::proto::loaded_image::LoadedImage;
use uefi::proto::media::file::File;
use uefi::proto::media::file::FileAttribute;
use uefi::proto::media::file::FileMode;
use uefi::proto::media::fs::SimpleFileSystem;
use uefi::proto::shell_params::ShellParameters;
use uefi::system;
use uefi::CStr16;
use uefi::Status;

/// The name of the configuration file in the ESP partition alongside the command.
const EFIVAR_INI: &CStr16 = uefi::cstr16!("efivar.ini");

fn parse_bool(value: &[u8]) -> bool {
    value == b"yes" || value == b"on" || value == b"1" || value == b"true"
}

/// The settings read before the first malformed line, and the error on it.
fn parse_config(bytes: &[u8]) -> (EfiVarConfig, Option<ini_file::Error>) {
    let mut config = EfiVarConfig::default();

    for entry in ini_file::Parser::new(bytes) {
        let ini_file::KeyValue { key, value } = match entry {
            Ok(entry) => entry,
            Err(err) => return (config, Some(err)),
        };
        match key {
            b"log_device" => match value {
                b"null" => config.log_device = LogDevice::Null,
                b"stdout" => config.log_device = LogDevice::StdOut,
                b"stderr" => config.log_device = LogDevice::StdErr,
                _ => continue,
            },
            b"log_level" => match value {
                b"info" => config.log_level = LevelFilter::Info,
                b"warn" => config.log_level = LevelFilter::Warn,
                b"error" => config.log_level = LevelFilter::Error,
                b"debug" => config.log_level = LevelFilter::Debug,
                b"trace" => config.log_level = LevelFilter::Trace,
                _ => continue,
            },
            b"log_source_path" => config.log_source_path = parse_bool(value),
            b"env_vendor" => {
                if let Ok(guid) = efivar_core::Guid::parse(
                    core::str::from_utf8(value).unwrap_or_default(),
                ) {
                    config.env_vendor = Some(firmware::to_uefi_guid(&guid));
                }
            }
            b"env_volatile" => config.env_volatile = parse_bool(value),
            _ => continue,
        }
    }

    (config, None)
}

fn get_config() -> (EfiVarConfig, Option<ini_file::Error>) {
    let mut result = (EfiVarConfig::default(), None);
    if let Ok(fs_handle) = boot::get_handle_for_protocol::<SimpleFileSystem>() {
        if let Ok(mut fs) = boot::open_protocol_exclusive::<SimpleFileSystem>(fs_handle) {
            if let Ok(mut root_directory) = fs.open_volume() {
                if let Ok(file) =
                    root_directory.open(EFIVAR_INI, FileMode::Read, FileAttribute::empty())
                {
                    if let Some(mut file) = file.into_regular_file() {
                        let mut buf = [0_u8; 4096];
                        let bytes_read: usize = file.read(&mut buf).unwrap_or_default();
                        result = parse_config(&buf[..bytes_read]);
                    }
                }
            }
        }
    }

    result
}

/// Arguments following the command name. The shell hands them out
/// already parsed; without it, the load options hold the whole command
/// line, the command name included.
fn command_args() -> Vec<String> {
    let mut args = match boot::open_protocol_exclusive::<ShellParameters>(boot::image_handle()) {
        Ok(params) => params.args().map(|arg| arg.to_string()).collect(),
        Err(_) => {
            log::debug!("No shell parameters, splitting the load options");
            let command_line = boot::open_protocol_exclusive::<LoadedImage>(boot::image_handle())
                .ok()
                .and_then(|image| {
                    image
                        .load_options_as_cstr16()
                        .ok()
                        .map(|options| options.to_string())
                })
                .unwrap_or_default();
            efivar_core::split_command_line(&command_line)
        }
    };
    log::debug!("Command line {args:?}");

    if !args.is_empty() {
        args.remove(0);
    }
    args
}

fn error_status(error: &Error) -> Status {
    match error {
        Error::BadArgument(_) => Status::INVALID_PARAMETER,
        Error::LookupFailure(LookupError { status }) => Status(*status),
        Error::OutOfMemory => Status::OUT_OF_RESOURCES,
        Error::BufferTooShort { .. } => Status::BAD_BUFFER_SIZE,
    }
}

fn dead_loop() -> ! {
    #[cfg(target_arch = "x86_64")]
    loop {
        unsafe {
            asm!("cli", "hlt", options(nomem, nostack));
        }
    }
    #[cfg(target_arch = "aarch64")]
    loop {
        unsafe {
            asm!("wfe", options(nomem, nostack));
        }
    }
}

#[cfg(target_os = "uefi")]
#[panic_handler]
fn panic(panic: &core::panic::PanicInfo<'_>) -> ! {
    log::error!("{panic}");
    dead_loop()
}

#[uefi::entry]
fn main() -> Status {
    let (config, config_error) = get_config();
    efivar_logger::setup_logger(&config);
    if let Some(err) = config_error {
        log::warn!("{EFIVAR_INI} is malformed: {err:?}");
    }

    let args = command_args();
    let mut host = firmware::UefiHost::new(&config);
    match efivar_core::run(&args, &mut host) {
        Ok(()) => Status::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            system::with_stderr(|stderr| {
                if matches!(err, Error::BadArgument(_)) {
                    stderr.write_fmt(format_args!("{EFIVAR_COMMAND}\n")).ok();
                }
                stderr
                    .write_fmt(format_args!("{}: {err}\n", EFIVAR_COMMAND.name))
                    .ok();
            });
            error_status(&err)
        }
    }
}
