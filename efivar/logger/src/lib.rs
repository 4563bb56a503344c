#![no_std]

//! Logging facilities for the `efivar` shell command.
//!
//! The records go to the console through the boot services, so the
//! logger must not be used once they are gone.

use core::fmt::Write;

use conquer_once::spin::OnceCell;
use log::LevelFilter;
use uefi::system;

#[derive(Debug, Clone)]
pub struct EfiVarConfig {
    /// The target device for logging.
    pub log_device: LogDevice,
    /// Verbosity for logging.
    pub log_level: LevelFilter,
    /// Log source line and path.
    pub log_source_path: bool,
    /// Vendor of the variables written by `--set`, the shell's
    /// environment vendor if `None`.
    pub env_vendor: Option<uefi::Guid>,
    /// Whether the variables written by `--set` are gone after a reboot.
    pub env_volatile: bool,
}

impl Default for EfiVarConfig {
    fn default() -> Self {
        Self {
            log_device: LogDevice::StdErr,
            log_level: LevelFilter::Warn,
            log_source_path: false,
            env_vendor: None,
            env_volatile: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDevice {
    Null,
    StdOut,
    StdErr,
}

/// Single-thread logger
#[derive(Debug)]
pub struct EfiVarLogger {
    device: LogDevice,
    log_source_path: bool,
}

impl EfiVarLogger {
    fn write(&self, output: &mut dyn Write, record: &log::Record) {
        output
            .write_fmt(format_args!(
                "[{:7}][{}",
                record.level(),
                record.module_path().unwrap_or_default(),
            ))
            .ok();
        if self.log_source_path {
            output
                .write_fmt(format_args!(
                    " {}@{}",
                    record.file().unwrap_or_default(),
                    record.line().unwrap_or_default(),
                ))
                .ok();
        }
        output
            .write_fmt(format_args!("] {}\n", record.args()))
            .ok();
    }
}

unsafe impl Send for EfiVarLogger {}
unsafe impl Sync for EfiVarLogger {}

impl log::Log for EfiVarLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        self.device != LogDevice::Null
    }

    fn log(&self, record: &log::Record) {
        if uefi::table::system_table_raw().is_none() {
            return;
        }
        match self.device {
            LogDevice::Null => {}
            LogDevice::StdOut => system::with_stdout(|stdout| self.write(stdout, record)),
            LogDevice::StdErr => system::with_stderr(|stderr| self.write(stderr, record)),
        }
    }

    fn flush(&self) {}
}

static EFIVAR_LOGGER: OnceCell<EfiVarLogger> = OnceCell::uninit();

pub fn setup_logger(config: &EfiVarConfig) {
    let logger = EFIVAR_LOGGER.get_or_init(|| EfiVarLogger {
        device: config.log_device,
        log_source_path: config.log_source_path,
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(config.log_level);
    }
}
