//! The `efivar` collaborators backed by the UEFI runtime and console.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Write;

use efivar_core::FormattedValue;
use efivar_core::Guid;
use efivar_core::Host;
use efivar_core::LookupError;
use efivar_logger::EfiVarConfig;
use uefi::runtime;
use uefi::runtime::VariableAttributes;
use uefi::runtime::VariableVendor;
use uefi::system;
use uefi::CString16;
use uefi::Status;

pub fn to_uefi_guid(guid: &Guid) -> uefi::Guid {
    uefi::Guid::from_bytes(guid.to_efi_bytes())
}

fn vendor_name(vendor: &VariableVendor) -> &'static str {
    vendor_guids::get_vendor_name(&vendor.0).unwrap_or("vendor")
}

pub struct UefiHost {
    env_vendor: VariableVendor,
    env_attributes: VariableAttributes,
}

impl UefiHost {
    pub fn new(config: &EfiVarConfig) -> Self {
        let mut env_attributes = VariableAttributes::BOOTSERVICE_ACCESS;
        if !config.env_volatile {
            env_attributes |= VariableAttributes::NON_VOLATILE;
        }

        Self {
            env_vendor: VariableVendor(
                config
                    .env_vendor
                    .unwrap_or(vendor_guids::SHELL_VARIABLE_GUID),
            ),
            env_attributes,
        }
    }
}

impl Host for UefiHost {
    type Buffer = Box<[u8]>;

    fn lookup_variable(&mut self, name: &str, guid: &Guid) -> Result<Box<[u8]>, LookupError> {
        let vendor = VariableVendor(to_uefi_guid(guid));
        // `execute` rejects names that aren't UCS-2 before calling here; this
        // is the status the firmware itself gives such a name.
        let name16 = CString16::try_from(name).map_err(|_| {
            log::error!("{name:?} is not a UCS-2 variable name");
            LookupError {
                status: Status::INVALID_PARAMETER.0,
            }
        })?;
        log::info!("Reading {name} of {} {}", vendor_name(&vendor), vendor.0);

        let (data, attributes) =
            runtime::get_variable_boxed(&name16, &vendor).map_err(|err| {
                log::error!("Cannot read {name}: {:?}", err.status());
                LookupError {
                    status: err.status().0,
                }
            })?;
        log::debug!("{name}: {} bytes, {attributes:?}", data.len());

        Ok(data)
    }

    fn env_set(&mut self, name: &str, value: &FormattedValue) {
        let Ok(name16) = CString16::try_from(name) else {
            log::error!("Invalid environment variable name {name:?}");
            return;
        };

        let data: Vec<u8> = value
            .ucs2_units()
            .chain(core::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        log::info!(
            "Setting {name} of {} {} to '{value}'",
            vendor_name(&self.env_vendor),
            self.env_vendor.0
        );

        if let Err(err) = runtime::set_variable(&name16, &self.env_vendor, self.env_attributes, &data)
        {
            log::error!("Cannot set {name}: {:?}", err.status());
        }
    }

    fn emit_line(&mut self, value: &FormattedValue) {
        system::with_stdout(|stdout| stdout.write_fmt(format_args!("{value}\n")).ok());
    }
}
