//! Well-known variable vendor GUIDs

#![cfg_attr(not(test), no_std)]

use uefi::guid;
use uefi::Guid;

pub struct VendorGuidName {
    pub guid: Guid,
    pub name: &'static str,
}

/// Vendors whose variables are commonly read at the shell.
/// NOTE: Keep sorted by the lowercase text of the GUID!
const VENDOR_GUIDS: &[VendorGuidName] = &[
    VendorGuidName {
        guid: guid!("0053d9d6-2659-4599-a26b-ef4536e631a9"),
        name: "ShellAlias",
    },
    VendorGuidName {
        guid: guid!("158def5a-f656-419c-b027-7a3192c079d2"),
        name: "ShellVariable",
    },
    VendorGuidName {
        guid: guid!("4a67b082-0a4c-41cf-b6c7-440b29bb8c4f"),
        name: "LoaderInfo",
    },
    VendorGuidName {
        guid: guid!("605dab50-e046-4300-abb6-3dd810dd8b23"),
        name: "ShimLock",
    },
    VendorGuidName {
        guid: guid!("77fa9abd-0359-4d32-bd60-28f4e78f784b"),
        name: "MicrosoftVendor",
    },
    VendorGuidName {
        guid: guid!("8be4df61-93ca-11d2-aa0d-00e098032b8c"),
        name: "EfiGlobalVariable",
    },
    VendorGuidName {
        guid: guid!("d719b2cb-3d3a-4596-a3bc-dad00e67656f"),
        name: "EfiImageSecurityDatabase",
    },
];

/// Vendor of the UEFI Shell's environment variables.
pub const SHELL_VARIABLE_GUID: Guid = guid!("158def5a-f656-419c-b027-7a3192c079d2");

pub fn get_vendor_name(guid: &Guid) -> Option<&'static str> {
    VENDOR_GUIDS
        .binary_search_by_key(&guid.to_ascii_hex_lower(), |x| x.guid.to_ascii_hex_lower())
        .ok()
        .map(|i| VENDOR_GUIDS[i].name)
}
