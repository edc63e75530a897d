use std::fs;
use std::path::Path;

use smbioslib::*;
use tracing::debug;

use crate::error::{FactsError, Result};
use crate::facts::types::{BaseboardInfo, BiosInfo, ChassisInfo, DmiInfo, SystemIdentity};

const DMI_TABLE: &str = "/sys/firmware/dmi/tables/DMI";
const DMI_ID_DIR: &str = "/sys/class/dmi/id";

/// Values firmware vendors leave in unset DMI strings.
const PLACEHOLDERS: &[&str] = &[
    "Not Specified",
    "Not Available",
    "To Be Filled By O.E.M.",
    "Default string",
    "System Product Name",
];

pub fn collect_dmi_info() -> Result<DmiInfo> {
    let smbios_data = SMBiosData::try_load_from_file(DMI_TABLE, None)
        .map_err(|e| FactsError::Dmi(format!("{}: {}", DMI_TABLE, e)))?;

    let mut info = DmiInfo::default();

    for structure in smbios_data.iter() {
        match structure.defined_struct() {
            DefinedStruct::SystemInformation(system_struct) => {
                info.system = Some(SystemIdentity {
                    manufacturer: clean(system_struct.manufacturer().to_utf8_lossy()),
                    product_name: clean(system_struct.product_name().to_utf8_lossy()),
                    version: clean(system_struct.version().to_utf8_lossy()),
                    serial_number: clean(system_struct.serial_number().to_utf8_lossy()),
                    // Only readable by root; the sysfs copy is already formatted.
                    uuid: read_to_string_trim(Path::new(DMI_ID_DIR).join("product_uuid")),
                    sku_number: clean(system_struct.sku_number().to_utf8_lossy()),
                });
            }

            DefinedStruct::BaseBoardInformation(baseboard_struct) => {
                let baseboard = BaseboardInfo {
                    manufacturer: clean(baseboard_struct.manufacturer().to_utf8_lossy()),
                    product_name: clean(baseboard_struct.product().to_utf8_lossy()),
                    version: clean(baseboard_struct.version().to_utf8_lossy()),
                    serial_number: clean(baseboard_struct.serial_number().to_utf8_lossy()),
                };
                // First board wins; add-in boards follow the main one.
                if info.baseboard.is_none() {
                    info.baseboard = Some(baseboard);
                }
            }

            DefinedStruct::SystemChassisInformation(chassis_struct) => {
                info.chassis = Some(ChassisInfo {
                    manufacturer: clean(chassis_struct.manufacturer().to_utf8_lossy()),
                    serial_number: clean(chassis_struct.serial_number().to_utf8_lossy()),
                    asset_tag: clean(chassis_struct.asset_tag_number().to_utf8_lossy()),
                });
            }

            DefinedStruct::Information(bios_struct) => {
                info.bios = Some(BiosInfo {
                    vendor: clean(bios_struct.vendor().to_utf8_lossy()),
                    version: clean(bios_struct.version().to_utf8_lossy()),
                    release_date: clean(bios_struct.release_date().to_utf8_lossy()),
                });
            }

            _ => continue,
        }
    }

    debug!(
        "dmi: system={} baseboard={} chassis={} bios={}",
        info.system.is_some(),
        info.baseboard.is_some(),
        info.chassis.is_some(),
        info.bios.is_some()
    );

    Ok(info)
}

/// Drop empty and placeholder strings.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !PLACEHOLDERS.contains(&s.as_str()))
}

fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::clean;

    #[test]
    fn placeholders_are_dropped() {
        assert_eq!(clean(Some("To Be Filled By O.E.M.".to_string())), None);
        assert_eq!(clean(Some("  ".to_string())), None);
        assert_eq!(clean(None), None);
        assert_eq!(clean(Some(" Dell Inc. ".to_string())), Some("Dell Inc.".to_string()));
    }
}
