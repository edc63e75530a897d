use serde::Serialize;

use crate::facts::Category;

#[derive(Debug, Default, Serialize)]
pub struct DmiInfo {
    pub system: Option<SystemIdentity>,
    pub baseboard: Option<BaseboardInfo>,
    pub chassis: Option<ChassisInfo>,
    pub bios: Option<BiosInfo>,
}

impl Category for DmiInfo {
    fn class(&self) -> &'static str {
        "DMI"
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SystemIdentity {
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub version: Option<String>,
    pub serial_number: Option<String>,
    pub uuid: Option<String>,
    pub sku_number: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct BaseboardInfo {
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub version: Option<String>,
    pub serial_number: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ChassisInfo {
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub asset_tag: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct BiosInfo {
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NetworkInfo {
    pub interfaces: Vec<NetInterface>,
    pub routes: Vec<RouteInfo>,
}

impl Category for NetworkInfo {
    fn class(&self) -> &'static str {
        "Network"
    }
}

#[derive(Debug, Serialize)]
pub struct NetInterface {
    pub name: String,
    pub mac_address: Option<String>,
    pub mtu: Option<u32>,
    pub speed_mbps: Option<u32>,
    pub operstate: Option<String>,
    pub driver: Option<String>,
    pub vendor_name: Option<String>,
    pub device_name: Option<String>,
    pub pci_address: Option<String>,
    /// No backing device under sysfs (loopback, bridges, veth, tunnels...).
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub addresses: Vec<IpAddress>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct IpAddress {
    pub family: String, // "inet" or "inet6"
    pub address: String,
    pub prefix: u8,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteInfo {
    pub dst: String,     // CIDR or "default"
    pub gateway: String, // IP
    pub iface: String,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub kernel_version: Option<String>,
    pub architecture: String,
    pub cpu_count: usize,
    pub total_memory_bytes: u64,
    pub boot_time: Option<String>,
    pub collected_at: String,
}

impl Category for SystemInfo {
    fn class(&self) -> &'static str {
        "System"
    }
}
