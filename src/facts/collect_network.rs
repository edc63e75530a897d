use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use pciid_parser::Database;
use serde_json::Value;
use tracing::debug;

use crate::facts::types::{IpAddress, NetInterface, NetworkInfo, RouteInfo};

/// Entry point: every interface under /sys/class/net plus the routing table.
pub fn collect_network_info() -> NetworkInfo {
    let mut iface_addrs = ip_json(&["-j", "addr"])
        .map(|json| parse_ip_addrs(&json))
        .unwrap_or_default();
    let routes = ip_json(&["-j", "route"])
        .map(|json| parse_routes(&json))
        .unwrap_or_default();

    let mut interfaces = Vec::new();

    let entries = match fs::read_dir("/sys/class/net") {
        Ok(e) => e,
        Err(e) => {
            debug!("cannot list /sys/class/net: {}", e);
            return NetworkInfo { interfaces, routes };
        }
    };

    // Loaded lazily: most hosts only need it for one or two NICs.
    let mut pci_db: Option<Option<Database>> = None;

    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };

        let iface_sys_path = entry.path();
        let device_path = iface_sys_path.join("device");
        let is_virtual = !device_path.exists();

        let (vendor_name, device_name) = if is_virtual {
            (None, None)
        } else {
            let db = pci_db.get_or_insert_with(|| Database::read().ok());
            read_vendor_device_info(&device_path, db.as_ref())
        };

        interfaces.push(NetInterface {
            mac_address: read_to_string_trim(iface_sys_path.join("address")),
            mtu: read_to_u32(iface_sys_path.join("mtu")),
            // Reads fail with EINVAL while the link is down.
            speed_mbps: read_to_u32(iface_sys_path.join("speed")),
            operstate: read_to_string_trim(iface_sys_path.join("operstate")),
            driver: read_link_name(&device_path.join("driver")),
            vendor_name,
            device_name,
            pci_address: read_pci_address(&device_path),
            is_virtual,
            addresses: iface_addrs.remove(&name).unwrap_or_default(),
            name,
        });
    }

    interfaces.sort_by(|a, b| a.name.cmp(&b.name));

    NetworkInfo { interfaces, routes }
}

//
// Interfaces: /sys helpers
//

fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_to_u32<P: AsRef<Path>>(path: P) -> Option<u32> {
    let s = read_to_string_trim(path)?;
    s.parse::<u32>().ok()
}

/// Basename of a sysfs symlink, e.g. `device/driver -> .../e1000e`.
fn read_link_name(link_path: &Path) -> Option<String> {
    let link = fs::read_link(link_path).ok()?;
    link.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
}

/// Read PCI address from /sys/class/net/<iface>/device symlink
fn read_pci_address(device_path: &Path) -> Option<String> {
    let link_target = fs::read_link(device_path).ok()?;
    link_target
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .filter(|name| is_pci_address(name))
        .last()
        .map(|s| s.to_string())
}

fn is_pci_address(s: &str) -> bool {
    // PCI address format: 0000:3b:00.0 (domain:bus:device.function)
    s.len() >= 12 && s.matches(':').count() == 2 && s.contains('.')
}

fn read_vendor_device_info(device_path: &Path, db: Option<&Database>) -> (Option<String>, Option<String>) {
    let vendor_id = read_to_string_trim(device_path.join("vendor"));
    let device_id = read_to_string_trim(device_path.join("device"));

    match (vendor_id, device_id, db) {
        (Some(vendor), Some(device), Some(db)) => match lookup_pci_ids(db, &vendor, &device) {
            Some((vendor_name, device_name)) => (Some(vendor_name), Some(device_name)),
            None => (None, None),
        },
        _ => (None, None),
    }
}

/// Look up vendor and device names using the PCI database
fn lookup_pci_ids(db: &Database, vendor_hex: &str, device_hex: &str) -> Option<(String, String)> {
    let vendor_id = parse_hex_id(vendor_hex)?;
    let device_id = parse_hex_id(device_hex)?;

    let vendor = db.vendors.get(&vendor_id)?;
    let device_name = vendor
        .devices
        .get(&device_id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| format!("Unknown Device [{}]", device_hex));

    Some((vendor.name.clone(), device_name))
}

fn parse_hex_id(hex: &str) -> Option<u16> {
    u16::from_str_radix(hex.strip_prefix("0x").unwrap_or(hex), 16).ok()
}

//
// `ip -j` output
//

fn ip_json(args: &[&str]) -> Option<Value> {
    let output = match Command::new("ip").args(args).output() {
        Ok(o) if o.status.success() => o,
        Ok(o) => {
            debug!("ip {} exited with {}", args.join(" "), o.status);
            return None;
        }
        Err(e) => {
            debug!("cannot run ip: {}", e);
            return None;
        }
    };

    serde_json::from_slice(&output.stdout).ok()
}

/// Addresses per interface name from `ip -j addr`.
fn parse_ip_addrs(json: &Value) -> HashMap<String, Vec<IpAddress>> {
    let mut map = HashMap::new();

    for iface in json.as_array().into_iter().flatten() {
        let ifname = match iface.get("ifname").and_then(|v| v.as_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        let addrs = iface
            .get("addr_info")
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .filter_map(|addr| {
                let local = addr.get("local").and_then(|v| v.as_str())?;
                if local.is_empty() {
                    return None;
                }
                Some(IpAddress {
                    family: addr.get("family").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                    address: local.to_string(),
                    prefix: addr.get("prefixlen").and_then(|v| v.as_u64()).unwrap_or(0) as u8,
                })
            })
            .collect();

        map.insert(ifname, addrs);
    }

    map
}

fn parse_routes(json: &Value) -> Vec<RouteInfo> {
    let field = |r: &Value, key: &str, default: &str| {
        r.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string()
    };

    json.as_array()
        .into_iter()
        .flatten()
        .map(|r| RouteInfo {
            dst: field(r, "dst", "default"),
            gateway: field(r, "gateway", ""),
            iface: field(r, "dev", ""),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn addresses_grouped_by_interface() {
        let json = json!([
            {"ifname": "lo", "addr_info": [{"family": "inet", "local": "127.0.0.1", "prefixlen": 8}]},
            {"ifname": "eth0", "addr_info": [
                {"family": "inet", "local": "10.0.0.5", "prefixlen": 24},
                {"family": "inet6", "local": "fe80::1", "prefixlen": 64}
            ]},
            {"addr_info": []}
        ]);

        let map = parse_ip_addrs(&json);
        assert_eq!(map.len(), 2);
        assert_eq!(map["eth0"].len(), 2);
        assert_eq!(
            map["eth0"][1],
            IpAddress { family: "inet6".to_string(), address: "fe80::1".to_string(), prefix: 64 }
        );
    }

    #[test]
    fn routes_default_destination() {
        let json = json!([
            {"dst": "default", "gateway": "10.0.0.1", "dev": "eth0"},
            {"dst": "10.0.0.0/24", "dev": "eth0"}
        ]);

        let routes = parse_routes(&json);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].gateway, "10.0.0.1");
        assert_eq!(routes[1].gateway, "");
        assert_eq!(routes[1].dst, "10.0.0.0/24");
    }

    #[test]
    fn pci_address_shape() {
        assert!(is_pci_address("0000:3b:00.0"));
        assert!(!is_pci_address("virtio0"));
        assert_eq!(parse_hex_id("0x8086"), Some(0x8086));
        assert_eq!(parse_hex_id("zz"), None);
    }
}
