use std::fs;
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

use nix::sys::statfs::statfs;
use serde::Serialize;
use tracing::debug;

use super::mounts::MountEntry;

/// Block usage as reported by `statfs(2)` for a mount point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Blocks {
    pub size: i64,
    pub total: u64,
    pub free: u64,
    pub avail: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Volume {
    pub backing_device: String,
    pub filesystem: String,
    pub name: String,
    pub options: String,
    /// True when the backing device exists but is not a device node.
    #[serde(rename = "Virtual")]
    pub is_virtual: bool,
    pub blocks: Blocks,
}

/// Host queries needed to describe a mounted volume.
pub trait VolumeProbe {
    /// Whether `path` is a block or character device node.
    fn is_device_node(&self, path: &Path) -> io::Result<bool>;

    fn block_usage(&self, mount_point: &Path) -> io::Result<Blocks>;
}

/// Probe backed by `stat(2)` and `statfs(2)` on the running host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl VolumeProbe for HostProbe {
    fn is_device_node(&self, path: &Path) -> io::Result<bool> {
        let file_type = fs::metadata(path)?.file_type();
        Ok(file_type.is_block_device() || file_type.is_char_device())
    }

    fn block_usage(&self, mount_point: &Path) -> io::Result<Blocks> {
        let stat = statfs(mount_point)?;
        Ok(Blocks {
            size: stat.block_size() as i64,
            total: stat.blocks() as u64,
            free: stat.blocks_free() as u64,
            avail: stat.blocks_available() as u64,
        })
    }
}

/// Describe one mount. Probe failures leave the affected fields at their
/// defaults instead of failing the volume.
pub fn stat_volume<P: VolumeProbe + ?Sized>(entry: MountEntry, probe: &P) -> Volume {
    let is_virtual = match probe.is_device_node(Path::new(&entry.device)) {
        Ok(is_device) => !is_device,
        Err(e) => {
            debug!("cannot stat backing device {}: {}", entry.device, e);
            false
        }
    };

    let blocks = match probe.block_usage(Path::new(&entry.mount_point)) {
        Ok(blocks) => blocks,
        Err(e) => {
            debug!("statfs failed for {}: {}", entry.mount_point, e);
            Blocks::default()
        }
    };

    Volume {
        backing_device: entry.device,
        filesystem: entry.fs_type,
        name: entry.mount_point,
        options: entry.options,
        is_virtual,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        device: io::Result<bool>,
        usage: Option<Blocks>,
    }

    impl VolumeProbe for FixedProbe {
        fn is_device_node(&self, _path: &Path) -> io::Result<bool> {
            match &self.device {
                Ok(v) => Ok(*v),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }

        fn block_usage(&self, _mount_point: &Path) -> io::Result<Blocks> {
            self.usage
                .ok_or_else(|| io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    fn entry(device: &str, mount_point: &str) -> MountEntry {
        MountEntry {
            device: device.to_string(),
            mount_point: mount_point.to_string(),
            fs_type: "ext4".to_string(),
            options: "rw".to_string(),
        }
    }

    #[test]
    fn device_node_with_usage() {
        let usage = Blocks { size: 4096, total: 100, free: 40, avail: 30 };
        let probe = FixedProbe { device: Ok(true), usage: Some(usage) };

        let vol = stat_volume(entry("/dev/sda1", "/"), &probe);
        assert!(!vol.is_virtual);
        assert_eq!(vol.blocks, usage);
        assert_eq!(vol.name, "/");
        assert_eq!(vol.backing_device, "/dev/sda1");
    }

    #[test]
    fn non_device_backing_path_is_virtual() {
        let probe = FixedProbe { device: Ok(false), usage: Some(Blocks::default()) };
        assert!(stat_volume(entry("/", "/tmp/bind"), &probe).is_virtual);
    }

    #[test]
    fn probe_failures_leave_defaults() {
        let probe = FixedProbe {
            device: Err(io::Error::from(io::ErrorKind::NotFound)),
            usage: None,
        };

        let vol = stat_volume(entry("proc", "/proc"), &probe);
        assert!(!vol.is_virtual);
        assert_eq!(vol.blocks, Blocks::default());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let vol = Volume {
            backing_device: "tmpfs".to_string(),
            filesystem: "tmpfs".to_string(),
            name: "/run".to_string(),
            options: "rw".to_string(),
            is_virtual: true,
            blocks: Blocks { size: 4096, total: 1, free: 1, avail: 1 },
        };

        let json = serde_json::to_value(&vol).unwrap();
        assert_eq!(json["BackingDevice"], "tmpfs");
        assert_eq!(json["Virtual"], true);
        assert_eq!(json["Blocks"]["Size"], 4096);
        assert_eq!(json["Blocks"]["Avail"], 1);
    }
}
