// Storage facts: mounted volumes plus lshw's storage controllers and disks.
pub mod lshw;
pub mod mounts;
pub mod repair;
pub mod volume;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::facts::Category;

pub use lshw::{InventoryTool, Lshw, LshwClass};
pub use mounts::open_mount_table;
pub use volume::{HostProbe, Volume, VolumeProbe};

pub const DEFAULT_MOUNT_TABLE: &str = "/proc/self/mounts";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub mount_table: PathBuf,
    pub lshw: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mount_table: PathBuf::from(DEFAULT_MOUNT_TABLE),
            lshw: PathBuf::from("lshw"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageInfo {
    pub volumes: Vec<Volume>,
    /// Raw `lshw -c disk` documents.
    pub disks: Vec<Value>,
    /// Raw `lshw -c storage` documents.
    pub controllers: Vec<Value>,
}

impl Category for StorageInfo {
    fn class(&self) -> &'static str {
        "Storage"
    }
}

/// Gather storage facts from the running host.
pub fn gather(config: &StorageConfig) -> Result<StorageInfo> {
    gather_with(config, &HostProbe, &Lshw::new(&config.lshw))
}

/// Gather with explicit probe and listing tool.
///
/// Any mount table, tool or decode error fails the whole call; nothing
/// gathered so far is returned.
pub fn gather_with<P, T>(config: &StorageConfig, probe: &P, tool: &T) -> Result<StorageInfo>
where
    P: VolumeProbe + ?Sized,
    T: InventoryTool + ?Sized,
{
    let volumes = open_mount_table(&config.mount_table)?
        .map(|entry| entry.map(|entry| volume::stat_volume(entry, probe)))
        .collect::<Result<Vec<Volume>>>()?;
    debug!("collected {} volumes from {}", volumes.len(), config.mount_table.display());

    let controllers = list_documents(tool, LshwClass::Storage)?;
    let disks = list_documents(tool, LshwClass::Disk)?;

    info!(
        "storage: {} volumes, {} disks, {} controllers",
        volumes.len(),
        disks.len(),
        controllers.len()
    );

    Ok(StorageInfo {
        volumes,
        disks,
        controllers,
    })
}

fn list_documents<T: InventoryTool + ?Sized>(tool: &T, class: LshwClass) -> Result<Vec<Value>> {
    let raw = tool.list(class)?;
    repair::decode_documents(class.as_str(), &raw)
}
