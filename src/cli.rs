use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::facts::storage::{StorageConfig, DEFAULT_MOUNT_TABLE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "hostfacts")]
#[command(about = "Print a one-shot JSON snapshot of this host's hardware and OS facts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (json or yaml)
    #[arg(short, long, global = true, default_value = "json", value_parser = ["json", "yaml"])]
    pub format: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct StorageArgs {
    /// Hardware listing program queried for storage controllers and disks
    #[arg(long, global = true, env = "HOSTFACTS_LSHW", default_value = "lshw")]
    pub lshw: PathBuf,

    /// Mount table to read volumes from
    #[arg(long, global = true, default_value = DEFAULT_MOUNT_TABLE)]
    pub mounts: PathBuf,
}

impl StorageArgs {
    pub fn to_config(&self) -> StorageConfig {
        StorageConfig {
            mount_table: self.mounts.clone(),
            lshw: self.lshw.clone(),
        }
    }
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Gather every category into one report (default)
    Gather,
    /// DMI/SMBIOS identity: system, baseboard, chassis, BIOS
    Dmi,
    /// Network interfaces, addresses and routes
    Network,
    /// Basic OS information
    System,
    /// Mounted volumes, storage controllers and disks
    Storage,
}
