use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that abort a whole category gather.
///
/// Per-volume probe failures never show up here; they are absorbed while
/// building the volume list.
#[derive(Error, Debug)]
pub enum FactsError {
    #[error("failed to read mount table {path}: {source}")]
    MountTable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run {program} for class {class}: {source}")]
    ToolLaunch {
        program: String,
        class: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status} for class {class}: {output}")]
    ToolFailed {
        program: String,
        class: &'static str,
        status: ExitStatus,
        output: String,
    },

    #[error("failed to decode {class} documents: {source}")]
    Decode {
        class: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load DMI table: {0}")]
    Dmi(String),

    #[error("failed to encode report: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, FactsError>;
