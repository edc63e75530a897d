use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{FactsError, Result};

/// Hardware classes requested from the listing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LshwClass {
    Storage,
    Disk,
}

impl LshwClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LshwClass::Storage => "storage",
            LshwClass::Disk => "disk",
        }
    }
}

/// Source of raw, possibly malformed, JSON hardware listings.
pub trait InventoryTool {
    fn list(&self, class: LshwClass) -> Result<String>;
}

/// Runs `lshw -quiet -c <class> -json` and returns stdout followed by stderr.
#[derive(Debug, Clone)]
pub struct Lshw {
    program: PathBuf,
}

impl Lshw {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Lshw {
    fn default() -> Self {
        Self::new("lshw")
    }
}

impl InventoryTool for Lshw {
    /// Output is stdout followed by stderr, not interleaved in write order.
    fn list(&self, class: LshwClass) -> Result<String> {
        let program = self.program.display().to_string();
        debug!("running {} -quiet -c {} -json", program, class.as_str());

        let output = Command::new(&self.program)
            .args(["-quiet", "-c", class.as_str(), "-json"])
            .output()
            .map_err(|source| FactsError::ToolLaunch {
                program: program.clone(),
                class: class.as_str(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(FactsError::ToolFailed {
                program,
                class: class.as_str(),
                status: output.status,
                output: text.trim().to_string(),
            });
        }

        Ok(text)
    }
}
