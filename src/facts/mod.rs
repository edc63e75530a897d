// Host fact collection modules
pub mod collect_dmi;
pub mod collect_network;
pub mod collect_system;
pub mod collector;
pub mod storage;
pub mod types;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{FactsError, Result};

/// A top-level fact group, keyed in the report by its class label.
pub trait Category: Serialize {
    fn class(&self) -> &'static str;
}

/// Class label → category facts, e.g. `"Storage" → StorageInfo`.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Report(BTreeMap<&'static str, Value>);

impl Report {
    pub fn insert<C: Category>(&mut self, facts: &C) -> Result<()> {
        let value = serde_json::to_value(facts).map_err(|e| FactsError::Serialize(e.to_string()))?;
        self.0.insert(facts.class(), value);
        Ok(())
    }
}

// Re-export main collection functions
pub use collect_dmi::collect_dmi_info;
pub use collect_network::collect_network_info;
pub use collect_system::collect_system_info;
pub use collector::collect_report;
pub use storage::StorageConfig;
