use tracing::{error, info};

use crate::error::Result;
use crate::facts::{self, Report, StorageConfig};

/// Gather every category into one report. The first failing category
/// aborts the run.
pub fn collect_report(storage: &StorageConfig) -> Result<Report> {
    let mut report = Report::default();

    info!("gathering DMI information");
    let dmi = facts::collect_dmi_info()
        .inspect_err(|e| error!("failed to gather DMI information: {}", e))?;
    report.insert(&dmi)?;

    info!("gathering network information");
    report.insert(&facts::collect_network_info())?;

    info!("gathering basic OS information");
    report.insert(&facts::collect_system_info())?;

    info!("gathering storage information");
    let storage = facts::storage::gather(storage)
        .inspect_err(|e| error!("failed to gather storage information: {}", e))?;
    report.insert(&storage)?;

    Ok(report)
}
