use chrono::{DateTime, Utc};
use sysinfo::System;

use crate::facts::types::SystemInfo;

pub fn collect_system_info() -> SystemInfo {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.refresh_memory();

    SystemInfo {
        hostname: System::host_name(),
        os_name: System::name(),
        os_version: System::os_version(),
        kernel_version: System::kernel_version(),
        architecture: std::env::consts::ARCH.to_string(),
        cpu_count: sys.cpus().len(),
        total_memory_bytes: sys.total_memory(),
        boot_time: format_epoch(System::boot_time()),
        collected_at: Utc::now().to_rfc3339(),
    }
}

/// RFC 3339 timestamp for seconds since the epoch; 0 means unknown.
fn format_epoch(secs: u64) -> Option<String> {
    if secs == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, 0).map(|t| t.to_rfc3339())
}
