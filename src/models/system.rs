// Host metrics snapshot, as served by GET /api/system/status

use serde::{Deserialize, Serialize};

/// Latest host metrics; fetched fresh every cycle, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub ram_used_gb: f64,
    pub ram_total_gb: f64,
    pub disk_percent: f64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    pub platform: String,
    pub architecture: String,
}

impl SystemStatus {
    /// Combined identity label, e.g. "Linux 6.1.0 (x86_64)".
    pub fn platform_label(&self) -> String {
        format!("{} ({})", self.platform, self.architecture)
    }
}
