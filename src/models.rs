use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::format::format_u64;
use crate::system_monitor::{SystemSnapshot, Usage};

// ---------------------------------------------------------------------------
// GET /api/stats
// ---------------------------------------------------------------------------

/// Used / total of one resource, sizes already human-scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UsageStats {
    /// e.g. `"15.52 GB"`
    pub total: String,
    /// e.g. `"3.10 GB"`
    pub used: String,
    pub percent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemStats {
    pub platform: String,
    pub cpu_percent: f32,
    pub memory: UsageStats,
    pub disk: UsageStats,
}

impl From<&Usage> for UsageStats {
    fn from(usage: &Usage) -> Self {
        Self {
            total: format_u64(usage.total_bytes),
            used: format_u64(usage.used_bytes),
            percent: usage.percent,
        }
    }
}

impl From<&SystemSnapshot> for SystemStats {
    fn from(snap: &SystemSnapshot) -> Self {
        Self {
            platform: snap.platform.clone(),
            cpu_percent: snap.cpu_percent,
            memory: UsageStats::from(&snap.memory),
            disk: UsageStats::from(&snap.disk),
        }
    }
}
