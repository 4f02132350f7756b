use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Inspector behaviour
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Agent used when a command does not name one explicitly.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Pause between consecutive page scans in a conditional-search sweep.
    #[serde(default = "d_500")]
    pub page_scan_delay_ms: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            agent_id: None,
            page_scan_delay_ms: 500,
        }
    }
}

fn d_500() -> u64 {
    500
}
