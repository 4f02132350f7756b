use serde::Serialize;

/// Structured trace events emitted across all cx-inspector crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    ApiCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    FlowIndexBuilt {
        agent_id: String,
        flows: usize,
    },
    ScanCompleted {
        scan: String,
        agent_id: String,
        rows: usize,
    },
    ConditionalSearchCompleted {
        agent_id: String,
        scope: String,
        matches: usize,
        unresolved: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "cx_event");
    }
}
