//! `AgentInspector` — construction, the cached flow-name index and the
//! pacing used by page sweeps. The scans themselves live in sibling
//! modules as further `impl AgentInspector` blocks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cx_agents::AgentsApi;
use cx_domain::config::InspectorConfig;
use cx_domain::error::{Error, Result};
use cx_domain::trace::TraceEvent;

/// Read-only reporting layer over an [`AgentsApi`] backend.
///
/// Every scan takes the agent id explicitly and fetches fresh data. The
/// flow-name index is the only state carried between calls; it is built
/// when an agent is bound and is only as fresh as the last
/// [`refresh`](Self::refresh).
pub struct AgentInspector {
    pub(crate) api: Arc<dyn AgentsApi>,
    pub(crate) page_scan_delay: Duration,
    agent_id: Option<String>,
    flow_index: HashMap<String, String>,
}

impl AgentInspector {
    /// An inspector with no bound agent and an empty flow index.
    pub fn new(api: Arc<dyn AgentsApi>, cfg: &InspectorConfig) -> Self {
        Self {
            api,
            page_scan_delay: Duration::from_millis(cfg.page_scan_delay_ms),
            agent_id: None,
            flow_index: HashMap::new(),
        }
    }

    /// An inspector bound to `agent_id`, with the flow index built eagerly.
    pub async fn for_agent(
        api: Arc<dyn AgentsApi>,
        cfg: &InspectorConfig,
        agent_id: impl Into<String>,
    ) -> Result<Self> {
        let mut inspector = Self::new(api, cfg);
        inspector.agent_id = Some(agent_id.into());
        inspector.refresh().await?;
        Ok(inspector)
    }

    /// Override the pause between page scans of a search sweep.
    pub fn with_page_scan_delay(mut self, delay: Duration) -> Self {
        self.page_scan_delay = delay;
        self
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    /// Rebuild the display name → flow id index for the bound agent.
    pub async fn refresh(&mut self) -> Result<()> {
        let agent_id = self
            .agent_id
            .clone()
            .ok_or_else(|| Error::Config("no agent bound to this inspector".into()))?;

        let flows = self.api.list_flows(&agent_id).await?;
        let mut index = HashMap::with_capacity(flows.len());
        for flow in flows {
            if let Some(previous) = index.insert(flow.display_name.clone(), flow.name.clone()) {
                tracing::warn!(
                    agent_id = %agent_id,
                    display_name = %flow.display_name,
                    replaced = %previous,
                    "duplicate flow display name; keeping the later flow"
                );
            }
        }

        TraceEvent::FlowIndexBuilt {
            agent_id,
            flows: index.len(),
        }
        .emit();

        self.flow_index = index;
        Ok(())
    }

    /// Flow id for a display name, from the cached index.
    pub fn flow_id(&self, display_name: &str) -> Option<&str> {
        self.flow_index.get(display_name).map(String::as_str)
    }

    /// Display names currently in the index, sorted.
    pub fn flow_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flow_index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pacing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Inserts a fixed pause between consecutive page scans of one sweep.
pub(crate) struct Pacer {
    delay: Duration,
    started: bool,
}

impl Pacer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: false,
        }
    }

    /// Returns immediately the first time, then sleeps `delay` per call.
    pub(crate) async fn wait(&mut self) {
        if self.started && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.started = true;
    }
}
