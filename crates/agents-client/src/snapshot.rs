//! In-memory [`AgentsApi`] backed by an exported agent.
//!
//! A snapshot is the API's own JSON for each flow, with that flow's pages
//! nested under a `pages` key:
//!
//! ```json
//! { "flows": [ { "name": ".../flows/f1", "displayName": "Main", "pages": [ ... ] } ] }
//! ```
//!
//! Lookups are linear scans; agents have tens to low hundreds of pages.

use std::path::Path;

use async_trait::async_trait;
use cx_domain::error::{Error, Result};
use serde::Deserialize;

use crate::provider::AgentsApi;
use crate::types::{Flow, Page};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentSnapshot {
    #[serde(default)]
    pub flows: Vec<FlowSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowSnapshot {
    #[serde(flatten)]
    pub flow: Flow,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Serves flows and pages from an [`AgentSnapshot`].
///
/// A flow belongs to the agent whose id prefixes the flow's resource
/// name, so one snapshot may hold several agents.
#[derive(Debug, Clone, Default)]
pub struct SnapshotAgentsClient {
    snapshot: AgentSnapshot,
}

impl SnapshotAgentsClient {
    pub fn new(snapshot: AgentSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn flow_entry(&self, flow_id: &str) -> Result<&FlowSnapshot> {
        self.snapshot
            .flows
            .iter()
            .find(|f| f.flow.name == flow_id)
            .ok_or_else(|| Error::NotFound(format!("flow {flow_id}")))
    }
}

#[async_trait]
impl AgentsApi for SnapshotAgentsClient {
    async fn list_flows(&self, agent_id: &str) -> Result<Vec<Flow>> {
        let prefix = format!("{}/flows/", agent_id.trim_end_matches('/'));
        Ok(self
            .snapshot
            .flows
            .iter()
            .filter(|f| f.flow.name.starts_with(&prefix))
            .map(|f| f.flow.clone())
            .collect())
    }

    async fn get_flow(&self, flow_id: &str) -> Result<Flow> {
        self.flow_entry(flow_id).map(|f| f.flow.clone())
    }

    async fn list_pages(&self, flow_id: &str) -> Result<Vec<Page>> {
        self.flow_entry(flow_id).map(|f| f.pages.clone())
    }

    async fn get_page(&self, page_id: &str) -> Result<Page> {
        self.snapshot
            .flows
            .iter()
            .flat_map(|f| f.pages.iter())
            .find(|p| p.name == page_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("page {page_id}")))
    }
}
