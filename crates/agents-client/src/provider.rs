//! The `AgentsApi` trait defines the read surface every agents backend
//! offers (REST, exported snapshot, test double).

use std::collections::HashMap;

use async_trait::async_trait;
use cx_domain::error::Result;

use crate::types::{Flow, Page};

/// Abstraction over the agent-management API.
///
/// Implementations may talk to the real REST API or serve an exported
/// agent from memory. All methods return `cx_domain::error::Result`.
#[async_trait]
pub trait AgentsApi: Send + Sync {
    /// Every flow of an agent, in service order (GET /v3/{agent}/flows).
    async fn list_flows(&self, agent_id: &str) -> Result<Vec<Flow>>;

    /// A single flow (GET /v3/{flow}).
    async fn get_flow(&self, flow_id: &str) -> Result<Flow>;

    /// Every page of a flow, in service order (GET /v3/{flow}/pages).
    async fn list_pages(&self, flow_id: &str) -> Result<Vec<Page>>;

    /// A single page (GET /v3/{page}).
    async fn get_page(&self, page_id: &str) -> Result<Page>;

    /// Flow id → display name, or display name → flow id when `reverse`.
    async fn get_flows_map(&self, agent_id: &str, reverse: bool) -> Result<HashMap<String, String>> {
        let flows = self.list_flows(agent_id).await?;
        Ok(name_map(
            flows.iter().map(|f| (f.name.as_str(), f.display_name.as_str())),
            reverse,
        ))
    }

    /// Page id → display name, or display name → page id when `reverse`.
    async fn get_pages_map(&self, flow_id: &str, reverse: bool) -> Result<HashMap<String, String>> {
        let pages = self.list_pages(flow_id).await?;
        Ok(name_map(
            pages.iter().map(|p| (p.name.as_str(), p.display_name.as_str())),
            reverse,
        ))
    }
}

/// Collect `(id, display_name)` pairs into a lookup map.
///
/// Display names are assumed unique per parent; on a collision in the
/// reverse direction the later resource wins.
pub fn name_map<'a>(
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
    reverse: bool,
) -> HashMap<String, String> {
    pairs
        .map(|(id, display)| {
            if reverse {
                (display.to_owned(), id.to_owned())
            } else {
                (id.to_owned(), display.to_owned())
            }
        })
        .collect()
}
