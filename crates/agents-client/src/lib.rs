//! `cx-agents` — agents API client crate for cx-inspector.
//!
//! Provides the [`AgentsApi`] trait that abstracts over the agent
//! management API, a production REST implementation
//! ([`RestAgentsClient`]), an in-memory implementation serving an
//! exported agent ([`SnapshotAgentsClient`]), and typed DTOs for flows,
//! pages, parameters, routes and event handlers.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cx_domain::config::ApiConfig;
//! use cx_agents::{AgentsApi, RestAgentsClient};
//!
//! # async fn example() -> cx_domain::error::Result<()> {
//! let client = RestAgentsClient::new(&ApiConfig::default())?;
//!
//! let flows = client
//!     .list_flows("projects/my-project/locations/global/agents/1234")
//!     .await?;
//!
//! println!("agent has {} flows", flows.len());
//! # Ok(())
//! # }
//! ```

pub mod provider;
pub mod rest;
pub mod snapshot;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use provider::AgentsApi;
pub use rest::{from_reqwest, RestAgentsClient};
pub use snapshot::{AgentSnapshot, FlowSnapshot, SnapshotAgentsClient};
pub use types::{
    EventHandler, FillBehavior, Flow, Form, Fulfillment, Page, Parameter, Target,
    TransitionRoute,
};

use std::sync::Arc;

use cx_domain::config::ApiConfig;
use cx_domain::error::Result;

/// Create the [`AgentsApi`] backend for a run.
///
/// | `snapshot` | Result                                   |
/// |------------|------------------------------------------|
/// | `Some(p)`  | [`SnapshotAgentsClient`] loaded from `p` |
/// | `None`     | [`RestAgentsClient`] built from `cfg`    |
pub fn create_client(
    cfg: &ApiConfig,
    snapshot: Option<&std::path::Path>,
) -> Result<Arc<dyn AgentsApi>> {
    match snapshot {
        Some(path) => {
            let client = SnapshotAgentsClient::load(path)?;
            tracing::info!(snapshot = %path.display(), "serving agent from snapshot");
            Ok(Arc::new(client))
        }
        None => {
            let client = RestAgentsClient::new(cfg)?;
            tracing::info!(
                base_url = ?cfg.base_url,
                timeout_ms = cfg.timeout_ms,
                "using REST agents API"
            );
            Ok(Arc::new(client))
        }
    }
}
