//! `cx-inspector` — structural reports over a conversational agent.
//!
//! [`AgentInspector`] walks an agent through any [`cx_agents::AgentsApi`]
//! backend (Agent → Flows → Pages → Parameters / Routes / Handlers) and
//! projects what it finds into rows:
//!
//! | Operation                          | Result                        |
//! |------------------------------------|-------------------------------|
//! | `find_event_handlers`              | [`EventHandlerScan`]          |
//! | `flow/page/parameter_level_handlers` | handler rows per level      |
//! | `find_list_parameters`             | `Vec<String>` of names        |
//! | `search_conditionals`              | [`SearchOutcome`]             |
//! | `search_conditionals_flow/page`    | `Vec<`[`RouteMatch`]`>`       |
//! | `find_true_routes`                 | `Vec<`[`TrueRouteAudit`]`>`   |
//!
//! Everything is read-only and fetched fresh per call; calls run one
//! request at a time.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cx_agents::SnapshotAgentsClient;
//! use cx_domain::config::InspectorConfig;
//! use cx_inspector::{AgentInspector, ConditionalSearch};
//!
//! # async fn example() -> cx_domain::error::Result<()> {
//! let api = Arc::new(SnapshotAgentsClient::load("agent.json")?);
//! let inspector = AgentInspector::new(api, &InspectorConfig::default());
//! let agent = "projects/acme/locations/global/agents/1234";
//!
//! let query = ConditionalSearch::new("status").search_all(true);
//! if let Some(outcome) = inspector.search_conditionals(agent, &query).await? {
//!     println!("{} matching routes", outcome.matches.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod handlers;
pub mod inspector;
pub mod parameters;
pub mod rows;
pub mod search;

pub use inspector::AgentInspector;
pub use rows::{
    ConditionalMatch, EventHandlerScan, FlowHandlerRow, HandlerColumns, PageHandlerRow,
    ParameterHandlerRow, ResourceKind, RouteMatch, TrueRouteAudit,
};
pub use search::{condition_matches, ConditionalSearch, ResolutionFault, SearchOutcome, SearchScope};
