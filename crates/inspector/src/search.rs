//! Conditional-route search.
//!
//! A route matches when the search string occurs in its condition,
//! ignoring case. The leaf scans cover one flow or one page; the
//! dispatcher resolves display names and picks a [`SearchScope`].
//!
//! Name resolution is best-effort: an unknown flow or page name is logged
//! and recorded as a [`ResolutionFault`] in the outcome, and the branch
//! contributes no rows. Fetch errors still propagate.

use cx_agents::TransitionRoute;
use cx_domain::error::Result;
use cx_domain::trace::TraceEvent;
use serde::Serialize;

use crate::inspector::{AgentInspector, Pacer};
use crate::rows::{ConditionalMatch, ResourceKind, RouteMatch};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request & scope
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parameters of a [`AgentInspector::search_conditionals`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalSearch {
    pub search: String,
    pub flow_name: Option<String>,
    pub page_name: Option<String>,
    /// Widen a flow search to its pages, or search the whole agent when
    /// no flow is named.
    pub search_all: bool,
}

impl ConditionalSearch {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn in_flow(mut self, flow_name: impl Into<String>) -> Self {
        self.flow_name = Some(flow_name.into());
        self
    }

    pub fn in_page(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = Some(page_name.into());
        self
    }

    pub fn search_all(mut self, search_all: bool) -> Self {
        self.search_all = search_all;
        self
    }

    /// The scope this request covers, or `None` when it names nothing to
    /// search (no flow, no page, `search_all` unset).
    pub fn scope(&self) -> Option<SearchScope<'_>> {
        match (self.flow_name.as_deref(), self.page_name.as_deref()) {
            (flow_name, Some(page_name)) => Some(SearchScope::Page {
                flow_name,
                page_name,
            }),
            (Some(flow_name), None) => Some(SearchScope::Flow {
                flow_name,
                include_pages: self.search_all,
            }),
            (None, None) if self.search_all => Some(SearchScope::Agent),
            (None, None) => None,
        }
    }
}

/// What a conditional search covers, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope<'a> {
    /// A single page; its flow is needed to resolve the page name.
    Page {
        flow_name: Option<&'a str>,
        page_name: &'a str,
    },
    /// A flow's own routes, plus every page of it when `include_pages`.
    Flow {
        flow_name: &'a str,
        include_pages: bool,
    },
    /// Every flow of the agent and every page of each flow.
    Agent,
}

impl SearchScope<'_> {
    fn label(&self) -> &'static str {
        match self {
            SearchScope::Page { .. } => "page",
            SearchScope::Flow {
                include_pages: false,
                ..
            } => "flow",
            SearchScope::Flow {
                include_pages: true,
                ..
            } => "flow_and_pages",
            SearchScope::Agent => "agent",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Outcome
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A display name that could not be resolved to a resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum ResolutionFault {
    #[error("{flow_name} is not a valid flow_name for agent {agent_id}")]
    UnknownFlow { flow_name: String, agent_id: String },

    #[error("{page_name} is not a valid page_name for flow {flow_name} in agent {agent_id}")]
    UnknownPage {
        page_name: String,
        flow_name: String,
        agent_id: String,
    },

    #[error("page {page_name} cannot be resolved without a flow_name")]
    PageWithoutFlow { page_name: String },
}

/// Matches of a conditional search plus every name that failed to resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub matches: Vec<ConditionalMatch>,
    pub faults: Vec<ResolutionFault>,
}

impl SearchOutcome {
    /// `true` when every requested name resolved. An empty `matches`
    /// with `is_resolved()` really means "no route matched".
    pub fn is_resolved(&self) -> bool {
        self.faults.is_empty()
    }

    fn record_fault(&mut self, fault: ResolutionFault) {
        tracing::error!(fault = %fault, "conditional search: name resolution failed");
        self.faults.push(fault);
    }

    fn extend_tagged(&mut self, kind: ResourceKind, name: &str, routes: Vec<RouteMatch>) {
        self.matches
            .extend(routes.into_iter().map(|route| ConditionalMatch {
                resource_type: kind,
                resource_name: name.to_owned(),
                route,
            }));
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Scans
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Case-insensitive substring test of `search` against `condition`.
pub fn condition_matches(condition: &str, search: &str) -> bool {
    condition.to_lowercase().contains(&search.to_lowercase())
}

fn match_routes(resource_id: &str, routes: &[TransitionRoute], search: &str) -> Vec<RouteMatch> {
    routes
        .iter()
        .enumerate()
        .filter(|(_, r)| condition_matches(&r.condition, search))
        .map(|(i, r)| RouteMatch {
            resource_id: resource_id.to_owned(),
            condition: r.condition.clone(),
            route_id: i + 1,
        })
        .collect()
}

impl AgentInspector {
    /// Routes of one flow whose condition contains `search`.
    pub async fn search_conditionals_flow(
        &self,
        flow_id: &str,
        search: &str,
    ) -> Result<Vec<RouteMatch>> {
        let flow = self.api.get_flow(flow_id).await?;
        Ok(match_routes(flow_id, &flow.transition_routes, search))
    }

    /// Routes of one page whose condition contains `search`.
    pub async fn search_conditionals_page(
        &self,
        page_id: &str,
        search: &str,
    ) -> Result<Vec<RouteMatch>> {
        let page = self.api.get_page(page_id).await?;
        Ok(match_routes(page_id, &page.transition_routes, search))
    }

    /// Search route conditions across the scope named by `query`.
    ///
    /// Returns `Ok(None)` when the query has no scope. Flow and page rows
    /// are kept separately even when a page of a searched flow is also
    /// searched.
    pub async fn search_conditionals(
        &self,
        agent_id: &str,
        query: &ConditionalSearch,
    ) -> Result<Option<SearchOutcome>> {
        let Some(scope) = query.scope() else {
            tracing::warn!(
                agent_id = %agent_id,
                "conditional search names no flow or page and search_all is off; nothing to search"
            );
            return Ok(None);
        };

        let search = query.search.as_str();
        let mut outcome = SearchOutcome::default();
        let mut pacer = Pacer::new(self.page_scan_delay);

        match scope {
            SearchScope::Page {
                flow_name: None,
                page_name,
            } => outcome.record_fault(ResolutionFault::PageWithoutFlow {
                page_name: page_name.to_owned(),
            }),
            SearchScope::Page {
                flow_name: Some(flow_name),
                page_name,
            } => {
                let flows = self.api.get_flows_map(agent_id, true).await?;
                match flows.get(flow_name) {
                    None => outcome.record_fault(ResolutionFault::UnknownFlow {
                        flow_name: flow_name.to_owned(),
                        agent_id: agent_id.to_owned(),
                    }),
                    Some(flow_id) => {
                        let pages = self.api.get_pages_map(flow_id, true).await?;
                        match pages.get(page_name) {
                            None => outcome.record_fault(ResolutionFault::UnknownPage {
                                page_name: page_name.to_owned(),
                                flow_name: flow_name.to_owned(),
                                agent_id: agent_id.to_owned(),
                            }),
                            Some(page_id) => {
                                let rows = self.search_conditionals_page(page_id, search).await?;
                                outcome.extend_tagged(ResourceKind::Page, page_name, rows);
                            }
                        }
                    }
                }
            }
            SearchScope::Flow {
                flow_name,
                include_pages,
            } => {
                let flows = self.api.get_flows_map(agent_id, true).await?;
                match flows.get(flow_name) {
                    None => outcome.record_fault(ResolutionFault::UnknownFlow {
                        flow_name: flow_name.to_owned(),
                        agent_id: agent_id.to_owned(),
                    }),
                    Some(flow_id) => {
                        let rows = self.search_conditionals_flow(flow_id, search).await?;
                        outcome.extend_tagged(ResourceKind::Flow, flow_name, rows);
                        if include_pages {
                            self.sweep_pages(flow_id, search, &mut pacer, &mut outcome)
                                .await?;
                        }
                    }
                }
            }
            SearchScope::Agent => {
                for flow in self.api.list_flows(agent_id).await? {
                    let rows = self.search_conditionals_flow(&flow.name, search).await?;
                    outcome.extend_tagged(ResourceKind::Flow, &flow.display_name, rows);
                    self.sweep_pages(&flow.name, search, &mut pacer, &mut outcome)
                        .await?;
                }
            }
        }

        TraceEvent::ConditionalSearchCompleted {
            agent_id: agent_id.to_owned(),
            scope: scope.label().into(),
            matches: outcome.matches.len(),
            unresolved: outcome.faults.len(),
        }
        .emit();

        Ok(Some(outcome))
    }

    /// Scan every page of a flow, pausing between consecutive pages.
    async fn sweep_pages(
        &self,
        flow_id: &str,
        search: &str,
        pacer: &mut Pacer,
        outcome: &mut SearchOutcome,
    ) -> Result<()> {
        for page in self.api.list_pages(flow_id).await? {
            pacer.wait().await;
            let rows = self.search_conditionals_page(&page.name, search).await?;
            outcome.extend_tagged(ResourceKind::Page, &page.display_name, rows);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(condition_matches("this is FOOBAR", "Foo"));
        assert!(condition_matches("$page.params.status = \"FINAL\"", "STATUS"));
        assert!(!condition_matches("false", "status"));
    }

    #[test]
    fn route_ids_count_all_routes() {
        let routes: Vec<TransitionRoute> = ["a = 1", "b = 2", "A = 3"]
            .iter()
            .map(|c| TransitionRoute {
                condition: (*c).to_owned(),
                ..TransitionRoute::default()
            })
            .collect();

        let hits = match_routes("flows/f", &routes, "a =");
        let ids: Vec<usize> = hits.iter().map(|m| m.route_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(hits[1].condition, "A = 3");
    }

    #[test]
    fn scope_precedence() {
        let page = ConditionalSearch::new("x").in_flow("F").in_page("P").search_all(true);
        assert_eq!(
            page.scope(),
            Some(SearchScope::Page {
                flow_name: Some("F"),
                page_name: "P"
            })
        );

        let flow = ConditionalSearch::new("x").in_flow("F");
        assert_eq!(
            flow.scope(),
            Some(SearchScope::Flow {
                flow_name: "F",
                include_pages: false
            })
        );

        let agent = ConditionalSearch::new("x").search_all(true);
        assert_eq!(agent.scope(), Some(SearchScope::Agent));

        assert_eq!(ConditionalSearch::new("x").scope(), None);
    }

    #[test]
    fn fault_messages() {
        let fault = ResolutionFault::UnknownFlow {
            flow_name: "Billing".into(),
            agent_id: "agents/a".into(),
        };
        assert_eq!(
            fault.to_string(),
            "Billing is not a valid flow_name for agent agents/a"
        );
    }
}
