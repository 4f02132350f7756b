//! Shared fixture: a small two-flow agent served from a snapshot.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use cx_agents::{AgentsApi, Flow, Page, SnapshotAgentsClient};
use cx_domain::config::InspectorConfig;
use cx_domain::error::{Error, Result};
use cx_inspector::AgentInspector;
use serde_json::json;

pub const AGENT: &str = "projects/acme/locations/global/agents/a1";
pub const START_FLOW: &str = "projects/acme/locations/global/agents/a1/flows/start";
pub const F1_FLOW: &str = "projects/acme/locations/global/agents/a1/flows/f1";
pub const END_PAGE: &str = "projects/acme/locations/global/agents/a1/flows/start/pages/end";

/// Flows and pages:
///
/// * `Default Start Flow` — 2 handlers, 2 routes
///   * `Confirm` — `true` route only
///   * `Collect Order` — webhook on entry, `toppings` (list, 2 reprompt
///     handlers) and `size`, FINAL route, 1 handler
/// * `F1` — 2 routes, no handlers
///   * `Extras` — `toppings` (list), `"true "` route, 1 handler
pub fn snapshot() -> SnapshotAgentsClient {
    let raw = json!({
        "flows": [
            {
                "name": START_FLOW,
                "displayName": "Default Start Flow",
                "transitionRoutes": [
                    { "condition": "$session.params.status = \"done\"", "targetPage": END_PAGE },
                    { "condition": "false" }
                ],
                "eventHandlers": [
                    {
                        "event": "sys.no-match-default",
                        "triggerFulfillment": { "messages": [{ "text": { "text": ["Sorry?"] } }] }
                    },
                    { "event": "sys.no-input-default", "targetPage": END_PAGE }
                ],
                "pages": [
                    {
                        "name": "projects/acme/locations/global/agents/a1/flows/start/pages/confirm",
                        "displayName": "Confirm",
                        "transitionRoutes": [{ "condition": "true" }]
                    },
                    {
                        "name": "projects/acme/locations/global/agents/a1/flows/start/pages/order",
                        "displayName": "Collect Order",
                        "entryFulfillment": { "webhook": "projects/acme/locations/global/agents/a1/webhooks/w1" },
                        "form": {
                            "parameters": [
                                {
                                    "displayName": "toppings",
                                    "isList": true,
                                    "required": true,
                                    "fillBehavior": {
                                        "repromptEventHandlers": [
                                            { "event": "sys.no-match-1" },
                                            { "event": "sys.no-input-1", "targetFlow": F1_FLOW }
                                        ]
                                    }
                                },
                                { "displayName": "size", "required": true }
                            ]
                        },
                        "transitionRoutes": [
                            { "condition": "$page.params.status = \"FINAL\" AND true", "targetPage": END_PAGE },
                            { "condition": "$session.params.STATUS = 1" }
                        ],
                        "eventHandlers": [{ "event": "sys.no-match-1" }]
                    }
                ]
            },
            {
                "name": F1_FLOW,
                "displayName": "F1",
                "transitionRoutes": [
                    { "condition": "$page.params.status = \"FINAL\"" },
                    { "condition": "false" }
                ],
                "pages": [
                    {
                        "name": "projects/acme/locations/global/agents/a1/flows/f1/pages/extras",
                        "displayName": "Extras",
                        "form": { "parameters": [{ "displayName": "toppings", "isList": true }] },
                        "transitionRoutes": [{ "condition": "true " }],
                        "eventHandlers": [{ "event": "webhook.error", "targetFlow": START_FLOW }]
                    }
                ]
            }
        ]
    });
    SnapshotAgentsClient::from_json(&raw.to_string()).unwrap()
}

pub fn inspector() -> AgentInspector {
    AgentInspector::new(Arc::new(snapshot()), &InspectorConfig::default())
        .with_page_scan_delay(std::time::Duration::ZERO)
}

/// Delegates to the fixture but fails every `get_page` call.
pub struct FailingPages(pub SnapshotAgentsClient);

#[async_trait]
impl AgentsApi for FailingPages {
    async fn list_flows(&self, agent_id: &str) -> Result<Vec<Flow>> {
        self.0.list_flows(agent_id).await
    }

    async fn get_flow(&self, flow_id: &str) -> Result<Flow> {
        self.0.get_flow(flow_id).await
    }

    async fn list_pages(&self, flow_id: &str) -> Result<Vec<Page>> {
        self.0.list_pages(flow_id).await
    }

    async fn get_page(&self, page_id: &str) -> Result<Page> {
        Err(Error::Http(format!("connection reset fetching {page_id}")))
    }
}
