//! Data Transfer Objects matching the agents API v3 REST schema.
//!
//! Field names use `camelCase` on the wire and `snake_case` in Rust code
//! via `#[serde(rename_all = "camelCase")]`. Every repeated or nested
//! field is defaulted: the API omits empty collections, and a missing
//! form or fulfillment simply means "nothing configured".

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Targets
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where a transition route or event handler sends the conversation.
///
/// The wire format carries two optional fields (`targetFlow`,
/// `targetPage`); at most one may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    /// No transition; the conversation stays on the current page.
    #[default]
    Stay,
    Flow(String),
    Page(String),
}

impl Target {
    /// Build a target from the two wire fields. Empty strings count as unset.
    pub fn from_wire(target_flow: Option<String>, target_page: Option<String>) -> Result<Self, String> {
        let flow = target_flow.filter(|s| !s.is_empty());
        let page = target_page.filter(|s| !s.is_empty());
        match (flow, page) {
            (None, None) => Ok(Target::Stay),
            (Some(f), None) => Ok(Target::Flow(f)),
            (None, Some(p)) => Ok(Target::Page(p)),
            (Some(f), Some(p)) => Err(format!(
                "target may be a flow or a page, not both (targetFlow={f}, targetPage={p})"
            )),
        }
    }

    pub fn flow_id(&self) -> Option<&str> {
        match self {
            Target::Flow(id) => Some(id),
            _ => None,
        }
    }

    pub fn page_id(&self) -> Option<&str> {
        match self {
            Target::Page(id) => Some(id),
            _ => None,
        }
    }

    /// Split back into the two wire fields.
    fn into_wire(self) -> (Option<String>, Option<String>) {
        match self {
            Target::Stay => (None, None),
            Target::Flow(f) => (Some(f), None),
            Target::Page(p) => (None, Some(p)),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Fulfillment
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Messages and webhook call triggered by a route, handler or page entry.
///
/// Response messages are kept as raw JSON; their shape varies by channel
/// (`text`, `payload`, `conversationSuccess`, ...) and nothing here
/// inspects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Fulfillment {
    pub fn has_webhook(&self) -> bool {
        self.webhook.as_deref().is_some_and(|w| !w.is_empty())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Routes & event handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireTransitionRoute", into = "WireTransitionRoute")]
pub struct TransitionRoute {
    pub name: Option<String>,
    /// Condition expression; empty when the route is intent-only.
    pub condition: String,
    pub intent: Option<String>,
    pub trigger_fulfillment: Fulfillment,
    pub target: Target,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTransitionRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<String>,
    #[serde(default)]
    trigger_fulfillment: Fulfillment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_page: Option<String>,
}

impl TryFrom<WireTransitionRoute> for TransitionRoute {
    type Error = String;

    fn try_from(w: WireTransitionRoute) -> Result<Self, Self::Error> {
        Ok(Self {
            target: Target::from_wire(w.target_flow, w.target_page)?,
            name: w.name,
            condition: w.condition,
            intent: w.intent,
            trigger_fulfillment: w.trigger_fulfillment,
        })
    }
}

impl From<TransitionRoute> for WireTransitionRoute {
    fn from(r: TransitionRoute) -> Self {
        let (target_flow, target_page) = r.target.into_wire();
        Self {
            name: r.name,
            condition: r.condition,
            intent: r.intent,
            trigger_fulfillment: r.trigger_fulfillment,
            target_flow,
            target_page,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEventHandler", into = "WireEventHandler")]
pub struct EventHandler {
    pub name: Option<String>,
    /// Event name, e.g. `sys.no-match-default` or `webhook.error`.
    pub event: String,
    pub trigger_fulfillment: Fulfillment,
    pub target: Target,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEventHandler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    event: String,
    #[serde(default)]
    trigger_fulfillment: Fulfillment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_page: Option<String>,
}

impl TryFrom<WireEventHandler> for EventHandler {
    type Error = String;

    fn try_from(w: WireEventHandler) -> Result<Self, Self::Error> {
        Ok(Self {
            target: Target::from_wire(w.target_flow, w.target_page)?,
            name: w.name,
            event: w.event,
            trigger_fulfillment: w.trigger_fulfillment,
        })
    }
}

impl From<EventHandler> for WireEventHandler {
    fn from(h: EventHandler) -> Self {
        let (target_flow, target_page) = h.target.into_wire();
        Self {
            name: h.name,
            event: h.event,
            trigger_fulfillment: h.trigger_fulfillment,
            target_flow,
            target_page,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Flows
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /v3/{flow} — also the element type of ListFlows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Resource id: `projects/../agents/<agent>/flows/<flow>`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub transition_routes: Vec<TransitionRoute>,
    #[serde(default)]
    pub event_handlers: Vec<EventHandler>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pages, forms & parameters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /v3/{page} — also the element type of ListPages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Resource id: `projects/../flows/<flow>/pages/<page>`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub entry_fulfillment: Fulfillment,
    #[serde(default)]
    pub form: Form,
    #[serde(default)]
    pub transition_routes: Vec<TransitionRoute>,
    #[serde(default)]
    pub event_handlers: Vec<EventHandler>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub fill_behavior: FillBehavior,
}

impl Parameter {
    /// Handlers fired while the parameter is being re-prompted.
    pub fn reprompt_handlers(&self) -> &[EventHandler] {
        &self.fill_behavior.reprompt_event_handlers
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBehavior {
    #[serde(default)]
    pub initial_prompt_fulfillment: Fulfillment,
    #[serde(default)]
    pub reprompt_event_handlers: Vec<EventHandler>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// List responses
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One page of a paginated list call.
pub trait Paginated {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

/// GET /v3/{agent}/flows — response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFlowsResponse {
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paginated for ListFlowsResponse {
    type Item = Flow;

    fn into_parts(self) -> (Vec<Flow>, Option<String>) {
        (self.flows, self.next_page_token)
    }
}

/// GET /v3/{flow}/pages — response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPagesResponse {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Paginated for ListPagesResponse {
    type Item = Page;

    fn into_parts(self) -> (Vec<Page>, Option<String>) {
        (self.pages, self.next_page_token)
    }
}
