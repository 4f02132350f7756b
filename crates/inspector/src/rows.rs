//! Row types produced by the scans.
//!
//! Each struct is one row of a result table; field names are the
//! column names when serialized.

use cx_agents::{EventHandler, Target};
use serde::Serialize;

/// The columns every event-handler row shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerColumns {
    pub event: String,
    pub messages: Vec<serde_json::Value>,
    pub transition: Target,
}

impl HandlerColumns {
    pub fn transition_flow(&self) -> Option<&str> {
        self.transition.flow_id()
    }

    pub fn transition_page(&self) -> Option<&str> {
        self.transition.page_id()
    }
}

impl From<&EventHandler> for HandlerColumns {
    fn from(h: &EventHandler) -> Self {
        Self {
            event: h.event.clone(),
            messages: h.trigger_fulfillment.messages.clone(),
            transition: h.target.clone(),
        }
    }
}

/// One event handler set on a flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowHandlerRow {
    pub flow: String,
    #[serde(flatten)]
    pub handler: HandlerColumns,
}

/// One event handler set on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHandlerRow {
    pub flow: String,
    pub page: String,
    #[serde(flatten)]
    pub handler: HandlerColumns,
}

/// One reprompt handler of a form parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterHandlerRow {
    pub flow: String,
    pub page: String,
    pub parameter: String,
    #[serde(flatten)]
    pub handler: HandlerColumns,
}

/// Event handlers of an agent at all three levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventHandlerScan {
    pub flow: Vec<FlowHandlerRow>,
    pub page: Vec<PageHandlerRow>,
    pub parameter: Vec<ParameterHandlerRow>,
}

impl EventHandlerScan {
    pub fn total(&self) -> usize {
        self.flow.len() + self.page.len() + self.parameter.len()
    }
}

/// Kind of resource a conditional match was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Flow,
    Page,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Flow => "flow",
            ResourceKind::Page => "page",
        }
    }
}

/// A transition route whose condition matched a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub resource_id: String,
    pub condition: String,
    /// 1-based position of the route among all routes of its resource.
    pub route_id: usize,
}

/// A [`RouteMatch`] tagged with the resource it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalMatch {
    pub resource_type: ResourceKind,
    pub resource_name: String,
    #[serde(flatten)]
    pub route: RouteMatch,
}

/// Escape-route audit of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrueRouteAudit {
    pub flow_display_name: String,
    pub page_display_name: String,
    pub webhook_entry_fulfillment: bool,
    pub has_parameters: bool,
    pub has_true_route: bool,
    pub has_true_and_final_route: bool,
}
