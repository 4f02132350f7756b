//! Escape-route audit: does every page offer a way out?
//!
//! Pages without parameters should carry a plain `true` route; pages that
//! collect parameters should carry the form-complete route below. Both
//! checks are exact string comparisons, matching how the console writes
//! these conditions.

use cx_agents::Page;
use cx_domain::error::Result;
use cx_domain::trace::TraceEvent;

use crate::inspector::AgentInspector;
use crate::rows::TrueRouteAudit;

pub const TRUE_CONDITION: &str = "true";
pub const TRUE_AND_FINAL_CONDITION: &str = "$page.params.status = \"FINAL\" AND true";

impl AgentInspector {
    /// One audit row per page, flows and pages in service order.
    pub async fn find_true_routes(&self, agent_id: &str) -> Result<Vec<TrueRouteAudit>> {
        let mut rows = Vec::new();

        for flow in self.api.list_flows(agent_id).await? {
            let pages = self.api.list_pages(&flow.name).await?;
            rows.extend(pages.iter().map(|page| audit_page(&flow.display_name, page)));
        }

        TraceEvent::ScanCompleted {
            scan: "true_routes".into(),
            agent_id: agent_id.to_owned(),
            rows: rows.len(),
        }
        .emit();

        Ok(rows)
    }
}

pub(crate) fn audit_page(flow_display_name: &str, page: &Page) -> TrueRouteAudit {
    let has_condition = |wanted: &str| {
        page.transition_routes
            .iter()
            .any(|r| r.condition == wanted)
    };

    TrueRouteAudit {
        flow_display_name: flow_display_name.to_owned(),
        page_display_name: page.display_name.clone(),
        webhook_entry_fulfillment: page.entry_fulfillment.has_webhook(),
        has_parameters: !page.form.parameters.is_empty(),
        has_true_route: has_condition(TRUE_CONDITION),
        has_true_and_final_route: has_condition(TRUE_AND_FINAL_CONDITION),
    }
}
