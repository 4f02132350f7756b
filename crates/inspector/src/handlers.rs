//! Event-handler extraction at flow, page and parameter level.
//!
//! One row per handler occurrence, in the order the handlers appear on
//! their parent. Parents without handlers contribute no rows.

use cx_domain::error::Result;
use cx_domain::trace::TraceEvent;

use crate::inspector::AgentInspector;
use crate::rows::{EventHandlerScan, FlowHandlerRow, PageHandlerRow, ParameterHandlerRow};

impl AgentInspector {
    /// Event handlers at all three levels of an agent.
    pub async fn find_event_handlers(&self, agent_id: &str) -> Result<EventHandlerScan> {
        let scan = EventHandlerScan {
            flow: self.flow_level_handlers(agent_id).await?,
            page: self.page_level_handlers(agent_id).await?,
            parameter: self.parameter_level_handlers(agent_id).await?,
        };

        TraceEvent::ScanCompleted {
            scan: "event_handlers".into(),
            agent_id: agent_id.to_owned(),
            rows: scan.total(),
        }
        .emit();

        Ok(scan)
    }

    /// Handlers set directly on each flow.
    pub async fn flow_level_handlers(&self, agent_id: &str) -> Result<Vec<FlowHandlerRow>> {
        let flows = self.api.list_flows(agent_id).await?;

        let rows = flows
            .iter()
            .flat_map(|flow| {
                flow.event_handlers.iter().map(|h| FlowHandlerRow {
                    flow: flow.display_name.clone(),
                    handler: h.into(),
                })
            })
            .collect();
        Ok(rows)
    }

    /// Handlers set on each page of each flow.
    pub async fn page_level_handlers(&self, agent_id: &str) -> Result<Vec<PageHandlerRow>> {
        let mut rows = Vec::new();

        for flow in self.api.list_flows(agent_id).await? {
            for page in self.api.list_pages(&flow.name).await? {
                rows.extend(page.event_handlers.iter().map(|h| PageHandlerRow {
                    flow: flow.display_name.clone(),
                    page: page.display_name.clone(),
                    handler: h.into(),
                }));
            }
        }

        Ok(rows)
    }

    /// Reprompt handlers of every form parameter on every page.
    pub async fn parameter_level_handlers(
        &self,
        agent_id: &str,
    ) -> Result<Vec<ParameterHandlerRow>> {
        let mut rows = Vec::new();

        for flow in self.api.list_flows(agent_id).await? {
            for page in self.api.list_pages(&flow.name).await? {
                for param in &page.form.parameters {
                    rows.extend(param.reprompt_handlers().iter().map(|h| {
                        ParameterHandlerRow {
                            flow: flow.display_name.clone(),
                            page: page.display_name.clone(),
                            parameter: param.display_name.clone(),
                            handler: h.into(),
                        }
                    }));
                }
            }
        }

        Ok(rows)
    }
}
