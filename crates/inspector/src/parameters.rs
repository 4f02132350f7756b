use cx_domain::error::Result;
use cx_domain::trace::TraceEvent;

use crate::inspector::AgentInspector;

impl AgentInspector {
    /// Display names of every form parameter marked as a list.
    ///
    /// Walks flows, then pages, then parameters in service order. A name
    /// reused as a list on several pages appears once per page.
    pub async fn find_list_parameters(&self, agent_id: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for flow in self.api.list_flows(agent_id).await? {
            for page in self.api.list_pages(&flow.name).await? {
                names.extend(
                    page.form
                        .parameters
                        .iter()
                        .filter(|p| p.is_list)
                        .map(|p| p.display_name.clone()),
                );
            }
        }

        TraceEvent::ScanCompleted {
            scan: "list_parameters".into(),
            agent_id: agent_id.to_owned(),
            rows: names.len(),
        }
        .emit();

        Ok(names)
    }
}
