//! Inspector-backed subcommands. Each prints its result as pretty JSON
//! on stdout.

use std::collections::BTreeMap;

use cx_inspector::{AgentInspector, ConditionalSearch};
use serde::Serialize;

use super::HandlerLevel;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display name → flow id from the inspector's index.
pub fn flows(inspector: &AgentInspector) -> anyhow::Result<()> {
    let index: BTreeMap<&str, &str> = inspector
        .flow_names()
        .into_iter()
        .filter_map(|name| inspector.flow_id(name).map(|id| (name, id)))
        .collect();
    print_json(&index)
}

pub async fn event_handlers(
    inspector: &AgentInspector,
    agent_id: &str,
    level: HandlerLevel,
) -> anyhow::Result<()> {
    match level {
        HandlerLevel::Flow => print_json(&inspector.flow_level_handlers(agent_id).await?),
        HandlerLevel::Page => print_json(&inspector.page_level_handlers(agent_id).await?),
        HandlerLevel::Parameter => {
            print_json(&inspector.parameter_level_handlers(agent_id).await?)
        }
        HandlerLevel::All => print_json(&inspector.find_event_handlers(agent_id).await?),
    }
}

pub async fn list_parameters(inspector: &AgentInspector, agent_id: &str) -> anyhow::Result<()> {
    print_json(&inspector.find_list_parameters(agent_id).await?)
}

/// Returns `false` when a flow or page name did not resolve.
pub async fn search(
    inspector: &AgentInspector,
    agent_id: &str,
    query: &ConditionalSearch,
) -> anyhow::Result<bool> {
    match inspector.search_conditionals(agent_id, query).await? {
        Some(outcome) => {
            print_json(&outcome)?;
            for fault in &outcome.faults {
                eprintln!("warning: {fault}");
            }
            Ok(outcome.is_resolved())
        }
        None => {
            eprintln!("nothing to search: pass --flow, --page or --all");
            Ok(false)
        }
    }
}

pub async fn true_routes(inspector: &AgentInspector, agent_id: &str) -> anyhow::Result<()> {
    print_json(&inspector.find_true_routes(agent_id).await?)
}
