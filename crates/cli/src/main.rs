mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ConfigCommand};
use cx_domain::config::{Config, LoggingConfig};
use cx_inspector::{AgentInspector, ConditionalSearch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Config(ConfigCommand::Validate) => {
            let summary = cli::config::validate(&config, &config_path, &mut std::io::stdout().lock())?;
            if !summary.passed() {
                std::process::exit(1);
            }
            return Ok(());
        }
        Command::Config(ConfigCommand::Show) => return cli::config::show(&config),
        _ => {}
    }

    init_cli_tracing(&config.logging);

    let agent_id = cli
        .agent
        .clone()
        .or_else(|| config.inspector.agent_id.clone())
        .context("no agent: pass --agent or set inspector.agent_id in the config")?;
    tracing::debug!(config_path = %config_path, agent_id = %agent_id, "configuration loaded");

    let api = cx_agents::create_client(&config.api, cli.snapshot.as_deref())
        .context("building agents API client")?;

    match cli.command {
        Command::Flows => {
            let inspector = AgentInspector::for_agent(api, &config.inspector, &agent_id).await?;
            cli::report::flows(&inspector)
        }
        Command::EventHandlers { level } => {
            let inspector = build(api, &config);
            cli::report::event_handlers(&inspector, &agent_id, level).await
        }
        Command::ListParameters => {
            let inspector = build(api, &config);
            cli::report::list_parameters(&inspector, &agent_id).await
        }
        Command::Search {
            search,
            flow,
            page,
            all,
        } => {
            let inspector = build(api, &config);
            let query = ConditionalSearch {
                search,
                flow_name: flow,
                page_name: page,
                search_all: all,
            };
            if !cli::report::search(&inspector, &agent_id, &query).await? {
                std::process::exit(2);
            }
            Ok(())
        }
        Command::TrueRoutes => {
            let inspector = build(api, &config);
            cli::report::true_routes(&inspector, &agent_id).await
        }
        Command::Config(_) => unreachable!("config subcommands return early"),
    }
}

fn build(api: std::sync::Arc<dyn cx_agents::AgentsApi>, config: &Config) -> AgentInspector {
    AgentInspector::new(api, &config.inspector)
}

/// Initialize stderr-only tracing so reports on stdout stay clean.
///
/// Defaults to `warn`; `RUST_LOG` overrides the filter.
fn init_cli_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
