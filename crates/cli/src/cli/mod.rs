pub mod config;
pub mod report;

use clap::{Parser, Subcommand, ValueEnum};

/// cx-inspect — structural reports over a conversational agent.
#[derive(Debug, Parser)]
#[command(name = "cx-inspect", version, about)]
pub struct Cli {
    /// Agent resource id (defaults to `inspector.agent_id` from the config).
    #[arg(long, global = true)]
    pub agent: Option<String>,
    /// Read the agent from an exported snapshot instead of the REST API.
    #[arg(long, global = true)]
    pub snapshot: Option<std::path::PathBuf>,
    /// Config file (overrides `CX_INSPECT_CONFIG`).
    #[arg(long, global = true)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the agent's flows by display name with their resource ids.
    Flows,
    /// Dump event handlers set on flows, pages and parameters.
    EventHandlers {
        #[arg(long, value_enum, default_value_t = HandlerLevel::All)]
        level: HandlerLevel,
    },
    /// List form parameters configured as lists.
    ListParameters,
    /// Search transition-route conditions (case-insensitive substring).
    Search {
        /// Text to look for in route conditions.
        search: String,
        /// Flow display name.
        #[arg(long)]
        flow: Option<String>,
        /// Page display name (requires --flow).
        #[arg(long)]
        page: Option<String>,
        /// Also scan pages of the flow, or the whole agent without --flow.
        #[arg(long)]
        all: bool,
    },
    /// Audit every page for `true` and form-complete escape routes.
    TrueRoutes,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HandlerLevel {
    Flow,
    Page,
    Parameter,
    All,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from `explicit`, else from the path in
/// `CX_INSPECT_CONFIG`, else from `cx-inspect.toml`. A missing file means
/// defaults. Returns the parsed [`Config`] and the path that was used.
///
/// [`Config`]: cx_domain::config::Config
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<(cx_domain::config::Config, String)> {
    let config_path = match explicit {
        Some(p) => p.to_owned(),
        None => std::env::var("CX_INSPECT_CONFIG").unwrap_or_else(|_| "cx-inspect.toml".into()),
    };

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        cx_domain::config::Config::default()
    };

    Ok((config, config_path))
}
