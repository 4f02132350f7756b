use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Agents API connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed endpoint. When `None` the regional endpoint is derived from
    /// the location segment of each resource id.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bearer token used verbatim. Takes precedence over `access_token_env`.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Environment variable holding the bearer token.
    #[serde(default = "d_token_env")]
    pub access_token_env: String,
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
    /// `pageSize` sent with every list call.
    #[serde(default = "d_1000")]
    pub page_size: u32,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            access_token: None,
            access_token_env: d_token_env(),
            timeout_ms: 30_000,
            page_size: 1000,
            language_code: None,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_token_env() -> String {
    "CX_ACCESS_TOKEN".into()
}
fn d_30000() -> u64 {
    30_000
}
fn d_1000() -> u32 {
    1000
}
