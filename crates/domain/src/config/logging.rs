use serde::{Deserialize, Serialize};

/// Log output settings for the CLI.
///
/// The filter itself comes from `RUST_LOG`; this only picks the format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of the compact human format.
    #[serde(default)]
    pub json: bool,
}
