use std::io::{self, Write};

use cx_domain::config::{Config, ConfigSeverity};

/// Counts from one `config validate` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationSummary {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Check the config and write one line per issue to `out`.
///
/// Besides `Config::validate`, reports whether a bearer token can be
/// resolved; without one only `--snapshot` runs work, so that is a warning.
pub fn validate(config: &Config, config_path: &str, out: &mut impl Write) -> io::Result<ValidationSummary> {
    let mut issues = config.validate();
    issues.sort_by_key(|i| i.severity != ConfigSeverity::Error);

    let mut summary = ValidationSummary::default();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Error => summary.errors += 1,
            ConfigSeverity::Warning => summary.warnings += 1,
        }
        writeln!(out, "{issue}")?;
    }

    if !has_access_token(config) {
        summary.warnings += 1;
        writeln!(
            out,
            "[WARN] api.access_token: unset and ${} is empty; only --snapshot runs will work",
            config.api.access_token_env
        )?;
    }

    match summary {
        ValidationSummary { errors: 0, warnings: 0 } => writeln!(out, "{config_path}: ok")?,
        ValidationSummary { errors, warnings } => {
            writeln!(out, "{config_path}: {errors} error(s), {warnings} warning(s)")?
        }
    }
    Ok(summary)
}

fn has_access_token(config: &Config) -> bool {
    config.api.access_token.as_deref().is_some_and(|t| !t.is_empty())
        || std::env::var(&config.api.access_token_env).is_ok_and(|t| !t.is_empty())
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let output = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("failed to serialize config: {e}"))?;
    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> Config {
        let mut config = Config::default();
        config.api.access_token = Some("tok".into());
        config
    }

    fn run(config: &Config) -> (ValidationSummary, String) {
        let mut out = Vec::new();
        let summary = validate(config, "cx-inspect.toml", &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn clean_config_is_ok() {
        let (summary, out) = run(&with_token());
        assert!(summary.passed());
        assert_eq!(summary, ValidationSummary::default());
        assert_eq!(out, "cx-inspect.toml: ok\n");
    }

    #[test]
    fn errors_are_listed_before_warnings() {
        let mut config = with_token();
        config.inspector.page_scan_delay_ms = 0;
        config.api.page_size = 0;

        let (summary, out) = run(&config);
        assert!(!summary.passed());
        assert_eq!(summary, ValidationSummary { errors: 1, warnings: 1 });

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("[ERROR]"), "{out}");
        assert!(lines[1].starts_with("[WARN]"), "{out}");
        assert_eq!(lines[2], "cx-inspect.toml: 1 error(s), 1 warning(s)");
    }

    #[test]
    fn missing_token_is_a_warning() {
        let mut config = Config::default();
        config.api.access_token_env = "CX_INSPECT_TEST_NO_SUCH_TOKEN".into();

        let (summary, out) = run(&config);
        assert!(summary.passed());
        assert_eq!(summary.warnings, 1);
        assert!(out.contains("$CX_INSPECT_TEST_NO_SUCH_TOKEN"), "{out}");
    }
}
