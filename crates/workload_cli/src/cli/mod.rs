use clap::{Parser, Subcommand};
use workload_core::config::ConfigOverrides;
use workload_core::workload::WindowKind;

#[derive(Parser, Debug)]
#[command(name = "workload", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference instant in RFC3339 (defaults to the current time)
    #[arg(long, value_name = "RFC3339", global = true)]
    pub now: Option<String>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show workload metrics for one team member
    ///
    /// Example: workload member m-1
    /// Example: workload member m-1 --window month
    Member {
        id: String,
        /// week, month or quarter
        #[arg(long)]
        window: Option<String>,
    },
    /// Show workload for the whole team, busiest first
    ///
    /// Example: workload team --window quarter
    Team {
        /// week, month or quarter
        #[arg(long)]
        window: Option<String>,
    },
    /// List team members
    ///
    /// Example: workload members
    Members,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Window,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    match field.as_str() {
        "theme" => Ok(ParsedConfigOverride {
            target: ConfigOverrideTarget::Theme,
            value,
        }),
        "window" | "default_window" => Ok(ParsedConfigOverride {
            target: ConfigOverrideTarget::Window,
            value,
        }),
        other => Err(format!("unknown config field '{other}'")),
    }
}

/// Fold every `--config-override` into one set; later values win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Window => {
                let window = parsed
                    .value
                    .parse::<WindowKind>()
                    .map_err(|err| err.message().to_string())?;
                overrides.default_window = Some(window);
            }
        }
    }
    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigOverrideTarget, collect_overrides, parse_config_override};
    use workload_core::workload::WindowKind;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" THEME = Midnight ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::Theme);
        assert_eq!(parsed.value, "Midnight");

        let window = parse_config_override("Default-Window=month").unwrap();
        assert_eq!(window.target, ConfigOverrideTarget::Window);
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("unknown.field=value").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("windowweek").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_empty_key() {
        let err = parse_config_override(" = week").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn collect_overrides_keeps_last_value() {
        let raw = vec![
            "window=week".to_string(),
            "theme=noir".to_string(),
            "window=quarter".to_string(),
        ];

        let overrides = collect_overrides(&raw).unwrap();

        assert_eq!(overrides.theme.as_deref(), Some("noir"));
        assert_eq!(overrides.default_window, Some(WindowKind::Quarter));
    }

    #[test]
    fn collect_overrides_rejects_bad_window() {
        let err = collect_overrides(&["window=fortnight".to_string()]).unwrap_err();
        assert!(err.contains("unknown window"));
    }
}
