use crate::error::AppError;
use crate::paths;
use crate::workload::{WindowKind, WorkloadStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "WORKLOAD_CONFIG_PATH";

/// ANSI escapes used to colour status labels. Empty strings mean plain output.
#[derive(Debug, Clone)]
pub struct Palette {
    pub optimal: &'static str,
    pub busy: &'static str,
    pub overloaded: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn status(&self, status: WorkloadStatus) -> String {
        let colour = match status {
            WorkloadStatus::Optimal => self.optimal,
            WorkloadStatus::Busy => self.busy,
            WorkloadStatus::Overloaded => self.overloaded,
        };
        self.paint(colour, status.label())
    }

    pub fn mutedize(&self, text: &str) -> String {
        self.paint(self.muted, text)
    }

    fn paint(&self, colour: &str, text: &str) -> String {
        if colour.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", colour, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name) {
        Some("noir") => Palette {
            optimal: "\x1b[38;5;114m",
            busy: "\x1b[38;5;214m",
            overloaded: "\x1b[38;5;203m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        Some("solarized") => Palette {
            optimal: "\x1b[38;5;64m",
            busy: "\x1b[38;5;136m",
            overloaded: "\x1b[38;5;160m",
            muted: "\x1b[38;5;245m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            optimal: "",
            busy: "",
            overloaded: "",
            muted: "",
            reset: "",
        },
    }
}

/// Maps a user-supplied theme name onto one the palette knows. Case and
/// punctuation are ignored, so `"Solarized"` and `" noir "` both resolve.
pub fn canonical_theme_name(raw: &str) -> Option<&'static str> {
    let key: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect();

    match key.as_str() {
        "" | "default" => Some("default"),
        "noir" | "dark" => Some("noir"),
        "solarized" => Some("solarized"),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub default_window: Option<WindowKind>,
}

impl Config {
    /// Window to score against: an explicit choice wins, then the config, then a week.
    pub fn window_or(&self, explicit: Option<WindowKind>) -> WindowKind {
        explicit.or(self.default_window).unwrap_or_default()
    }

    pub fn palette(&self) -> Palette {
        palette_for_theme(self.theme.as_deref())
    }
}

/// Config as read from disk. A broken file still yields usable defaults; the
/// reason is kept in `error` so the caller can report it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

impl ConfigLoad {
    fn defaults(error: Option<AppError>) -> Self {
        Self {
            config: Config::default(),
            error,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::defaults(None);
        }
        match read_config(path) {
            Ok(config) => Self {
                config,
                error: None,
            },
            Err(err) => Self::defaults(Some(err)),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub default_window: Option<WindowKind>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    paths::app_file(CONFIG_ENV_VAR, CONFIG_FILE_NAME)
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => ConfigLoad::from_path(&path),
        Err(err) => ConfigLoad::defaults(Some(err)),
    }
}

fn read_config(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {err}", path.display())))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {err}", path.display()))
    })?;
    if let Some(theme) = config.theme.take() {
        match canonical_theme_name(&theme) {
            Some(name) => config.theme = Some(name.to_string()),
            None => log::warn!("unknown theme '{theme}' in {}, using plain output", path.display()),
        }
    }
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        match canonical_theme_name(theme) {
            Some(name) => merged.theme = Some(name.to_string()),
            None => log::warn!("ignoring unknown theme override '{theme}'"),
        }
    }

    if overrides.default_window.is_some() {
        merged.default_window = overrides.default_window;
    }

    merged
}
