use clap::Parser;
use clap::error::ErrorKind;
use time::OffsetDateTime;
use workload_cli::cli::{Cli, Command, collect_overrides};
use workload_cli::render;
use workload_core::config::{self, Config};
use workload_core::error::AppError;
use workload_core::workload::WindowKind;
use workload_core::workload_api;

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        log::warn!("using default config: {err}");
    }
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::invalid_input)?;
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn resolve_window(config: &Config, raw: Option<&str>) -> Result<WindowKind, AppError> {
    let explicit = raw.map(str::parse::<WindowKind>).transpose()?;
    Ok(config.window_or(explicit))
}

fn resolve_now(raw: Option<&str>) -> Result<OffsetDateTime, AppError> {
    match raw {
        Some(value) => workload_api::parse_instant(value),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli)?;
    let palette = config.palette();
    let now = resolve_now(cli.now.as_deref())?;

    match &cli.command {
        Command::Member { id, window } => {
            let window = resolve_window(&config, window.as_deref())?;
            let report = workload_api::member_report(id, window, now)?;
            if cli.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", render::member_report(&report, &palette));
            }
        }
        Command::Team { window } => {
            let window = resolve_window(&config, window.as_deref())?;
            let report = workload_api::team_report(window, now)?;
            if cli.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", render::team_report(&report, &palette));
            }
        }
        Command::Members => {
            let members = workload_api::list_members()?;
            if cli.json {
                println!("{}", serde_json::to_string(&members)?);
            } else {
                println!("{}", render::members(&members, &palette));
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
