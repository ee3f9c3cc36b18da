use crate::error::AppError;
use std::path::PathBuf;

const APP_DIR: &str = "workload";

/// Location of one of the app's files: `env_var` when set and non-blank,
/// otherwise `<config dir>/workload/<file_name>`.
pub fn app_file(env_var: &str, file_name: &str) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(env_var)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let base = if cfg!(windows) {
        std::env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| AppError::invalid_data("APPDATA is not set"))?
    } else {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .map_err(|_| AppError::invalid_data("HOME is not set"))?
    };

    Ok(base.join(APP_DIR).join(file_name))
}
