use crate::error::AppError;
use crate::model::{Member, Task};
use crate::paths;
use crate::storage::{Snapshot, SnapshotSource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "snapshot.json";
const STORE_ENV_VAR: &str = "WORKLOAD_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    schema_version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    members: Vec<Member>,
}

/// Snapshot file on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(store_path()?))
    }
}

impl SnapshotSource for JsonStore {
    fn load(&self) -> Result<Snapshot, AppError> {
        load_snapshot(&self.path)
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    paths::app_file(STORE_ENV_VAR, STORE_FILE_NAME)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    if !path.exists() {
        log::debug!("no snapshot at {}, using an empty one", path.display());
        return Ok(Snapshot::default());
    }

    let content = std::fs::read_to_string(path)?;
    let stored: StoredSnapshot = serde_json::from_str(&content)?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    validate_tasks(&stored.tasks)?;
    validate_members(&stored.members)?;

    log::debug!(
        "loaded {} tasks and {} members from {}",
        stored.tasks.len(),
        stored.members.len(),
        path.display()
    );

    Ok(Snapshot {
        tasks: stored.tasks,
        members: stored.members,
    })
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredSnapshot {
        schema_version: SCHEMA_VERSION,
        tasks: snapshot.tasks.clone(),
        members: snapshot.members.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    Ok(())
}

fn validate_tasks(tasks: &[Task]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(AppError::invalid_data("task id is required"));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(AppError::invalid_data(format!("duplicate task id {}", task.id)));
        }
        if task.progress > 100 {
            return Err(AppError::invalid_data(format!(
                "task {}: progress must be between 0 and 100",
                task.id
            )));
        }
        for (field, hours) in [
            ("estimated_hours", task.estimated_hours),
            ("actual_hours", task.actual_hours),
        ] {
            if let Some(value) = hours
                && (!value.is_finite() || value < 0.0)
            {
                return Err(AppError::invalid_data(format!(
                    "task {}: {field} must be a non-negative number",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_members(members: &[Member]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for member in members {
        if member.id.trim().is_empty() {
            return Err(AppError::invalid_data("member id is required"));
        }
        if !seen.insert(member.id.as_str()) {
            return Err(AppError::invalid_data(format!(
                "duplicate member id {}",
                member.id
            )));
        }
        if member.level == 0 {
            return Err(AppError::invalid_data(format!(
                "member {}: level must be positive",
                member.id
            )));
        }
    }
    Ok(())
}
