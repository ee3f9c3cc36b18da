use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "time::serde::rfc3339")]
    pub due_at: OffsetDateTime,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub reward_points: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn is_assigned_to(&self, member_id: &str) -> bool {
        self.assignees.iter().any(|id| id == member_id)
    }

    /// Estimated hours, treating a missing estimate as zero.
    pub fn estimate(&self) -> f64 {
        self.estimated_hours.unwrap_or(0.0)
    }

    /// Hours booked against a completed task: actuals when recorded, else the estimate.
    pub fn booked_hours(&self) -> f64 {
        self.actual_hours.unwrap_or_else(|| self.estimate())
    }

    pub fn has_tag(&self, needle: &str) -> bool {
        self.tags.iter().any(|tag| tag.to_lowercase() == needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}
