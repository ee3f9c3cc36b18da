//! Workload scoring for a single team member.
//!
//! Everything here is a pure function of its arguments: callers pass the task
//! snapshot and the reference instant, nothing reads the clock or the store.

use crate::error::AppError;
use crate::model::{Member, Task};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Nominal capacity the score is measured against: four 40-hour weeks.
pub const CAPACITY_HOURS: f64 = 40.0 * 4.0;
/// Horizon for the upcoming-deadline count.
pub const UPCOMING_DAYS: i64 = 7;

pub const OVERLOADED_THRESHOLD: f64 = 80.0;
pub const BUSY_THRESHOLD: f64 = 60.0;
pub const UPCOMING_DEADLINE_ALERT: usize = 3;
pub const EFFICIENCY_ALERT: f64 = 70.0;
pub const SKILL_USAGE_ALERT: f64 = 30.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    #[default]
    Week,
    Month,
    Quarter,
}

impl WindowKind {
    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            other => Err(AppError::invalid_input(format!(
                "unknown window '{other}', expected week, month or quarter"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillUsage {
    pub skill: String,
    pub usage: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub upcoming_deadlines: usize,
    pub average_progress: f64,
    pub total_estimated_hours: f64,
    pub completed_hours: f64,
    pub workload_score: f64,
    pub efficiency: f64,
    pub productivity: f64,
    pub skills_usage: Vec<SkillUsage>,
    pub xp_earned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadStatus {
    Optimal,
    Busy,
    Overloaded,
}

impl WorkloadStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Busy => "busy",
            Self::Overloaded => "overloaded",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Optimal => "balanced load",
            Self::Busy => "high but manageable load",
            Self::Overloaded => "excessive load, burnout risk",
        }
    }
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory produced by [`recommend`]. `Display` renders the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Redistribute,
    ReviewOverdue { count: usize },
    PlanDeadlines,
    ResolveBlockers,
    UseSkills,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redistribute => f.write_str("redistribute tasks to reduce load"),
            Self::ReviewOverdue { count } => {
                write!(f, "revisit priorities for the {count} overdue tasks")
            }
            Self::PlanDeadlines => {
                f.write_str("schedule a planning session for upcoming deadlines")
            }
            Self::ResolveBlockers => f.write_str("identify blockers affecting efficiency"),
            Self::UseSkills => f.write_str("opportunity to better use underused skills"),
        }
    }
}

/// Tasks due on or after `now - window.days()`. There is no upper bound, so
/// anything due in the future is kept as well. A start that would fall before
/// the earliest representable date drops the lower bound too.
pub fn select_tasks_in_window(
    tasks: &[Task],
    window: WindowKind,
    now: OffsetDateTime,
) -> Vec<Task> {
    // None when `now` sits too close to the earliest representable date.
    let start = now.checked_sub(Duration::days(window.days()));
    tasks
        .iter()
        .filter(|task| start.is_none_or(|start| task.due_at >= start))
        .cloned()
        .collect()
}

pub fn compute_metrics(
    member: &Member,
    tasks_in_window: &[Task],
    now: OffsetDateTime,
) -> WorkloadMetrics {
    let assigned: Vec<&Task> = tasks_in_window
        .iter()
        .filter(|task| task.is_assigned_to(&member.id))
        .collect();
    let completed: Vec<&Task> = assigned.iter().copied().filter(|task| task.is_done()).collect();

    let horizon = now.checked_add(Duration::days(UPCOMING_DAYS));
    let overdue_tasks = assigned
        .iter()
        .filter(|task| task.due_at < now && !task.is_done())
        .count();
    let upcoming_deadlines = assigned
        .iter()
        .filter(|task| {
            task.due_at > now
                && horizon.is_none_or(|horizon| task.due_at <= horizon)
                && !task.is_done()
        })
        .count();

    let total_tasks = assigned.len();
    let total_estimated_hours: f64 = assigned.iter().map(|task| task.estimate()).sum();
    let completed_hours: f64 = completed.iter().map(|task| task.booked_hours()).sum();

    let workload_score = (total_estimated_hours / CAPACITY_HOURS * 100.0).clamp(0.0, 100.0);

    let productivity = if completed_hours > 0.0 {
        ratio(completed.len() as f64, total_tasks as f64)
    } else {
        0.0
    };

    let skills_usage = member
        .skills
        .iter()
        .map(|skill| {
            let needle = skill.to_lowercase();
            let matching = assigned.iter().filter(|task| task.has_tag(&needle)).count();
            SkillUsage {
                skill: skill.clone(),
                usage: ratio(matching as f64, total_tasks as f64),
            }
        })
        .collect();

    let metrics = WorkloadMetrics {
        total_tasks,
        completed_tasks: completed.len(),
        overdue_tasks,
        upcoming_deadlines,
        average_progress: mean_progress(&assigned),
        total_estimated_hours,
        completed_hours,
        workload_score,
        efficiency: mean_progress(&completed),
        productivity,
        skills_usage,
        xp_earned: completed.iter().map(|task| u64::from(task.reward_points)).sum(),
    };

    log::debug!(
        "member={} tasks={} completed={} score={:.1}",
        member.id,
        metrics.total_tasks,
        metrics.completed_tasks,
        metrics.workload_score
    );

    metrics
}

pub fn classify(workload_score: f64) -> WorkloadStatus {
    if workload_score >= OVERLOADED_THRESHOLD {
        WorkloadStatus::Overloaded
    } else if workload_score >= BUSY_THRESHOLD {
        WorkloadStatus::Busy
    } else {
        WorkloadStatus::Optimal
    }
}

/// Advisories in fixed order; several may apply at once and an empty result
/// means nothing needs attention. The efficiency and skill checks only fire
/// when the member has work in the window.
pub fn recommend(metrics: &WorkloadMetrics) -> Vec<Recommendation> {
    let mut advice = Vec::new();
    let has_work = metrics.total_tasks > 0;

    if metrics.workload_score >= OVERLOADED_THRESHOLD {
        advice.push(Recommendation::Redistribute);
    }
    if metrics.overdue_tasks > 0 {
        advice.push(Recommendation::ReviewOverdue {
            count: metrics.overdue_tasks,
        });
    }
    if metrics.upcoming_deadlines >= UPCOMING_DEADLINE_ALERT {
        advice.push(Recommendation::PlanDeadlines);
    }
    if has_work && metrics.efficiency < EFFICIENCY_ALERT {
        advice.push(Recommendation::ResolveBlockers);
    }
    if has_work
        && metrics
            .skills_usage
            .iter()
            .any(|entry| entry.usage < SKILL_USAGE_ALERT)
    {
        advice.push(Recommendation::UseSkills);
    }

    advice
}

fn mean_progress(tasks: &[&Task]) -> f64 {
    let total: f64 = tasks.iter().map(|task| f64::from(task.progress)).sum();
    if tasks.is_empty() {
        0.0
    } else {
        total / tasks.len() as f64
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}
