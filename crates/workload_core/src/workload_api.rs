use crate::error::AppError;
use crate::model::{Member, Task};
use crate::storage::SnapshotSource;
use crate::storage::json_store::JsonStore;
use crate::workload::{
    self, WindowKind, WorkloadMetrics, WorkloadStatus, classify, compute_metrics, recommend,
};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReport {
    pub member_id: String,
    pub name: String,
    pub level: u32,
    pub points: u64,
    pub window: WindowKind,
    pub status: WorkloadStatus,
    pub status_description: String,
    pub metrics: WorkloadMetrics,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub window: WindowKind,
    pub members: Vec<MemberReport>,
    pub average_workload_score: f64,
    pub optimal: usize,
    pub busy: usize,
    pub overloaded: usize,
}

pub fn member_report(
    member_id: &str,
    window: WindowKind,
    now: OffsetDateTime,
) -> Result<MemberReport, AppError> {
    let store = JsonStore::from_env()?;
    member_report_with_source(&store, member_id, window, now)
}

pub fn team_report(window: WindowKind, now: OffsetDateTime) -> Result<TeamReport, AppError> {
    let store = JsonStore::from_env()?;
    team_report_with_source(&store, window, now)
}

pub fn list_members() -> Result<Vec<Member>, AppError> {
    let store = JsonStore::from_env()?;
    list_members_with_source(&store)
}

/// Parse a caller-supplied reference instant.
pub fn parse_instant(raw: &str) -> Result<OffsetDateTime, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("now is required"));
    }
    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map_err(|_| AppError::invalid_input("now must be RFC3339"))
}

pub fn member_report_with_source(
    source: &dyn SnapshotSource,
    member_id: &str,
    window: WindowKind,
    now: OffsetDateTime,
) -> Result<MemberReport, AppError> {
    let trimmed_id = member_id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("member id is required"));
    }

    let snapshot = source.load()?;
    let member = snapshot
        .member(trimmed_id)
        .ok_or_else(|| AppError::invalid_input("member not found"))?;
    let in_window = workload::select_tasks_in_window(&snapshot.tasks, window, now);

    Ok(build_report(member, &in_window, window, now))
}

pub fn team_report_with_source(
    source: &dyn SnapshotSource,
    window: WindowKind,
    now: OffsetDateTime,
) -> Result<TeamReport, AppError> {
    let snapshot = source.load()?;
    let in_window = workload::select_tasks_in_window(&snapshot.tasks, window, now);

    let mut members: Vec<MemberReport> = snapshot
        .members
        .iter()
        .map(|member| build_report(member, &in_window, window, now))
        .collect();
    members.sort_by(|a, b| {
        b.metrics
            .workload_score
            .total_cmp(&a.metrics.workload_score)
            .then_with(|| a.member_id.cmp(&b.member_id))
    });

    let count = |status: WorkloadStatus| members.iter().filter(|r| r.status == status).count();
    let optimal = count(WorkloadStatus::Optimal);
    let busy = count(WorkloadStatus::Busy);
    let overloaded = count(WorkloadStatus::Overloaded);

    let average_workload_score = if members.is_empty() {
        0.0
    } else {
        members
            .iter()
            .map(|r| r.metrics.workload_score)
            .sum::<f64>()
            / members.len() as f64
    };

    log::debug!(
        "team window={} members={} overloaded={}",
        window,
        members.len(),
        overloaded
    );

    Ok(TeamReport {
        window,
        members,
        average_workload_score,
        optimal,
        busy,
        overloaded,
    })
}

pub fn list_members_with_source(source: &dyn SnapshotSource) -> Result<Vec<Member>, AppError> {
    let mut members = source.load()?.members;
    members.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(members)
}

fn build_report(
    member: &Member,
    in_window: &[Task],
    window: WindowKind,
    now: OffsetDateTime,
) -> MemberReport {
    let metrics = compute_metrics(member, in_window, now);
    let status = classify(metrics.workload_score);
    let recommendations = recommend(&metrics)
        .iter()
        .map(|advice| advice.to_string())
        .collect();

    MemberReport {
        member_id: member.id.clone(),
        name: member.display_name().to_string(),
        level: member.level,
        points: member.points,
        window,
        status,
        status_description: status.description().to_string(),
        metrics,
        recommendations,
    }
}
