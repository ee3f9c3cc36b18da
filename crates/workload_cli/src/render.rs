//! Plain-text rendering of reports. JSON output goes straight through serde.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use workload_core::config::Palette;
use workload_core::model::Member;
use workload_core::workload_api::{MemberReport, TeamReport};

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
    #[tabled(rename = "Done")]
    done: usize,
    #[tabled(rename = "Overdue")]
    overdue: usize,
    #[tabled(rename = "Efficiency")]
    efficiency: String,
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Level")]
    level: u32,
    #[tabled(rename = "Points")]
    points: u64,
    #[tabled(rename = "Skills")]
    skills: String,
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn member_report(report: &MemberReport, palette: &Palette) -> String {
    let metrics = &report.metrics;
    let mut lines = vec![
        format!(
            "{} ({}) | level {} | {} pts",
            report.name, report.member_id, report.level, report.points
        ),
        format!(
            "window: {} | status: {} {}",
            report.window,
            palette.status(report.status),
            palette.mutedize(&format!("({})", report.status_description))
        ),
        format!(
            "tasks: {} total, {} completed, {} overdue, {} due within 7 days",
            metrics.total_tasks,
            metrics.completed_tasks,
            metrics.overdue_tasks,
            metrics.upcoming_deadlines
        ),
        format!(
            "score: {} | efficiency: {} | productivity: {} | avg progress: {}",
            percent(metrics.workload_score),
            percent(metrics.efficiency),
            percent(metrics.productivity),
            percent(metrics.average_progress)
        ),
        format!(
            "hours: {:.1} estimated, {:.1} completed | xp: {}",
            metrics.total_estimated_hours, metrics.completed_hours, metrics.xp_earned
        ),
    ];

    if !metrics.skills_usage.is_empty() {
        let skills: Vec<String> = metrics
            .skills_usage
            .iter()
            .map(|entry| format!("{} {}", entry.skill, percent(entry.usage)))
            .collect();
        lines.push(format!("skills: {}", skills.join(", ")));
    }

    if report.recommendations.is_empty() {
        lines.push(palette.mutedize("no recommendations"));
    } else {
        lines.push("recommendations:".to_string());
        for advice in &report.recommendations {
            lines.push(format!("  - {advice}"));
        }
    }

    lines.join("\n")
}

pub fn team_report(report: &TeamReport, palette: &Palette) -> String {
    if report.members.is_empty() {
        return palette.mutedize("no team members");
    }

    let rows = report.members.iter().map(|member| TeamRow {
        member: format!("{} ({})", member.name, member.member_id),
        status: member.status.label().to_string(),
        score: percent(member.metrics.workload_score),
        tasks: member.metrics.total_tasks,
        done: member.metrics.completed_tasks,
        overdue: member.metrics.overdue_tasks,
        efficiency: percent(member.metrics.efficiency),
    });
    let mut table = Table::new(rows);
    table.with(Style::modern());

    format!(
        "{table}\nwindow: {} | average score: {} | optimal {} / busy {} / overloaded {}",
        report.window,
        percent(report.average_workload_score),
        report.optimal,
        report.busy,
        report.overloaded
    )
}

pub fn members(members: &[Member], palette: &Palette) -> String {
    if members.is_empty() {
        return palette.mutedize("no team members");
    }

    let rows = members.iter().map(|member| MemberRow {
        id: member.id.clone(),
        name: member.display_name().to_string(),
        level: member.level,
        points: member.points,
        skills: member.skills.join(", "),
    });
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::{member_report, members, team_report};
    use workload_core::config::palette_for_theme;
    use workload_core::model::Member;
    use workload_core::workload::{SkillUsage, WindowKind, WorkloadMetrics, WorkloadStatus};
    use workload_core::workload_api::{MemberReport, TeamReport};

    fn report() -> MemberReport {
        MemberReport {
            member_id: "m-1".to_string(),
            name: "Ada".to_string(),
            level: 3,
            points: 90,
            window: WindowKind::Month,
            status: WorkloadStatus::Busy,
            status_description: WorkloadStatus::Busy.description().to_string(),
            metrics: WorkloadMetrics {
                total_tasks: 4,
                completed_tasks: 1,
                workload_score: 62.5,
                skills_usage: vec![SkillUsage {
                    skill: "React".to_string(),
                    usage: 25.0,
                }],
                ..WorkloadMetrics::default()
            },
            recommendations: vec!["identify blockers affecting efficiency".to_string()],
        }
    }

    #[test]
    fn member_report_lists_metrics_and_advice() {
        let text = member_report(&report(), &palette_for_theme(None));

        assert!(text.starts_with("Ada (m-1) | level 3 | 90 pts"));
        assert!(text.contains("status: busy (high but manageable load)"));
        assert!(text.contains("score: 62.5%"));
        assert!(text.contains("skills: React 25.0%"));
        assert!(text.contains("  - identify blockers affecting efficiency"));
    }

    #[test]
    fn member_report_colours_status_with_theme() {
        let text = member_report(&report(), &palette_for_theme(Some("noir")));
        assert!(text.contains("\x1b[38;5;214mbusy\x1b[0m"));
    }

    #[test]
    fn team_report_renders_table_and_summary() {
        let team = TeamReport {
            window: WindowKind::Month,
            members: vec![report()],
            average_workload_score: 62.5,
            optimal: 0,
            busy: 1,
            overloaded: 0,
        };

        let text = team_report(&team, &palette_for_theme(None));

        assert!(text.contains("Ada (m-1)"));
        assert!(text.contains("Efficiency"));
        assert!(text.contains("optimal 0 / busy 1 / overloaded 0"));
    }

    #[test]
    fn empty_collections_render_placeholder() {
        let palette = palette_for_theme(None);
        assert_eq!(members(&[], &palette), "no team members");

        let single = vec![Member {
            id: "m-1".to_string(),
            name: "Ada".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            level: 2,
            points: 10,
        }];
        assert!(members(&single, &palette).contains("Rust, SQL"));
    }
}
