use chrono::NaiveDate;
use qms_core::{
    Audit, AuditSummary, Catalog, Choice, Document, DocumentSummary, Domain, NonConformance,
    NonConformanceSummary, Overview, StatusTally, TrainingSession, TrainingSummary,
};
use serde::Serialize;

/// A report entry with its derived overdue flag alongside the stored fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcRow<'a> {
    #[serde(flatten)]
    pub record: &'a NonConformance,
    pub overdue: bool,
}

pub fn nc_rows<'a>(records: &[&'a NonConformance], today: NaiveDate) -> Vec<NcRow<'a>> {
    records
        .iter()
        .map(|&record| NcRow {
            record,
            overdue: record.is_overdue(today),
        })
        .collect()
}

/// Domain summaries; `None` sections are omitted from JSON output.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audits: Option<AuditSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_conformances: Option<NonConformanceSummary>,
}

impl SummaryReport {
    pub fn build(catalog: &Catalog, domain: Option<Domain>, today: NaiveDate) -> Self {
        let wants = |candidate: Domain| domain.map_or(true, |domain| domain == candidate);
        Self {
            documents: wants(Domain::Documents)
                .then(|| DocumentSummary::from_store(&catalog.documents)),
            audits: wants(Domain::Audits).then(|| AuditSummary::from_store(&catalog.audits)),
            training: wants(Domain::Training)
                .then(|| TrainingSummary::from_store(&catalog.training)),
            non_conformances: wants(Domain::NonConformance)
                .then(|| NonConformanceSummary::from_store(&catalog.non_conformances, today)),
        }
    }
}

pub fn heading(domain: Domain, shown: usize, total: usize) -> String {
    if shown == total {
        format!("{} ({total})", domain.label())
    } else {
        format!("{} ({shown} of {total})", domain.label())
    }
}

pub fn document_lines(records: &[&Document]) -> Vec<String> {
    records
        .iter()
        .map(|doc| {
            format!(
                "- [{}] {} v{} ({}/{}) {} by {}, {}",
                doc.id,
                doc.title,
                doc.version,
                doc.category,
                doc.status,
                doc.last_modified,
                doc.modified_by,
                doc.size
            )
        })
        .collect()
}

pub fn audit_lines(records: &[&Audit]) -> Vec<String> {
    records
        .iter()
        .map(|audit| {
            let mut line = format!(
                "- [{}] {} ({}/{}) {} by {}",
                audit.id,
                audit.title,
                audit.audit_type,
                audit.status,
                audit.display_date(),
                audit.auditor
            );
            if audit.findings > 0 || audit.non_conformances > 0 {
                line.push_str(&format!(
                    ", {} findings, {} NCs",
                    audit.findings, audit.non_conformances
                ));
            }
            line
        })
        .collect()
}

pub fn training_lines(records: &[&TrainingSession]) -> Vec<String> {
    records
        .iter()
        .map(|session| {
            format!(
                "- [{}] {} ({}) {} by {}, {}h, {}/{} attendees, {}% complete",
                session.id,
                session.title,
                session.status,
                session.scheduled_date,
                session.instructor,
                session.duration_hours,
                session.attendees,
                session.max_attendees,
                session.completion_rate
            )
        })
        .collect()
}

pub fn nc_lines(rows: &[NcRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let nc = row.record;
            let flag = if row.overdue { " OVERDUE" } else { "" };
            format!(
                "- [{}] {} ({}/{}/{}) due {}{flag}, assigned to {}",
                nc.id, nc.title, nc.severity, nc.status, nc.category, nc.due_date, nc.assigned_to
            )
        })
        .collect()
}

fn tally_line(tally: &StatusTally) -> String {
    tally
        .iter()
        .map(|entry| format!("{}: {}", entry.label, entry.count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn summary_lines(catalog: &Catalog, report: &SummaryReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.documents.is_some() {
        let total = catalog.documents.len();
        lines.push(heading(Domain::Documents, total, total));
        lines.push(format!("  {}", tally_line(&catalog.documents.tally())));
    }
    if let Some(summary) = &report.audits {
        lines.push(heading(Domain::Audits, catalog.audits.len(), catalog.audits.len()));
        lines.push(format!("  {}", tally_line(&catalog.audits.tally())));
        lines.push(format!(
            "  Non-conformances raised: {}",
            summary.total_non_conformances
        ));
    }
    if let Some(summary) = &report.training {
        lines.push(heading(Domain::Training, catalog.training.len(), catalog.training.len()));
        lines.push(format!("  {}", tally_line(&catalog.training.tally())));
        lines.push(format!("  Total attendees: {}", summary.total_attendees));
    }
    if let Some(summary) = &report.non_conformances {
        let total = catalog.non_conformances.len();
        lines.push(heading(Domain::NonConformance, total, total));
        lines.push(format!("  {}", tally_line(&catalog.non_conformances.tally())));
        lines.push(format!("  Overdue: {}", summary.overdue));
    }
    lines
}

pub fn overview_lines(overview: &Overview<'_>) -> Vec<String> {
    let tiles = &overview.tiles;
    let mut lines = vec![
        format!("Quality overview as of {}", overview.today),
        format!("  Active documents: {}", tiles.active_documents),
        format!("  Completed audits: {}", tiles.completed_audits),
        format!("  Training sessions: {}", tiles.training_sessions),
        format!("  Open non-conformances: {}", tiles.open_non_conformances),
    ];

    lines.push("Recent activity:".to_string());
    if overview.recent_activity.is_empty() {
        lines.push("  (none)".to_string());
    }
    for activity in &overview.recent_activity {
        lines.push(format!(
            "  - {} ({}, {}) {}",
            activity.title,
            activity.domain,
            activity.relative_time(),
            activity.status_label
        ));
    }

    lines.push("Upcoming tasks:".to_string());
    if overview.upcoming_tasks.is_empty() {
        lines.push("  (none)".to_string());
    }
    for task in &overview.upcoming_tasks {
        lines.push(format!(
            "  - {} {} [{}]",
            task.due_date,
            task.title,
            task.priority.label()
        ));
    }

    lines.push("Upcoming training:".to_string());
    if overview.upcoming_training.is_empty() {
        lines.push("  (none scheduled)".to_string());
    }
    for entry in &overview.upcoming_training {
        lines.push(format!(
            "  - {} {} ({} spots available)",
            entry.session.scheduled_date, entry.session.title, entry.spots_available
        ));
    }

    lines.push("Recent non-conformances:".to_string());
    for nc in &overview.recent_non_conformances {
        lines.push(format!(
            "  - [{}] {} ({}) reported {}",
            nc.id, nc.title, nc.severity, nc.reported_date
        ));
    }

    if !overview.overdue_non_conformances.is_empty() {
        lines.push("Overdue non-conformances:".to_string());
        for nc in &overview.overdue_non_conformances {
            lines.push(format!("  - [{}] {} due {}", nc.id, nc.title, nc.due_date));
        }
    }
    lines
}
