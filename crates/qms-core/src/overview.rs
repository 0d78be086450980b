use crate::catalog::Catalog;
use crate::overdue;
use crate::records::{
    Choice, DocumentStatus, Domain, NcStatus, NonConformance, ScheduleStatus, TrainingSession,
    UpcomingTask,
};
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_RECENT_LIMIT: usize = 3;
pub const DEFAULT_ACTIVITY_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewTiles {
    pub active_documents: usize,
    pub completed_audits: usize,
    pub training_sessions: usize,
    pub open_non_conformances: usize,
}

impl OverviewTiles {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            active_documents: catalog
                .documents
                .count_where(|doc| doc.status == DocumentStatus::Active),
            completed_audits: catalog
                .audits
                .count_where(|audit| audit.status == ScheduleStatus::Completed),
            training_sessions: catalog.training.len(),
            open_non_conformances: catalog
                .non_conformances
                .count_where(|nc| nc.status == NcStatus::Open),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSession<'a> {
    #[serde(flatten)]
    pub session: &'a TrainingSession,
    pub spots_available: u32,
}

/// A dated event taken from one of the domain stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity<'a> {
    pub domain: Domain,
    pub title: &'a str,
    pub date: NaiveDate,
    pub days_ago: i64,
    pub status: &'static str,
    pub status_label: &'static str,
}

impl Activity<'_> {
    pub fn relative_time(&self) -> String {
        match self.days_ago {
            0 => "today".to_string(),
            1 => "1 day ago".to_string(),
            days => format!("{days} days ago"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview<'a> {
    pub today: NaiveDate,
    pub tiles: OverviewTiles,
    pub recent_activity: Vec<Activity<'a>>,
    pub upcoming_tasks: Vec<&'a UpcomingTask>,
    pub upcoming_training: Vec<UpcomingSession<'a>>,
    pub recent_non_conformances: Vec<&'a NonConformance>,
    pub overdue_non_conformances: Vec<&'a NonConformance>,
}

impl<'a> Overview<'a> {
    pub fn build(catalog: &'a Catalog, today: NaiveDate, recent_limit: usize) -> Self {
        Self {
            today,
            tiles: OverviewTiles::from_catalog(catalog),
            recent_activity: recent_activity(catalog, today, DEFAULT_ACTIVITY_LIMIT),
            upcoming_tasks: upcoming_tasks(&catalog.tasks),
            upcoming_training: upcoming_training(&catalog.training)
                .into_iter()
                .map(|session| UpcomingSession {
                    session,
                    spots_available: session.spots_available(),
                })
                .collect(),
            recent_non_conformances: recent_non_conformances(
                &catalog.non_conformances,
                recent_limit,
            ),
            overdue_non_conformances: overdue::overdue_records(
                catalog.non_conformances.records(),
                today,
            ),
        }
    }
}

/// Records dated on or before `today`, newest first, at most `limit` entries.
/// Documents date by last modification, audits by completion (or plan),
/// training by session date and non-conformances by report date. Same-day
/// events keep domain order, then store order.
pub fn recent_activity(catalog: &Catalog, today: NaiveDate, limit: usize) -> Vec<Activity<'_>> {
    fn event<'a, C: Choice>(
        domain: Domain,
        title: &'a str,
        date: NaiveDate,
        status: C,
        today: NaiveDate,
    ) -> Activity<'a> {
        Activity {
            domain,
            title,
            date,
            days_ago: (today - date).num_days(),
            status: status.as_str(),
            status_label: status.label(),
        }
    }

    let documents = catalog.documents.iter().map(|doc| {
        event(Domain::Documents, &doc.title, doc.last_modified, doc.status, today)
    });
    let audits = catalog.audits.iter().map(|audit| {
        event(Domain::Audits, &audit.title, audit.display_date(), audit.status, today)
    });
    let training = catalog.training.iter().map(|session| {
        event(
            Domain::Training,
            &session.title,
            session.scheduled_date,
            session.status,
            today,
        )
    });
    let reports = catalog.non_conformances.iter().map(|nc| {
        event(Domain::NonConformance, &nc.title, nc.reported_date, nc.status, today)
    });

    let mut events: Vec<Activity> = documents
        .chain(audits)
        .chain(training)
        .chain(reports)
        .filter(|activity| activity.date <= today)
        .collect();
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events.truncate(limit);
    events
}

/// Tasks by due date, earliest first; equal dates keep catalog order.
pub fn upcoming_tasks(tasks: &[UpcomingTask]) -> Vec<&UpcomingTask> {
    let mut tasks: Vec<&UpcomingTask> = tasks.iter().collect();
    tasks.sort_by_key(|task| task.due_date);
    tasks
}

/// Scheduled sessions, earliest first. Sessions on the same date keep store
/// order.
pub fn upcoming_training(store: &RecordStore<TrainingSession>) -> Vec<&TrainingSession> {
    let mut sessions: Vec<&TrainingSession> = store
        .iter()
        .filter(|session| session.status == ScheduleStatus::Scheduled)
        .collect();
    sessions.sort_by_key(|session| session.scheduled_date);
    sessions
}

/// Most recently reported first, at most `limit` entries.
pub fn recent_non_conformances(
    store: &RecordStore<NonConformance>,
    limit: usize,
) -> Vec<&NonConformance> {
    let mut reports: Vec<&NonConformance> = store.iter().collect();
    reports.sort_by(|a, b| b.reported_date.cmp(&a.reported_date));
    reports.truncate(limit);
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn tiles_are_computed_from_records() {
        let tiles = OverviewTiles::from_catalog(&Catalog::seeded());
        assert_eq!(
            tiles,
            OverviewTiles {
                active_documents: 3,
                completed_audits: 2,
                training_sessions: 5,
                open_non_conformances: 2,
            }
        );
    }

    #[test]
    fn upcoming_training_is_date_ordered_with_spots() {
        let catalog = Catalog::seeded();
        let overview = Overview::build(&catalog, day(2024, 1, 21), DEFAULT_RECENT_LIMIT);
        let titles: Vec<_> = overview
            .upcoming_training
            .iter()
            .map(|entry| (entry.session.title.as_str(), entry.spots_available))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("Internal Auditor Training", 2),
                ("Corrective Action Process", 10),
            ]
        );
    }

    #[test]
    fn recent_reports_are_newest_first() {
        let catalog = Catalog::seeded();
        let ids: Vec<_> = recent_non_conformances(&catalog.non_conformances, 3)
            .iter()
            .map(|nc| nc.id.as_str())
            .collect();
        assert_eq!(ids, vec!["NC-2024-005", "NC-2024-001", "NC-2024-002"]);
    }

    #[test]
    fn overview_lists_overdue_reports() {
        let catalog = Catalog::seeded();
        let overview = Overview::build(&catalog, day(2024, 1, 26), 0);
        let ids: Vec<_> = overview
            .overdue_non_conformances
            .iter()
            .map(|nc| nc.id.as_str())
            .collect();
        assert_eq!(ids, vec!["NC-2024-002", "NC-2024-005"]);
        assert!(overview.recent_non_conformances.is_empty());
    }

    #[test]
    fn recent_activity_spans_domains_newest_first() {
        let catalog = Catalog::seeded();
        let activity = recent_activity(&catalog, day(2024, 1, 21), DEFAULT_ACTIVITY_LIMIT);
        let seen: Vec<_> = activity
            .iter()
            .map(|event| (event.domain, event.title, event.relative_time()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Domain::Audits, "Management System Review", "1 day ago".to_string()),
                (Domain::Training, "Document Control Procedures", "1 day ago".to_string()),
                (
                    Domain::NonConformance,
                    "Product Dimension Out of Tolerance",
                    "3 days ago".to_string()
                ),
                (Domain::Audits, "Internal Quality Audit - Q1 2024", "6 days ago".to_string()),
            ]
        );
        assert_eq!(activity[0].status, "in-progress");
        assert_eq!(activity[0].status_label, "In Progress");
    }

    #[test]
    fn future_records_are_not_activity() {
        let catalog = Catalog::seeded();
        let activity = recent_activity(&catalog, day(2023, 12, 28), 10);
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].title, "Corrective Action Procedure");
        assert_eq!(activity[0].relative_time(), "today");
        assert!(recent_activity(&catalog, day(2023, 12, 1), 10).is_empty());
    }

    #[test]
    fn upcoming_tasks_sort_by_due_date() {
        let mut tasks = crate::seed::tasks();
        tasks.reverse();
        let ordered: Vec<_> = upcoming_tasks(&tasks)
            .iter()
            .map(|task| (task.title.as_str(), task.priority.as_str()))
            .collect();
        assert_eq!(
            ordered,
            vec![
                ("Quarterly Management Review", "high"),
                ("Supplier Audit - ABC Corp", "medium"),
                ("Document Control Review", "low"),
            ]
        );
    }

    #[test]
    fn overview_serializes_flattened_sessions() {
        let catalog = Catalog::seeded();
        let overview = Overview::build(&catalog, day(2024, 1, 21), 1);
        let value = serde_json::to_value(&overview).expect("serialize");
        assert_eq!(value["today"], "2024-01-21");
        assert_eq!(value["upcomingTraining"][0]["spotsAvailable"], 2);
        assert_eq!(value["upcomingTraining"][0]["title"], "Internal Auditor Training");
        assert_eq!(value["tiles"]["openNonConformances"], 2);
        assert_eq!(value["upcomingTasks"][0]["priority"], "high");
        assert_eq!(value["recentActivity"][0]["daysAgo"], 1);
    }
}
