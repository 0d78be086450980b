use crate::overdue;
use crate::query::Facet;
use crate::records::{
    Audit, Choice, Document, DocumentStatus, NcStatus, NonConformance, ScheduleStatus,
    TrainingSession,
};
use crate::store::RecordStore;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Per-status record counts in the status field's declared order. Every
/// declared status is present, including those with no records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    counts: Vec<StatusCount>,
}

impl StatusTally {
    pub fn from_records<R>(facet: &Facet<R>, records: &[R]) -> Self {
        let mut counts: Vec<StatusCount> = (facet.options)()
            .into_iter()
            .map(|opt| StatusCount {
                status: opt.value,
                label: opt.label,
                count: 0,
            })
            .collect();

        for record in records {
            let key = (facet.key)(record);
            if let Some(entry) = counts.iter_mut().find(|entry| entry.status == key) {
                entry.count += 1;
            }
        }

        Self { counts }
    }

    pub fn count_of(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn count<C: Choice>(&self, status: C) -> usize {
        self.count_of(status.as_str())
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusCount> {
        self.counts.iter()
    }
}

pub fn sum_by<R>(records: &[R], metric: impl Fn(&R) -> u64) -> u64 {
    records.iter().map(metric).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub active: usize,
    pub draft: usize,
    pub review: usize,
}

impl DocumentSummary {
    pub fn from_store(store: &RecordStore<Document>) -> Self {
        let tally = store.tally();
        Self {
            active: tally.count(DocumentStatus::Active),
            draft: tally.count(DocumentStatus::Draft),
            review: tally.count(DocumentStatus::Review),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_non_conformances: u64,
}

impl AuditSummary {
    pub fn from_store(store: &RecordStore<Audit>) -> Self {
        let tally = store.tally();
        Self {
            scheduled: tally.count(ScheduleStatus::Scheduled),
            in_progress: tally.count(ScheduleStatus::InProgress),
            completed: tally.count(ScheduleStatus::Completed),
            total_non_conformances: store.sum_by(|audit| u64::from(audit.non_conformances)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSummary {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_attendees: u64,
}

impl TrainingSummary {
    pub fn from_store(store: &RecordStore<TrainingSession>) -> Self {
        let tally = store.tally();
        Self {
            scheduled: tally.count(ScheduleStatus::Scheduled),
            in_progress: tally.count(ScheduleStatus::InProgress),
            completed: tally.count(ScheduleStatus::Completed),
            total_attendees: store.sum_by(|session| u64::from(session.attendees)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonConformanceSummary {
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub overdue: usize,
}

impl NonConformanceSummary {
    /// `today` drives the overdue count only; status counts are date-free.
    pub fn from_store(store: &RecordStore<NonConformance>, today: NaiveDate) -> Self {
        let tally = store.tally();
        Self {
            open: tally.count(NcStatus::Open),
            in_progress: tally.count(NcStatus::InProgress),
            closed: tally.count(NcStatus::Closed),
            overdue: overdue::overdue_records(store.records(), today).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas;
    use crate::seed;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn audit_summary_matches_screen_tiles() {
        let store = RecordStore::new(&schemas::AUDITS, seed::audits());
        let summary = AuditSummary::from_store(&store);
        assert_eq!(
            summary,
            AuditSummary {
                scheduled: 2,
                in_progress: 1,
                completed: 2,
                total_non_conformances: 1,
            }
        );
    }

    #[test]
    fn training_summary_sums_attendees() {
        let store = RecordStore::new(&schemas::TRAINING, seed::training_sessions());
        let summary = TrainingSummary::from_store(&store);
        assert_eq!(summary.total_attendees, 50);
        assert_eq!(summary.scheduled, 2);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.completed, 2);
    }

    #[test]
    fn document_summary_counts_each_status() {
        let store = RecordStore::new(&schemas::DOCUMENTS, seed::documents());
        let summary = DocumentSummary::from_store(&store);
        assert_eq!((summary.active, summary.draft, summary.review), (3, 1, 1));
    }

    #[test]
    fn non_conformance_summary_counts_overdue_at_date() {
        let store = RecordStore::new(&schemas::NON_CONFORMANCES, seed::non_conformances());
        let early = NonConformanceSummary::from_store(&store, day(2024, 1, 15));
        assert_eq!(early.overdue, 0);

        let late = NonConformanceSummary::from_store(&store, day(2024, 1, 29));
        assert_eq!((late.open, late.in_progress, late.closed), (2, 2, 1));
        // NC-002 (due 25th), NC-004 (28th) and NC-005 (22nd); NC-003 is closed.
        assert_eq!(late.overdue, 3);
    }

    #[test]
    fn empty_store_counts_zero_everywhere() {
        let store = RecordStore::new(&schemas::AUDITS, Vec::new());
        let tally = store.tally();
        assert_eq!(tally.total(), 0);
        assert!(tally.iter().all(|entry| entry.count == 0));
        assert_eq!(tally.iter().count(), 3);
        assert_eq!(AuditSummary::from_store(&store), AuditSummary::default());
    }

    #[test]
    fn per_status_counts_sum_to_store_length() {
        let store = RecordStore::new(&schemas::NON_CONFORMANCES, seed::non_conformances());
        let tally = store.tally();
        assert_eq!(tally.total(), store.len());
        assert_eq!(tally.count_of("archived"), 0);
    }
}
