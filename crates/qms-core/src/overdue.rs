//! Derived "overdue" flag for non-conformance reports.
//!
//! The flag is never stored. It is recomputed from the due date, the status
//! and the evaluation date at calendar-day granularity, so results do not
//! drift with the time of day or the host time zone's offset.

use crate::records::{NcStatus, NonConformance};
use chrono::{Local, NaiveDate};

/// True when the report is still open (any non-terminal status) and its due
/// date lies strictly before `today`. A report due today is not overdue.
pub fn is_overdue(due: NaiveDate, status: NcStatus, today: NaiveDate) -> bool {
    !status.is_terminal() && due < today
}

pub fn overdue_records(records: &[NonConformance], today: NaiveDate) -> Vec<&NonConformance> {
    records
        .iter()
        .filter(|nc| is_overdue(nc.due_date, nc.status, today))
        .collect()
}

/// Calendar date on the local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
