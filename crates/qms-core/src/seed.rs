//! Built-in records shown by every screen when no snapshot file is given.

use crate::records::{
    Audit, AuditType, Document, DocumentCategory, DocumentStatus, NcCategory, NcStatus,
    NonConformance, Priority, ScheduleStatus, Severity, TrainingSession, UpcomingTask,
};
use chrono::NaiveDate;

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid seed date")
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: u32,
    title: &str,
    version: &str,
    category: DocumentCategory,
    last_modified: NaiveDate,
    modified_by: &str,
    status: DocumentStatus,
    size: &str,
) -> Document {
    Document {
        id,
        title: title.to_string(),
        version: version.to_string(),
        category,
        last_modified,
        modified_by: modified_by.to_string(),
        status,
        size: size.to_string(),
    }
}

pub fn documents() -> Vec<Document> {
    use DocumentCategory::*;
    use DocumentStatus::*;
    vec![
        document(
            1,
            "Quality Manual",
            "2.1",
            Policy,
            day(2024, 1, 10),
            "John Smith",
            Active,
            "2.4 MB",
        ),
        document(
            2,
            "Work Instruction - Assembly Process",
            "1.3",
            Procedure,
            day(2024, 1, 8),
            "Sarah Johnson",
            Active,
            "1.8 MB",
        ),
        document(
            3,
            "Supplier Qualification Form",
            "1.0",
            Form,
            day(2024, 1, 5),
            "Mike Davis",
            Draft,
            "0.5 MB",
        ),
        document(
            4,
            "Internal Audit Checklist",
            "2.0",
            Checklist,
            day(2024, 1, 3),
            "Lisa Wilson",
            Active,
            "0.8 MB",
        ),
        document(
            5,
            "Corrective Action Procedure",
            "1.5",
            Procedure,
            day(2023, 12, 28),
            "John Smith",
            Review,
            "1.2 MB",
        ),
    ]
}

pub fn audits() -> Vec<Audit> {
    vec![
        Audit {
            id: 1,
            title: "Internal Quality Audit - Q1 2024".to_string(),
            audit_type: AuditType::Internal,
            status: ScheduleStatus::Completed,
            auditor: "John Smith".to_string(),
            scheduled_date: day(2024, 1, 15),
            completed_date: Some(day(2024, 1, 15)),
            findings: 2,
            non_conformances: 0,
        },
        Audit {
            id: 2,
            title: "Supplier Audit - ABC Manufacturing".to_string(),
            audit_type: AuditType::Supplier,
            status: ScheduleStatus::Scheduled,
            auditor: "Sarah Johnson".to_string(),
            scheduled_date: day(2024, 1, 25),
            completed_date: None,
            findings: 0,
            non_conformances: 0,
        },
        Audit {
            id: 3,
            title: "Management System Review".to_string(),
            audit_type: AuditType::Management,
            status: ScheduleStatus::InProgress,
            auditor: "Mike Davis".to_string(),
            scheduled_date: day(2024, 1, 20),
            completed_date: None,
            findings: 1,
            non_conformances: 0,
        },
        Audit {
            id: 4,
            title: "Process Audit - Production Line A".to_string(),
            audit_type: AuditType::Process,
            status: ScheduleStatus::Completed,
            auditor: "Lisa Wilson".to_string(),
            scheduled_date: day(2024, 1, 10),
            completed_date: Some(day(2024, 1, 12)),
            findings: 3,
            non_conformances: 1,
        },
        Audit {
            id: 5,
            title: "Customer Audit - XYZ Corp".to_string(),
            audit_type: AuditType::Customer,
            status: ScheduleStatus::Scheduled,
            auditor: "John Smith".to_string(),
            scheduled_date: day(2024, 2, 1),
            completed_date: None,
            findings: 0,
            non_conformances: 0,
        },
    ]
}

pub fn training_sessions() -> Vec<TrainingSession> {
    vec![
        TrainingSession {
            id: 1,
            title: "AS9100D Standard Overview".to_string(),
            instructor: "John Smith".to_string(),
            status: ScheduleStatus::Completed,
            scheduled_date: day(2024, 1, 15),
            duration_hours: 4,
            attendees: 12,
            max_attendees: 15,
            completion_rate: 100,
        },
        TrainingSession {
            id: 2,
            title: "Internal Auditor Training".to_string(),
            instructor: "Sarah Johnson".to_string(),
            status: ScheduleStatus::Scheduled,
            scheduled_date: day(2024, 1, 25),
            duration_hours: 8,
            attendees: 8,
            max_attendees: 10,
            completion_rate: 0,
        },
        TrainingSession {
            id: 3,
            title: "Document Control Procedures".to_string(),
            instructor: "Mike Davis".to_string(),
            status: ScheduleStatus::InProgress,
            scheduled_date: day(2024, 1, 20),
            duration_hours: 2,
            attendees: 15,
            max_attendees: 20,
            completion_rate: 60,
        },
        TrainingSession {
            id: 4,
            title: "Risk Management Training".to_string(),
            instructor: "Lisa Wilson".to_string(),
            status: ScheduleStatus::Completed,
            scheduled_date: day(2024, 1, 10),
            duration_hours: 6,
            attendees: 10,
            max_attendees: 12,
            completion_rate: 90,
        },
        TrainingSession {
            id: 5,
            title: "Corrective Action Process".to_string(),
            instructor: "John Smith".to_string(),
            status: ScheduleStatus::Scheduled,
            scheduled_date: day(2024, 2, 1),
            duration_hours: 3,
            attendees: 5,
            max_attendees: 15,
            completion_rate: 0,
        },
    ]
}

pub fn non_conformances() -> Vec<NonConformance> {
    vec![
        NonConformance {
            id: "NC-2024-001".to_string(),
            title: "Material Inspection Failure".to_string(),
            description: "Incoming material did not meet specification requirements".to_string(),
            severity: Severity::Major,
            status: NcStatus::Open,
            reported_by: "John Smith".to_string(),
            assigned_to: "Sarah Johnson".to_string(),
            reported_date: day(2024, 1, 15),
            due_date: day(2024, 1, 30),
            category: NcCategory::Material,
            root_cause: "Supplier quality issue".to_string(),
        },
        NonConformance {
            id: "NC-2024-002".to_string(),
            title: "Process Documentation Missing".to_string(),
            description: "Work instruction not available at workstation".to_string(),
            severity: Severity::Minor,
            status: NcStatus::InProgress,
            reported_by: "Mike Davis".to_string(),
            assigned_to: "Lisa Wilson".to_string(),
            reported_date: day(2024, 1, 12),
            due_date: day(2024, 1, 25),
            category: NcCategory::Documentation,
            root_cause: "Document control process gap".to_string(),
        },
        NonConformance {
            id: "NC-2024-003".to_string(),
            title: "Calibration Overdue".to_string(),
            description: "Measuring equipment calibration expired".to_string(),
            severity: Severity::Major,
            status: NcStatus::Closed,
            reported_by: "Lisa Wilson".to_string(),
            assigned_to: "John Smith".to_string(),
            reported_date: day(2024, 1, 8),
            due_date: day(2024, 1, 20),
            category: NcCategory::Equipment,
            root_cause: "Calibration schedule not followed".to_string(),
        },
        NonConformance {
            id: "NC-2024-004".to_string(),
            title: "Training Record Incomplete".to_string(),
            description: "Employee training records not up to date".to_string(),
            severity: Severity::Minor,
            status: NcStatus::Open,
            reported_by: "Sarah Johnson".to_string(),
            assigned_to: "Mike Davis".to_string(),
            reported_date: day(2024, 1, 10),
            due_date: day(2024, 1, 28),
            category: NcCategory::Training,
            root_cause: "Training tracking system issue".to_string(),
        },
        NonConformance {
            id: "NC-2024-005".to_string(),
            title: "Product Dimension Out of Tolerance".to_string(),
            description: "Final inspection found dimensional non-conformance".to_string(),
            severity: Severity::Critical,
            status: NcStatus::InProgress,
            reported_by: "John Smith".to_string(),
            assigned_to: "Sarah Johnson".to_string(),
            reported_date: day(2024, 1, 18),
            due_date: day(2024, 1, 22),
            category: NcCategory::Product,
            root_cause: "Machine setup error".to_string(),
        },
    ]
}

fn task(id: u32, title: &str, due_date: NaiveDate, priority: Priority) -> UpcomingTask {
    UpcomingTask {
        id,
        title: title.to_string(),
        due_date,
        priority,
    }
}

pub fn tasks() -> Vec<UpcomingTask> {
    vec![
        task(1, "Quarterly Management Review", day(2024, 1, 15), Priority::High),
        task(2, "Supplier Audit - ABC Corp", day(2024, 1, 20), Priority::Medium),
        task(3, "Document Control Review", day(2024, 1, 25), Priority::Low),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn seeded_dates_fall_in_the_recorded_period() {
        let dates = documents()
            .iter()
            .map(|doc| doc.last_modified)
            .chain(audits().iter().map(|audit| audit.display_date()))
            .chain(training_sessions().iter().map(|session| session.scheduled_date))
            .chain(non_conformances().iter().flat_map(|nc| [nc.reported_date, nc.due_date]))
            .chain(tasks().iter().map(|task| task.due_date))
            .collect::<Vec<_>>();
        assert!(!dates.is_empty());
        for date in dates {
            assert!((2023..=2024).contains(&date.year()), "{date}");
        }
    }

    #[test]
    #[should_panic(expected = "valid seed date")]
    fn impossible_seed_date_is_rejected() {
        day(2024, 2, 30);
    }
}
