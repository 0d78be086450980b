use crate::overdue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed-set field value: a status, category, type or severity.
///
/// `as_str` is the wire value used for filtering and JSON, `label` is the
/// human-facing text shown in selectors and tiles.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal {
            $($variant:ident => ($value:literal, $label:literal $(, $alias:literal)*)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let normalized = input.trim().to_lowercase();
                match normalized.as_str() {
                    $($value $(| $alias)* => Ok($name::$variant),)+
                    other => Err(format!("Unknown {}: {other}", $kind)),
                }
            }
        }
    };
}

choice_enum! {
    /// The four record collections behind the dashboard screens.
    pub enum Domain: "domain" {
        Documents => ("documents", "Document Control", "document", "docs"),
        Audits => ("audits", "Audit Management", "audit"),
        Training => ("training", "Training Management", "trainings", "sessions"),
        NonConformance => ("non-conformance", "Non-Conformance", "non-conformances", "nc", "ncr"),
    }
}

choice_enum! {
    pub enum DocumentStatus: "document status" {
        Active => ("active", "Active"),
        Draft => ("draft", "Draft"),
        Review => ("review", "Review"),
    }
}

choice_enum! {
    pub enum DocumentCategory: "document category" {
        Policy => ("policy", "Policies"),
        Procedure => ("procedure", "Procedures"),
        Form => ("form", "Forms"),
        Checklist => ("checklist", "Checklists"),
    }
}

choice_enum! {
    /// Lifecycle shared by audits and training sessions.
    pub enum ScheduleStatus: "status" {
        Scheduled => ("scheduled", "Scheduled"),
        InProgress => ("in-progress", "In Progress", "in_progress", "inprogress"),
        Completed => ("completed", "Completed"),
    }
}

choice_enum! {
    pub enum AuditType: "audit type" {
        Internal => ("internal", "Internal"),
        Supplier => ("supplier", "Supplier"),
        Management => ("management", "Management"),
        Process => ("process", "Process"),
        Customer => ("customer", "Customer"),
    }
}

choice_enum! {
    pub enum NcStatus: "non-conformance status" {
        Open => ("open", "Open"),
        InProgress => ("in-progress", "In Progress", "in_progress", "inprogress"),
        Closed => ("closed", "Closed"),
    }
}

choice_enum! {
    pub enum Severity: "severity" {
        Critical => ("critical", "Critical"),
        Major => ("major", "Major"),
        Minor => ("minor", "Minor"),
    }
}

choice_enum! {
    pub enum NcCategory: "non-conformance category" {
        Material => ("material", "Material"),
        Documentation => ("documentation", "Documentation"),
        Equipment => ("equipment", "Equipment"),
        Training => ("training", "Training"),
        Product => ("product", "Product"),
    }
}

choice_enum! {
    pub enum Priority: "priority" {
        High => ("high", "High"),
        Medium => ("medium", "Medium"),
        Low => ("low", "Low"),
    }
}

impl NcStatus {
    /// Closed is the only terminal state; it never counts as overdue.
    pub fn is_terminal(self) -> bool {
        matches!(self, NcStatus::Closed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub version: String,
    pub category: DocumentCategory,
    pub last_modified: NaiveDate,
    pub modified_by: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub audit_type: AuditType,
    pub status: ScheduleStatus,
    pub auditor: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub findings: u32,
    #[serde(default)]
    pub non_conformances: u32,
}

impl Audit {
    /// Completion date when the audit has one, otherwise the planned date.
    pub fn display_date(&self) -> NaiveDate {
        self.completed_date.unwrap_or(self.scheduled_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: u32,
    pub title: String,
    pub instructor: String,
    pub status: ScheduleStatus,
    pub scheduled_date: NaiveDate,
    pub duration_hours: u32,
    #[serde(default)]
    pub attendees: u32,
    pub max_attendees: u32,
    #[serde(default)]
    pub completion_rate: u8,
}

impl TrainingSession {
    pub fn spots_available(&self) -> u32 {
        self.max_attendees.saturating_sub(self.attendees)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NonConformance {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    pub status: NcStatus,
    pub reported_by: String,
    pub assigned_to: String,
    pub reported_date: NaiveDate,
    pub due_date: NaiveDate,
    pub category: NcCategory,
    #[serde(default)]
    pub root_cause: String,
}

impl NonConformance {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        overdue::is_overdue(self.due_date, self.status, today)
    }
}

/// A dated follow-up shown on the overview, such as a management review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingTask {
    pub id: u32,
    pub title: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_and_rejects_unknown_values() {
        assert_eq!(
            "In_Progress".parse::<ScheduleStatus>(),
            Ok(ScheduleStatus::InProgress)
        );
        assert_eq!("nc".parse::<Domain>(), Ok(Domain::NonConformance));
        let err = "archived".parse::<DocumentStatus>().unwrap_err();
        assert_eq!(err, "Unknown document status: archived");
    }

    #[test]
    fn wire_values_match_serde_names() {
        for status in NcStatus::ALL {
            let encoded = serde_json::to_string(status).expect("encode");
            assert_eq!(encoded, format!("\"{}\"", status.as_str()));
        }
        for kind in AuditType::ALL {
            let encoded = serde_json::to_string(kind).expect("encode");
            assert_eq!(encoded, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn audit_display_date_prefers_completion() {
        let audit = Audit {
            id: 4,
            title: "Process Audit - Production Line A".to_string(),
            audit_type: AuditType::Process,
            status: ScheduleStatus::Completed,
            auditor: "Lisa Wilson".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("date"),
            completed_date: NaiveDate::from_ymd_opt(2024, 1, 12),
            findings: 3,
            non_conformances: 1,
        };
        assert_eq!(
            audit.display_date(),
            NaiveDate::from_ymd_opt(2024, 1, 12).expect("date")
        );

        let pending = Audit {
            completed_date: None,
            ..audit
        };
        assert_eq!(pending.display_date(), pending.scheduled_date);
    }

    #[test]
    fn spots_available_never_underflows() {
        let session = TrainingSession {
            id: 9,
            title: "Overbooked".to_string(),
            instructor: "Mike Davis".to_string(),
            status: ScheduleStatus::Scheduled,
            scheduled_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            duration_hours: 2,
            attendees: 12,
            max_attendees: 10,
            completion_rate: 0,
        };
        assert_eq!(session.spots_available(), 0);
    }

    #[test]
    fn audit_deserializes_from_screen_literal() {
        let raw = r#"{
            "id": 2,
            "title": "Supplier Audit - ABC Manufacturing",
            "type": "supplier",
            "status": "scheduled",
            "auditor": "Sarah Johnson",
            "scheduledDate": "2024-01-25",
            "completedDate": null,
            "findings": 0,
            "nonConformances": 0
        }"#;
        let audit: Audit = serde_json::from_str(raw).expect("decode audit");
        assert_eq!(audit.audit_type, AuditType::Supplier);
        assert_eq!(audit.completed_date, None);
    }
}
