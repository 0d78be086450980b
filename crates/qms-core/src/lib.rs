//! Record collections behind the quality-management dashboard: documents,
//! audits, training sessions and non-conformance reports, plus the dated
//! follow-up tasks listed on the overview.
//!
//! Each domain is a [`RecordStore`] configured by a static [`Schema`] that
//! names its searchable text, its filter field and its status field. The
//! same query and aggregate code then serves all four screens.

pub mod aggregate;
pub mod catalog;
pub mod overdue;
pub mod overview;
pub mod query;
pub mod records;
pub mod schemas;
pub mod seed;
pub mod settings;
pub mod store;

pub use aggregate::{
    AuditSummary, DocumentSummary, NonConformanceSummary, StatusCount, StatusTally,
    TrainingSummary,
};
pub use catalog::{Catalog, CatalogError, Snapshot};
pub use overdue::is_overdue;
pub use overview::{
    Activity, Overview, OverviewTiles, UpcomingSession, DEFAULT_ACTIVITY_LIMIT,
    DEFAULT_RECENT_LIMIT,
};
pub use query::{Facet, Filter, FilterOption, Query, Schema, ALL_FILTER};
pub use records::{
    Audit, AuditType, Choice, Document, DocumentCategory, DocumentStatus, Domain, NcCategory,
    NcStatus, NonConformance, Priority, ScheduleStatus, Severity, TrainingSession, UpcomingTask,
};
pub use settings::{Settings, SettingsError};
pub use store::RecordStore;
