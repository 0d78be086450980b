use chrono::NaiveDate;
use qms_core::{
    is_overdue, AuditSummary, Catalog, CatalogError, Choice, Domain, Filter, NcStatus, Query,
    RecordStore, ScheduleStatus, Settings,
};
use std::io::Write;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn titles<'a, R>(records: &[&'a R], title: impl Fn(&'a R) -> &'a str) -> Vec<&'a str> {
    records.iter().map(|record| title(record)).collect()
}

#[test]
fn quality_search_finds_only_the_manual() {
    let catalog = Catalog::seeded();
    let found = catalog.documents.query(&Query::new(Some("quality"), Some("all")));
    assert_eq!(titles(&found, |doc| doc.title.as_str()), vec!["Quality Manual"]);
}

#[test]
fn empty_query_is_identity_for_every_store() {
    let catalog = Catalog::seeded();
    let query = Query::new(Some(""), Some("all"));

    let docs = catalog.documents.query(&query);
    assert_eq!(docs.len(), catalog.documents.len());
    assert!(docs
        .iter()
        .zip(catalog.documents.iter())
        .all(|(a, b)| std::ptr::eq(*a, b)));

    assert_eq!(catalog.audits.query(&query).len(), catalog.audits.len());
    assert_eq!(catalog.training.query(&query).len(), catalog.training.len());
    assert_eq!(
        catalog.non_conformances.query(&Query::all()).len(),
        catalog.non_conformances.len()
    );
}

#[test]
fn search_inclusion_matches_title_substring() {
    let catalog = Catalog::seeded();
    for needle in ["audit", "AUDIT", "process", "xyz", "-", "zzz"] {
        let found = catalog.audits.query(&Query::new(Some(needle), None));
        let expected: Vec<_> = catalog
            .audits
            .iter()
            .filter(|audit| audit.title.to_lowercase().contains(&needle.to_lowercase()))
            .collect();
        assert_eq!(found, expected, "needle {needle:?}");
    }
}

#[test]
fn non_conformance_search_covers_identifier() {
    let catalog = Catalog::seeded();
    let found = catalog.non_conformances.query(&Query::new(Some("nc-2024-004"), None));
    assert_eq!(titles(&found, |nc| nc.title.as_str()), vec!["Training Record Incomplete"]);

    let by_title = catalog.non_conformances.query(&Query::new(Some("calibration"), None));
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, "NC-2024-003");
}

#[test]
fn status_filter_selects_exact_values() {
    let catalog = Catalog::seeded();
    let query = Query::all().with_filter(Filter::only(ScheduleStatus::Scheduled));
    let scheduled = catalog.training.query(&query);
    assert_eq!(
        titles(&scheduled, |s| s.title.as_str()),
        vec!["Internal Auditor Training", "Corrective Action Process"]
    );

    let none = catalog.training.query(&Query::new(None, Some("postponed")));
    assert!(none.is_empty());
}

#[test]
fn per_status_counts_agree_with_records() {
    let catalog = Catalog::seeded();
    let tally = catalog.non_conformances.tally();
    for status in NcStatus::ALL {
        let expected = catalog
            .non_conformances
            .iter()
            .filter(|nc| nc.status == *status)
            .count();
        assert_eq!(tally.count(*status), expected);
    }
    assert_eq!(tally.total(), catalog.non_conformances.len());
}

#[test]
fn audit_aggregate_matches_literal_list() {
    let catalog = Catalog::seeded();
    let summary = AuditSummary::from_store(&catalog.audits);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.scheduled, 2);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.total_non_conformances, 1);
}

#[test]
fn overdue_scenario_from_single_record_store() {
    let snapshot = r#"{
        "nonConformances": [{
            "id": "NC-1",
            "title": "Late report",
            "severity": "minor",
            "status": "open",
            "reportedBy": "John Smith",
            "assignedTo": "Mike Davis",
            "reportedDate": "2024-01-10",
            "dueDate": "2024-01-20",
            "category": "product"
        }]
    }"#;
    let catalog = Catalog::from_json(snapshot).expect("parse snapshot");
    let nc = catalog.non_conformances.find("NC-1").expect("record");
    assert!(nc.is_overdue(day(2024, 1, 25)));
    assert!(!is_overdue(nc.due_date, NcStatus::Closed, day(2024, 1, 25)));
}

#[test]
fn snapshot_file_round_trips_through_settings() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let snapshot = Catalog::seeded().snapshot();
    let payload = serde_json::to_string_pretty(&snapshot).expect("serialize");
    file.write_all(payload.as_bytes()).expect("write snapshot");

    let settings = Settings::default()
        .with_overrides(Some(file.path().to_path_buf()), Some("2024-01-25"), false)
        .expect("settings");
    let catalog = Catalog::load(&settings).expect("load snapshot");
    assert_eq!(catalog.len_of(Domain::Audits), 5);
    assert_eq!(catalog.documents.records(), Catalog::seeded().documents.records());
}

#[test]
fn missing_snapshot_file_reports_path() {
    let settings = Settings {
        data_path: Some("/nonexistent/qms-snapshot.json".into()),
        ..Settings::default()
    };
    let err = Catalog::load(&settings).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/qms-snapshot.json"));
}

#[test]
fn empty_store_yields_zero_counts() {
    let store = RecordStore::new(&qms_core::schemas::AUDITS, Vec::new());
    assert_eq!(AuditSummary::from_store(&store), AuditSummary::default());
    assert!(store.query(&Query::new(Some("anything"), None)).is_empty());
}
