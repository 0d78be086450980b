use crate::aggregate::{self, StatusTally};
use crate::query::{FilterOption, Query, Schema};
use crate::records::Domain;
use std::fmt;

/// Ordered, fixed-at-load collection of one domain's records.
///
/// There is no way to mutate a store after construction; every query and
/// aggregate reads the same immutable sequence.
pub struct RecordStore<R: 'static> {
    schema: &'static Schema<R>,
    records: Vec<R>,
}

impl<R: 'static> RecordStore<R> {
    pub fn new(schema: &'static Schema<R>, records: Vec<R>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &'static Schema<R> {
        self.schema
    }

    pub fn domain(&self) -> Domain {
        self.schema.domain
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        let id = id.trim();
        self.records
            .iter()
            .find(|&record| (self.schema.identifier)(record).eq_ignore_ascii_case(id))
    }

    pub fn query(&self, query: &Query) -> Vec<&R> {
        self.positions(query)
            .into_iter()
            .filter_map(|idx| self.records.get(idx))
            .collect()
    }

    /// Indices of the matching records, in store order.
    pub fn positions(&self, query: &Query) -> Vec<usize> {
        let positions = self.schema.positions(&self.records, query);
        tracing::debug!(
            domain = %self.schema.domain,
            search = query.search(),
            filter = query.filter().as_str(),
            matched = positions.len(),
            total = self.records.len(),
            "store query"
        );
        positions
    }

    pub fn filter_options(&self) -> Vec<FilterOption> {
        self.schema.filter.selector()
    }

    pub fn tally(&self) -> StatusTally {
        StatusTally::from_records(&self.schema.status, &self.records)
    }

    pub fn sum_by(&self, metric: impl Fn(&R) -> u64) -> u64 {
        aggregate::sum_by(&self.records, metric)
    }

    pub fn count_where(&self, predicate: impl Fn(&R) -> bool) -> usize {
        self.records.iter().filter(|&record| predicate(record)).count()
    }
}

impl<R: Clone + 'static> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            records: self.records.clone(),
        }
    }
}

impl<R: fmt::Debug + 'static> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("domain", &self.schema.domain)
            .field("records", &self.records)
            .finish()
    }
}

impl<'a, R: 'static> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas;
    use crate::seed;

    #[test]
    fn find_matches_identifier_case_insensitively() {
        let store = RecordStore::new(&schemas::NON_CONFORMANCES, seed::non_conformances());
        let found = store.find("nc-2024-003").expect("find report");
        assert_eq!(found.title, "Calibration Overdue");
        assert!(store.find("NC-2024-999").is_none());
    }

    #[test]
    fn numeric_identifiers_are_found_by_text() {
        let store = RecordStore::new(&schemas::DOCUMENTS, seed::documents());
        assert_eq!(
            store.find("4").map(|doc| doc.title.as_str()),
            Some("Internal Audit Checklist")
        );
    }

    #[test]
    fn filter_options_follow_the_schema() {
        let store = RecordStore::new(&schemas::DOCUMENTS, seed::documents());
        let values: Vec<_> = store.filter_options().iter().map(|opt| opt.value).collect();
        assert_eq!(values, vec!["all", "policy", "procedure", "form", "checklist"]);
    }

    #[test]
    fn positions_index_into_records() {
        let store = RecordStore::new(&schemas::AUDITS, seed::audits());
        let positions = store.positions(&Query::new(None, Some("scheduled")));
        assert_eq!(positions, vec![1, 4]);
        assert_eq!(store.records()[positions[1]].title, "Customer Audit - XYZ Corp");
    }

    #[test]
    fn count_where_matches_manual_filter() {
        let store = RecordStore::new(&schemas::TRAINING, seed::training_sessions());
        let full = store.count_where(|session| session.completion_rate == 100);
        assert_eq!(full, 1);
    }
}
