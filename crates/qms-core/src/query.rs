use crate::records::{Choice, Domain};
use serde::Serialize;

/// Filter value that places no constraint on the categorical field.
pub const ALL_FILTER: &str = "all";

pub type TextField<R> = fn(&R) -> &str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn options_of<C: Choice>() -> Vec<FilterOption> {
    C::ALL
        .iter()
        .map(|choice| FilterOption {
            value: choice.as_str(),
            label: choice.label(),
        })
        .collect()
}

/// One closed-set field of a record, described by an accessor.
pub struct Facet<R> {
    pub field: &'static str,
    pub all_label: &'static str,
    pub key: fn(&R) -> &'static str,
    pub options: fn() -> Vec<FilterOption>,
}

impl<R> Facet<R> {
    pub fn values(&self) -> Vec<&'static str> {
        (self.options)().into_iter().map(|opt| opt.value).collect()
    }

    /// Selector entries: the `all` sentinel followed by every declared value.
    pub fn selector(&self) -> Vec<FilterOption> {
        let mut options = vec![FilterOption {
            value: ALL_FILTER,
            label: self.all_label,
        }];
        options.extend((self.options)());
        options
    }
}

/// Field-accessor configuration that turns a record type into a queryable
/// collection: which text is searchable, which field the selector filters on
/// and which field carries the lifecycle status.
pub struct Schema<R: 'static> {
    pub domain: Domain,
    pub identifier: fn(&R) -> String,
    pub search_fields: &'static [TextField<R>],
    pub filter: Facet<R>,
    pub status: Facet<R>,
}

impl<R: 'static> Schema<R> {
    pub fn matches(&self, record: &R, query: &Query) -> bool {
        query.filter.admits((self.filter.key)(record)) && self.text_matches(record, &query.needle)
    }

    /// Indices of the matching records, ascending.
    pub fn positions(&self, records: &[R], query: &Query) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record, query))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Stable filter: result keeps the input order.
    pub fn select<'a>(&self, records: &'a [R], query: &Query) -> Vec<&'a R> {
        self.positions(records, query)
            .into_iter()
            .filter_map(|idx| records.get(idx))
            .collect()
    }

    fn text_matches(&self, record: &R, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.search_fields
            .iter()
            .any(|field| field(record).to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    /// Only an absent value or the literal `all` lifts the constraint; any
    /// other text is kept verbatim and compared byte-for-byte.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some(ALL_FILTER) => Filter::All,
            Some(value) => Filter::Only(value.to_string()),
        }
    }

    pub fn only<C: Choice>(choice: C) -> Self {
        Filter::Only(choice.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL_FILTER,
            Filter::Only(value) => value,
        }
    }

    /// Exact match; a value outside the field's closed set admits nothing.
    pub fn admits(&self, key: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(value) => value == key,
        }
    }
}

/// Free-text search plus one categorical filter, as supplied by a screen on
/// every re-query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    search: String,
    needle: String,
    filter: Filter,
}

impl Query {
    pub fn new(search: Option<&str>, filter: Option<&str>) -> Self {
        Self::default()
            .with_search(search.unwrap_or_default())
            .with_filter(Filter::parse(filter))
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self.needle = search.to_lowercase();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}
