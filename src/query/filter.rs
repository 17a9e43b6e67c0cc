// src/query/filter.rs

//! Row predicates: global search, per-column matching, quantity and date range.
//!
//! `matches` is total. Malformed filter input is treated as "no constraint";
//! a record whose own date cannot be parsed only fails an active date bound.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::models::Record;
use crate::query::date::{parse_custom_date, parse_filter_date};
use crate::query::quantity::QuantityCondition;

/// Per-column filter keys, as typed into the column filter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Id,
    Items,
    Department,
    Quantity,
    StartDate,
    EndDate,
}

impl FilterKey {
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Id,
        FilterKey::Items,
        FilterKey::Department,
        FilterKey::Quantity,
        FilterKey::StartDate,
        FilterKey::EndDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Id => "id",
            FilterKey::Items => "items",
            FilterKey::Department => "department",
            FilterKey::Quantity => "quantity",
            FilterKey::StartDate => "start",
            FilterKey::EndDate => "end",
        }
    }
}

impl FromStr for FilterKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" | "bid" | "bid_number" => Ok(FilterKey::Id),
            "items" | "item" => Ok(FilterKey::Items),
            "department" | "dept" => Ok(FilterKey::Department),
            "quantity" | "qty" => Ok(FilterKey::Quantity),
            "start" | "start_date" => Ok(FilterKey::StartDate),
            "end" | "end_date" => Ok(FilterKey::EndDate),
            other => Err(AppError::validation(format!(
                "unknown filter '{}' (expected one of id, items, department, quantity, start, end)",
                other
            ))),
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active inclusion predicates. `None` means the key imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub global_search: Option<String>,
    pub id_contains: Option<String>,
    pub items_contains: Option<String>,
    pub department_contains: Option<String>,
    pub quantity_condition: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Blank input clears the key.
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FilterState {
    pub fn set_global_search(&mut self, value: Option<&str>) {
        self.global_search = normalize(value);
    }

    pub fn set(&mut self, key: FilterKey, value: Option<&str>) {
        let value = normalize(value);
        match key {
            FilterKey::Id => self.id_contains = value,
            FilterKey::Items => self.items_contains = value,
            FilterKey::Department => self.department_contains = value,
            FilterKey::Quantity => self.quantity_condition = value,
            FilterKey::StartDate => self.start_date = value,
            FilterKey::EndDate => self.end_date = value,
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Id => self.id_contains.as_deref(),
            FilterKey::Items => self.items_contains.as_deref(),
            FilterKey::Department => self.department_contains.as_deref(),
            FilterKey::Quantity => self.quantity_condition.as_deref(),
            FilterKey::StartDate => self.start_date.as_deref(),
            FilterKey::EndDate => self.end_date.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.global_search.is_none() && FilterKey::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Pre-parse the state into a reusable predicate.
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            global: self.global_search.as_deref().map(str::to_lowercase),
            id: self.id_contains.as_deref().map(str::to_lowercase),
            item_tokens: self
                .items_contains
                .as_deref()
                .map(|v| v.to_lowercase().split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            department: self.department_contains.as_deref().map(str::to_lowercase),
            quantity: self
                .quantity_condition
                .as_deref()
                .and_then(|c| ignore_malformed(QuantityCondition::parse(c))),
            start: self
                .start_date
                .as_deref()
                .and_then(|d| ignore_malformed(parse_filter_date(d))),
            end: self
                .end_date
                .as_deref()
                .and_then(|d| ignore_malformed(parse_filter_date(d))),
        }
    }
}

fn ignore_malformed<T>(parsed: crate::error::Result<T>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring filter input: {}", e);
            None
        }
    }
}

/// A `FilterState` with its string inputs parsed once.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    global: Option<String>,
    id: Option<String>,
    item_tokens: Vec<String>,
    department: Option<String>,
    quantity: Option<QuantityCondition>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

impl CompiledFilter {
    /// Whether `record` passes every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(needle) = &self.global {
            if !contains_ci(&record.joined(), needle) {
                return false;
            }
        }

        if let Some(needle) = &self.id {
            if !contains_ci(&record.id, needle) {
                return false;
            }
        }

        if !self.item_tokens.is_empty() {
            let items = record.items.to_lowercase();
            if !self.item_tokens.iter().any(|t| items.contains(t.as_str())) {
                return false;
            }
        }

        if let Some(needle) = &self.department {
            if !contains_ci(&record.department, needle) {
                return false;
            }
        }

        if let Some(cond) = &self.quantity {
            match record.quantity.as_count() {
                Some(q) if cond.accepts(q) => {}
                _ => return false,
            }
        }

        self.matches_dates(record)
    }

    fn matches_dates(&self, record: &Record) -> bool {
        if let Some(start) = self.start {
            match parse_custom_date(&record.start_date) {
                Ok(record_start) if record_start >= start => {}
                _ => return false,
            }
        }

        if let Some(end) = self.end {
            match parse_custom_date(&record.end_date) {
                Ok(record_end) if record_end <= end => {}
                _ => return false,
            }
        }

        true
    }
}

/// Whether `record` passes `filters`.
pub fn matches(record: &Record, filters: &FilterState) -> bool {
    filters.compile().matches(record)
}

/// Indices of matching records, in result-set order.
pub fn filter_indices(records: &[Record], filters: &FilterState) -> Vec<usize> {
    let compiled = filters.compile();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| compiled.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;

    fn record(id: &str, items: &str, quantity: i64, department: &str) -> Record {
        Record {
            id: id.to_string(),
            items: items.to_string(),
            quantity: Quantity::Count(quantity),
            department: department.to_string(),
            start_date: "22-04-2025 12:31 PM".to_string(),
            end_date: "02-05-2025 01:00 PM".to_string(),
            file_url: format!("https://example.com/{}", id),
        }
    }

    fn with_dates(mut r: Record, start: &str, end: &str) -> Record {
        r.start_date = start.to_string();
        r.end_date = end.to_string();
        r
    }

    fn sample() -> Vec<Record> {
        vec![
            record("GEM/2025/B/1", "Advanced AI system", 10, "Blockchain Unit"),
            record("GEM/2025/B/2", "Learning management system", 11, "Education"),
            record("GEM/2025/B/3", "Office chairs", 5, "Administration"),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let filters = FilterState::default();
        assert!(filters.is_empty());
        for r in sample() {
            assert!(matches(&r, &filters));
        }
        let mut broken = sample();
        broken[0].start_date = "garbage".into();
        assert_eq!(filter_indices(&broken, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn test_global_search_covers_all_fields() {
        let mut filters = FilterState::default();
        filters.set_global_search(Some("  blockchain "));
        assert_eq!(filter_indices(&sample(), &filters), vec![0]);

        filters.set_global_search(Some("example.com/gem/2025/b/3"));
        assert_eq!(filter_indices(&sample(), &filters), vec![2]);
    }

    #[test]
    fn test_global_search_is_not_tokenized() {
        let mut filters = FilterState::default();
        filters.set_global_search(Some("office system"));
        assert!(filter_indices(&sample(), &filters).is_empty());
    }

    #[test]
    fn test_id_filter_case_insensitive() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Id, Some("gem/2025/b/2"));
        assert_eq!(filter_indices(&sample(), &filters), vec![1]);
    }

    #[test]
    fn test_items_filter_is_token_or() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Items, Some("ai robotics"));
        // tokens match as substrings: "ai" is also inside "chairs"
        assert_eq!(filter_indices(&sample(), &filters), vec![0, 2]);

        filters.set(FilterKey::Items, Some("robotics"));
        assert!(filter_indices(&sample(), &filters).is_empty());

        filters.set(FilterKey::Items, Some("CHAIRS management"));
        assert_eq!(filter_indices(&sample(), &filters), vec![1, 2]);
    }

    #[test]
    fn test_department_substring() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Department, Some("admin"));
        assert_eq!(filter_indices(&sample(), &filters), vec![2]);
    }

    #[test]
    fn test_quantity_condition() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Quantity, Some(">10"));
        assert_eq!(filter_indices(&sample(), &filters), vec![1]);

        filters.set(FilterKey::Quantity, Some("=5"));
        assert_eq!(filter_indices(&sample(), &filters), vec![2]);

        filters.set(FilterKey::Quantity, Some("<11"));
        assert_eq!(filter_indices(&sample(), &filters), vec![0, 2]);
    }

    #[test]
    fn test_malformed_quantity_is_no_constraint() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Quantity, Some("about ten"));
        assert_eq!(filter_indices(&sample(), &filters), vec![0, 1, 2]);
    }

    #[test]
    fn test_non_numeric_quantity_fails_active_condition() {
        let mut r = record("B9", "Desk", 0, "Admin");
        r.quantity = Quantity::Text("Not Available".into());
        let mut filters = FilterState::default();
        assert!(matches(&r, &filters));
        filters.set(FilterKey::Quantity, Some(">0"));
        assert!(!matches(&r, &filters));
    }

    #[test]
    fn test_start_date_only() {
        let records = vec![
            with_dates(record("A", "x", 1, "d"), "10-04-2025 09:00 AM", "20-04-2025 09:00 AM"),
            with_dates(record("B", "x", 1, "d"), "25-04-2025 09:00 AM", "30-04-2025 09:00 AM"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterKey::StartDate, Some("2025-04-15"));
        assert_eq!(filter_indices(&records, &filters), vec![1]);
    }

    #[test]
    fn test_end_date_only() {
        let records = vec![
            with_dates(record("A", "x", 1, "d"), "10-04-2025 09:00 AM", "20-04-2025 09:00 AM"),
            with_dates(record("B", "x", 1, "d"), "25-04-2025 09:00 AM", "30-04-2025 09:00 AM"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterKey::EndDate, Some("2025-04-25"));
        assert_eq!(filter_indices(&records, &filters), vec![0]);
    }

    #[test]
    fn test_both_dates_window() {
        let records = vec![
            with_dates(record("A", "x", 1, "d"), "10-04-2025 09:00 AM", "20-04-2025 09:00 AM"),
            with_dates(record("B", "x", 1, "d"), "16-04-2025 09:00 AM", "24-04-2025 11:59 PM"),
            with_dates(record("C", "x", 1, "d"), "16-04-2025 09:00 AM", "30-04-2025 09:00 AM"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterKey::StartDate, Some("2025-04-15"));
        filters.set(FilterKey::EndDate, Some("2025-04-25"));
        assert_eq!(filter_indices(&records, &filters), vec![1]);
    }

    #[test]
    fn test_unparseable_record_date_only_fails_active_bound() {
        let records = vec![
            with_dates(record("A", "x", 1, "d"), "Not Available", "Not Available"),
            with_dates(record("B", "x", 1, "d"), "25-04-2025 09:00 AM", "30-04-2025 09:00 AM"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterKey::Department, Some("d"));
        assert_eq!(filter_indices(&records, &filters), vec![0, 1]);

        filters.set(FilterKey::StartDate, Some("2025-01-01"));
        assert_eq!(filter_indices(&records, &filters), vec![1]);
    }

    #[test]
    fn test_unparseable_bound_is_ignored() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::StartDate, Some("someday"));
        assert_eq!(filter_indices(&sample(), &filters), vec![0, 1, 2]);
    }

    #[test]
    fn test_blank_value_clears_key() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Items, Some("ai"));
        filters.set(FilterKey::Items, Some("   "));
        assert!(filters.is_empty());
        filters.set(FilterKey::Id, Some("B"));
        filters.set(FilterKey::Id, None);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_predicates_are_and_combined() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Items, Some("system"));
        filters.set(FilterKey::Quantity, Some(">10"));
        assert_eq!(filter_indices(&sample(), &filters), vec![1]);
    }

    #[test]
    fn test_filter_key_parse() {
        assert_eq!("Dept".parse::<FilterKey>().unwrap(), FilterKey::Department);
        assert_eq!("qty".parse::<FilterKey>().unwrap(), FilterKey::Quantity);
        assert!("price".parse::<FilterKey>().is_err());
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>().unwrap(), key);
        }
    }
}
