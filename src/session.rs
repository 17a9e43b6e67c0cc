// src/session.rs

//! Session state: the fetched result set plus the filters and paging applied to it.
//!
//! Every mutator re-runs the filter and clamps paging before returning, so a
//! `view()` taken at any point is consistent.

use crate::error::{AppError, Result};
use crate::models::{Record, ViewConfig};
use crate::query::{
    FilterKey, FilterState, PageState, PageWindow, filter_indices, page_bounds, total_pages,
};

/// One rendered page of the filtered result set.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Record>,
    /// 0-based position of the first row within the filtered set
    pub offset: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub window: PageWindow,
}

/// Owner of the result set and its query state.
#[derive(Debug, Clone)]
pub struct Session {
    view_config: ViewConfig,
    records: Vec<Record>,
    filters: FilterState,
    page: PageState,
    filtered: Vec<usize>,
}

impl Session {
    pub fn new(view_config: ViewConfig) -> Self {
        let page = PageState::from_config(&view_config);
        Self {
            view_config,
            records: Vec::new(),
            filters: FilterState::default(),
            page,
            filtered: Vec::new(),
        }
    }

    /// Drop the current table before a new fetch attempt.
    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    /// Replace the result set and reset filters and paging to defaults.
    pub fn load(&mut self, records: Vec<Record>) {
        log::debug!("Loading {} records into session", records.len());
        self.records = records;
        self.filters = FilterState::default();
        self.page = PageState::from_config(&self.view_config);
        self.refresh();
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn rows_per_page_options(&self) -> &[usize] {
        &self.view_config.rows_per_page_options
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page.rows_per_page)
    }

    /// Filtered records in result-set order, ignoring pagination.
    pub fn filtered_records(&self) -> Vec<&Record> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    /// Set the free-text search; returns to page 1 and the first window.
    pub fn set_global_search(&mut self, value: Option<&str>) {
        self.filters.set_global_search(value);
        self.page.reset_position();
        self.refresh();
    }

    /// Set a column filter; the current page is kept when still in range.
    pub fn set_filter(&mut self, key: FilterKey, value: Option<&str>) {
        self.filters.set(key, value);
        self.refresh();
    }

    /// Clear every filter, including the global search.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.page.reset_position();
        self.refresh();
    }

    /// Change the page size; must be one of the configured options.
    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<()> {
        if !self.view_config.rows_per_page_options.contains(&rows) {
            return Err(AppError::validation(format!(
                "rows per page must be one of {:?}, got {}",
                self.view_config.rows_per_page_options, rows
            )));
        }
        self.page.rows_per_page = rows;
        self.clamp();
        Ok(())
    }

    pub fn select_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.page.select_page(page, total);
    }

    pub fn prev_window(&mut self) {
        let total = self.total_pages();
        self.page.prev_window(total);
    }

    pub fn next_window(&mut self) {
        let total = self.total_pages();
        self.page.next_window(total);
    }

    /// The current page of the filtered set.
    pub fn view(&self) -> PageView<'_> {
        let total = self.total_pages();
        let bounds = page_bounds(
            self.filtered.len(),
            self.page.current_page,
            self.page.rows_per_page,
        );
        PageView {
            offset: bounds.start,
            rows: self.filtered[bounds].iter().map(|&i| &self.records[i]).collect(),
            current_page: self.page.current_page,
            total_pages: total,
            filtered_count: self.filtered.len(),
            total_count: self.records.len(),
            window: self.page.window(total),
        }
    }

    /// Re-run the filter, then clamp paging to the new page count.
    fn refresh(&mut self) {
        self.filtered = filter_indices(&self.records, &self.filters);
        self.clamp();
    }

    fn clamp(&mut self) {
        let total = self.total_pages();
        self.page.clamp(total);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record {
                id: format!("GEM/2025/B/{}", i),
                items: if i % 2 == 0 { "Blockchain node" } else { "Office chairs" }.to_string(),
                quantity: Quantity::Count(i as i64),
                department: "Ministry".to_string(),
                start_date: "22-04-2025 12:31 PM".to_string(),
                end_date: "02-05-2025 01:00 PM".to_string(),
                file_url: format!("https://example.com/{}.pdf", i),
            })
            .collect()
    }

    fn loaded(n: usize) -> Session {
        let mut session = Session::default();
        session.load(records(n));
        session
    }

    #[test]
    fn test_empty_session_has_no_pages() {
        let session = Session::default();
        let view = session.view();
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.rows.is_empty());
        assert!(view.window.is_empty());
    }

    #[test]
    fn test_pages_of_twenty_five() {
        let mut session = loaded(25);
        assert_eq!(session.total_pages(), 3);
        session.select_page(3);
        let view = session.view();
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.offset, 20);
        assert_eq!(view.rows[0].id, "GEM/2025/B/21");
    }

    #[test]
    fn test_select_page_past_end_clamps() {
        let mut session = loaded(25);
        session.select_page(4);
        assert_eq!(session.view().current_page, 3);
        session.select_page(0);
        assert_eq!(session.view().current_page, 1);
    }

    #[test]
    fn test_rows_per_page_clamps_current_page() {
        let mut session = loaded(95);
        session.select_page(10);
        session.set_rows_per_page(50).unwrap();
        let view = session.view();
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 2);
        assert_eq!(view.rows.len(), 45);
    }

    #[test]
    fn test_rows_per_page_must_be_an_option() {
        let mut session = loaded(5);
        assert!(matches!(
            session.set_rows_per_page(7),
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.page_state().rows_per_page, 10);
    }

    #[test]
    fn test_rows_per_page_pulls_window_back_in_range() {
        let mut session = loaded(250);
        session.next_window();
        session.next_window();
        assert_eq!(session.page_state().window_start, 16);
        session.set_rows_per_page(100).unwrap();
        assert_eq!(session.page_state().window_start, 3);
        assert_eq!(session.view().window.pages(), 3..=3);
    }

    #[test]
    fn test_global_search_resets_position() {
        let mut session = loaded(250);
        session.next_window();
        session.select_page(12);
        session.set_global_search(Some("blockchain"));
        let view = session.view();
        assert_eq!(view.current_page, 1);
        assert_eq!(view.window.start, 1);
        assert_eq!(view.filtered_count, 125);
        assert_eq!(view.total_count, 250);
    }

    #[test]
    fn test_column_filter_keeps_page_when_in_range() {
        let mut session = loaded(100);
        session.select_page(3);
        session.set_filter(FilterKey::Items, Some("blockchain"));
        assert_eq!(session.view().current_page, 3);

        session.set_filter(FilterKey::Quantity, Some(">90"));
        let view = session.view();
        assert_eq!(view.filtered_count, 5);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn test_windowing_through_session() {
        let mut session = loaded(250);
        let window = session.view().window;
        assert_eq!(window.total_pages, 25);
        assert_eq!(window.pages(), 1..=10);
        assert!(window.show_next);
        assert!(!window.show_prev);

        session.next_window();
        let window = session.view().window;
        assert_eq!(window.pages(), 11..=20);
        assert!(window.show_prev && window.show_next);
        assert_eq!(session.view().current_page, 1);
    }

    #[test]
    fn test_window_stays_put_without_nav_controls() {
        let mut session = loaded(150);
        let window = session.view().window;
        assert_eq!(window.total_pages, 15);
        assert!(!window.show_next);

        session.next_window();
        assert_eq!(session.page_state().window_start, 1);
        assert_eq!(session.view().window.pages(), 1..=10);

        session.prev_window();
        assert_eq!(session.page_state().window_start, 1);
    }

    #[test]
    fn test_load_resets_filters_and_paging() {
        let mut session = loaded(250);
        session.set_filter(FilterKey::Department, Some("ministry"));
        session.set_rows_per_page(25).unwrap();
        session.select_page(4);
        session.load(records(30));
        assert!(session.filters().is_empty());
        assert_eq!(session.page_state().rows_per_page, 10);
        assert_eq!(session.view().current_page, 1);
        assert_eq!(session.total_pages(), 3);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut session = loaded(30);
        session.clear();
        assert!(session.is_empty());
        assert!(session.view().rows.is_empty());
    }

    #[test]
    fn test_filtered_records_ignore_paging() {
        let mut session = loaded(30);
        session.set_filter(FilterKey::Items, Some("chairs"));
        assert_eq!(session.filtered_records().len(), 15);
        assert_eq!(session.view().rows.len(), 10);
    }
}
