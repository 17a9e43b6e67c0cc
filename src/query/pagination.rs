// src/query/pagination.rs

//! Page slicing and the sliding window of page links.
//!
//! Window position and current page are tracked separately: Prev/Next move
//! the window, selecting a number moves the page.

use std::ops::{Range, RangeInclusive};

use crate::models::ViewConfig;

/// Number of pages needed for `len` rows.
pub fn total_pages(len: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    len.div_ceil(rows_per_page)
}

/// Slice range of a 1-based page; empty when the page is out of range.
pub fn page_bounds(len: usize, page: usize, rows_per_page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(rows_per_page)
        .min(len);
    let end = start.saturating_add(rows_per_page).min(len);
    start..end
}

/// Pagination state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub rows_per_page: usize,
    pub current_page: usize,
    pub window_start: usize,
    pub window_size: usize,
    pub nav_threshold: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl PageState {
    pub fn from_config(view: &ViewConfig) -> Self {
        Self {
            rows_per_page: view.rows_per_page.max(1),
            current_page: 1,
            window_start: 1,
            window_size: view.window_size.max(1),
            nav_threshold: view.nav_threshold,
        }
    }

    /// Clamp page and window into `[1, max(1, total_pages)]`.
    pub fn clamp(&mut self, total_pages: usize) {
        let last = total_pages.max(1);
        self.current_page = self.current_page.clamp(1, last);
        self.window_start = self.window_start.clamp(1, last);
    }

    /// Jump to a page without moving the window.
    pub fn select_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Move the window back by one window size. No-op while Prev is hidden.
    pub fn prev_window(&mut self, total_pages: usize) {
        if !self.window(total_pages).show_prev {
            return;
        }
        self.window_start = self.window_start.saturating_sub(self.window_size).max(1);
    }

    /// Move the window forward, never past the last full window. No-op while
    /// Next is hidden.
    pub fn next_window(&mut self, total_pages: usize) {
        if !self.window(total_pages).show_next {
            return;
        }
        let last_start = total_pages
            .saturating_sub(self.window_size)
            .saturating_add(1)
            .max(1);
        self.window_start = self
            .window_start
            .saturating_add(self.window_size)
            .min(last_start);
    }

    /// Back to page 1 with the window at the start.
    pub fn reset_position(&mut self) {
        self.current_page = 1;
        self.window_start = 1;
    }

    pub fn window(&self, total_pages: usize) -> PageWindow {
        PageWindow::new(
            self.window_start,
            self.window_size,
            total_pages,
            self.nav_threshold,
        )
    }
}

/// The page links exposed by the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub total_pages: usize,
    pub show_prev: bool,
    pub show_next: bool,
}

impl PageWindow {
    pub fn new(start: usize, size: usize, total_pages: usize, nav_threshold: usize) -> Self {
        let start = start.max(1);
        let end = start
            .saturating_add(size.max(1))
            .saturating_sub(1)
            .min(total_pages);
        let paged = total_pages > nav_threshold;
        Self {
            start,
            end,
            total_pages,
            show_prev: paged && start > 1,
            show_next: paged && end < total_pages,
        }
    }

    /// Page numbers shown as direct links; empty when there are no pages.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(window_start: usize) -> PageState {
        PageState {
            window_start,
            ..PageState::default()
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 100), 1);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(25, 1, 10), 0..10);
        assert_eq!(page_bounds(25, 3, 10), 20..25);
        assert_eq!(page_bounds(25, 3, 10).len(), 5);
        assert!(page_bounds(25, 4, 10).is_empty());
        assert!(page_bounds(0, 1, 10).is_empty());
    }

    #[test]
    fn test_window_first_of_many() {
        let window = state(1).window(25);
        assert_eq!(window.pages(), 1..=10);
        assert!(!window.show_prev);
        assert!(window.show_next);
    }

    #[test]
    fn test_next_then_prev() {
        let mut s = state(1);
        s.next_window(25);
        assert_eq!(s.window_start, 11);
        let window = s.window(25);
        assert_eq!(window.pages(), 11..=20);
        assert!(window.show_prev);
        assert!(window.show_next);

        s.prev_window(25);
        assert_eq!(s.window_start, 1);
        s.prev_window(25);
        assert_eq!(s.window_start, 1);
    }

    #[test]
    fn test_hidden_controls_do_not_move_window() {
        let mut s = state(1);
        s.next_window(15);
        assert_eq!(s.window_start, 1);

        let mut s = state(6);
        s.prev_window(15);
        assert_eq!(s.window_start, 6);
    }

    #[test]
    fn test_next_is_clamped_to_last_window() {
        let mut s = state(11);
        s.next_window(25);
        assert_eq!(s.window_start, 16);
        let window = s.window(25);
        assert_eq!(window.pages(), 16..=25);
        assert!(!window.show_next);

        s.next_window(25);
        assert_eq!(s.window_start, 16);
    }

    #[test]
    fn test_no_nav_at_or_below_threshold() {
        let window = state(1).window(20);
        assert_eq!(window.pages(), 1..=10);
        assert!(!window.show_prev);
        assert!(!window.show_next);
    }

    #[test]
    fn test_window_with_no_pages() {
        let window = state(1).window(0);
        assert!(window.is_empty());
        assert_eq!(window.pages().count(), 0);
    }

    #[test]
    fn test_clamp_after_total_shrinks() {
        let mut s = state(21);
        s.current_page = 25;
        s.clamp(5);
        assert_eq!(s.current_page, 5);
        assert_eq!(s.window_start, 5);

        s.clamp(0);
        assert_eq!(s.current_page, 1);
        assert_eq!(s.window_start, 1);
    }

    #[test]
    fn test_select_page_keeps_window() {
        let mut s = state(11);
        s.select_page(3, 25);
        assert_eq!(s.current_page, 3);
        assert_eq!(s.window_start, 11);
        s.select_page(99, 25);
        assert_eq!(s.current_page, 25);
    }
}
