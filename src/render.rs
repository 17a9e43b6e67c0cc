// src/render.rs

//! Plain-text rendering of a page and its pagination control.

use std::fmt::Write;

use unicode_segmentation::UnicodeSegmentation;

use crate::models::Record;
use crate::query::PageWindow;
use crate::session::PageView;

const COLUMNS: [&str; 7] = ["#", "Bid Number", "Items", "Qty", "Department", "Start", "End"];

/// Cut `text` to at most `width` graphemes, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = graphemes[..width - 1].concat();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.graphemes(true).count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn cells(position: usize, record: &Record, cell_width: usize) -> Vec<String> {
    vec![
        position.to_string(),
        truncate(&record.id, cell_width),
        truncate(&record.items, cell_width),
        truncate(&record.quantity.to_string(), cell_width),
        truncate(&record.department, cell_width),
        truncate(&record.start_date, cell_width),
        truncate(&record.end_date, cell_width),
    ]
}

/// Render the rows of `view` as an aligned table followed by the page summary.
///
/// Rows are numbered from 1 within the page; `open <n>` uses the same numbers.
pub fn render_page(view: &PageView<'_>, cell_width: usize) -> String {
    let mut out = String::new();

    if view.rows.is_empty() {
        let _ = writeln!(out, "No results.");
    } else {
        let rows: Vec<Vec<String>> = view
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| cells(i + 1, r, cell_width))
            .collect();

        let widths: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .map(|r| r[col].graphemes(true).count())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = COLUMNS
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        let _ = writeln!(out, "{}", header.join(" | ").trim_end());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));

        for row in &rows {
            let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
            let _ = writeln!(out, "{}", line.join(" | ").trim_end());
        }
    }

    // An empty result set has no current page.
    let current_page = if view.total_pages == 0 {
        0
    } else {
        view.current_page
    };
    let _ = writeln!(
        out,
        "Page {} of {} | {} of {} records match",
        current_page,
        view.total_pages,
        view.filtered_count,
        view.total_count
    );
    let pagination = render_pagination(&view.window, view.current_page);
    if !pagination.is_empty() {
        let _ = writeln!(out, "{}", pagination);
    }
    out
}

/// Render the page links, e.g. `« Prev  11 [12] 13 … 20  Next »`.
pub fn render_pagination(window: &PageWindow, current_page: usize) -> String {
    let mut parts = Vec::new();
    if window.show_prev {
        parts.push("« Prev".to_string());
    }
    for page in window.pages() {
        if page == current_page {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_next {
        parts.push("Next »".to_string());
    }
    parts.join(" ")
}
