//! Client-side query engine.
//!
//! - `filter`: row predicates over a `FilterState`
//! - `pagination`: page slicing and the page-link window
//! - `date` / `quantity`: parsers for the filter mini-languages

pub mod date;
pub mod filter;
pub mod pagination;
pub mod quantity;

pub use date::{parse_custom_date, parse_filter_date};
pub use filter::{CompiledFilter, FilterKey, FilterState, filter_indices, matches};
pub use pagination::{PageState, PageWindow, page_bounds, total_pages};
pub use quantity::{Operator, QuantityCondition};
