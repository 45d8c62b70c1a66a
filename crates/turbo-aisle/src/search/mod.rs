//! Search module.
//!
//! Contains filter criteria, the filter and sort engines, the search-box
//! debouncer, and the signals handed to the presentation layer.

mod criteria;
mod debounce;
mod filter;
mod results;
mod sort;

pub use criteria::{parse_money, parse_rating, FilterCriteria, ALL_DEPARTMENTS};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use filter::{evaluate, Filter, FilterEngine, FilterOutcome};
pub use results::{query_label, ListingView};
pub use sort::{order, ListingOrder, SortEngine, SortMode};
