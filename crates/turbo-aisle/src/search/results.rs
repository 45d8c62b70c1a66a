//! Listing signals for the presentation layer.

use serde::Serialize;

use crate::ids::ItemId;
use crate::search::{FilterOutcome, ListingOrder};

/// Everything the listing needs to re-render after a recompute.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListingView {
    pub shown_count: usize,
    /// Active query echoed back in typographic quotes.
    pub query_label: String,
    pub no_results: bool,
    /// Every item id, visible first.
    pub order: ListingOrder,
}

impl ListingView {
    pub fn new(outcome: &FilterOutcome, query: &str, order: ListingOrder) -> Self {
        Self {
            shown_count: outcome.shown_count,
            query_label: query_label(query),
            no_results: outcome.is_empty(),
            order,
        }
    }

    /// Visible ids in display order.
    pub fn visible(&self) -> &[ItemId] {
        self.order.visible()
    }
}

/// Wrap the trimmed query in curly quotes, e.g. `“moon crisps”`.
pub fn query_label(query: &str) -> String {
    format!("\u{201c}{}\u{201d}", query.trim())
}
