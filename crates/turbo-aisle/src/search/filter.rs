//! Filter predicates and the recompute that applies them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Item, ItemCatalog};
use crate::ids::ItemId;
use crate::search::criteria::{FilterCriteria, ALL_DEPARTMENTS};

/// A single visibility predicate, borrowed from [`FilterCriteria`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter<'a> {
    /// Substring match on the item's search text. Empty matches all.
    Text(&'a str),
    /// Exact department match, unless `"all"`.
    Department(&'a str),
    /// Department is one of the set (OR). Empty set matches all.
    Departments(&'a BTreeSet<String>),
    /// Every flag in the set is present (AND).
    Flags(&'a BTreeSet<String>),
    /// Rating at or above `min`.
    Rating { min: f64 },
    /// Price at or above the bound, if any.
    MinPrice(Option<f64>),
    /// Price at or below the bound, if any.
    MaxPrice(Option<f64>),
}

impl Filter<'_> {
    /// Check whether an item satisfies this predicate.
    pub fn matches(&self, item: &Item) -> bool {
        match *self {
            Filter::Text(q) => q.is_empty() || item.search_text().contains(q),
            Filter::Department(d) => d == ALL_DEPARTMENTS || item.department == d,
            Filter::Departments(set) => set.is_empty() || set.contains(&item.department),
            Filter::Flags(required) => required.iter().all(|f| item.has_flag(f)),
            Filter::Rating { min } => item.rating >= min,
            Filter::MinPrice(bound) => bound.map_or(true, |min| item.price >= min),
            Filter::MaxPrice(bound) => bound.map_or(true, |max| item.price <= max),
        }
    }
}

/// Result of a filter recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    /// Visible item ids in featured order.
    pub visible_ids: Vec<ItemId>,
    pub shown_count: usize,
}

impl FilterOutcome {
    /// True when nothing survived the filters.
    pub fn is_empty(&self) -> bool {
        self.shown_count == 0
    }
}

/// Evaluate `criteria` against every item, setting each item's hidden flag.
///
/// The hidden flags are the only thing written. Calling this twice with
/// the same criteria leaves the catalog and the outcome unchanged.
pub fn evaluate(criteria: &FilterCriteria, catalog: &mut ItemCatalog) -> FilterOutcome {
    let filters = criteria.filters();
    let mut visible_ids = Vec::new();

    for item in catalog.items_mut() {
        let show = {
            let candidate: &Item = item;
            filters.iter().all(|f| f.matches(candidate))
        };
        item.set_hidden(!show);
        if show {
            visible_ids.push(item.id.clone());
        }
    }

    let shown_count = visible_ids.len();
    tracing::debug!(shown_count, query = %criteria.query, "filters applied");
    FilterOutcome {
        visible_ids,
        shown_count,
    }
}

/// Holds the page's filter criteria and recomputes visibility on demand.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    criteria: FilterCriteria,
}

impl FilterEngine {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Mutable access for control handlers; takes effect on the next
    /// [`FilterEngine::evaluate`].
    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn evaluate(&self, catalog: &mut ItemCatalog) -> FilterOutcome {
        evaluate(&self.criteria, catalog)
    }
}
