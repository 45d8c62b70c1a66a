//! Sort modes and the visible-first ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, ItemCatalog};
use crate::ids::ItemId;

/// Sort options offered by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Declaration order.
    #[default]
    Featured,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
    /// Rating, then review count, high to low.
    RatingDesc,
    /// Release date, newest first.
    Newest,
    /// Unrecognized control value; leaves the input order alone.
    Unsorted,
}

impl SortMode {
    /// Read a sort control value. Unknown values map to [`SortMode::Unsorted`].
    pub fn from_value(s: &str) -> Self {
        match s.trim() {
            "featured" => Self::Featured,
            "priceAsc" => Self::PriceAsc,
            "priceDesc" => Self::PriceDesc,
            "ratingDesc" => Self::RatingDesc,
            "newest" => Self::Newest,
            _ => Self::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
            Self::RatingDesc => "ratingDesc",
            Self::Newest => "newest",
            Self::Unsorted => "unsorted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::RatingDesc => "Top Rated",
            Self::Newest => "Newest Arrivals",
            Self::Unsorted => "Unsorted",
        }
    }
}

// Item numbers are always finite, so partial_cmp only fails on NaN we
// never produce.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Every item id, visible ones first in sorted order, then hidden ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListingOrder {
    pub ids: Vec<ItemId>,
    /// How many leading entries of `ids` are visible.
    pub visible_len: usize,
}

impl ListingOrder {
    pub fn visible(&self) -> &[ItemId] {
        &self.ids[..self.visible_len]
    }

    pub fn hidden(&self) -> &[ItemId] {
        &self.ids[self.visible_len..]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Order the catalog for display under `mode`.
///
/// Only visible items are sorted. Hidden items follow in featured order,
/// so sorting never moves a hidden item into the visible region. Sorts are
/// stable: ties keep featured order.
pub fn order(mode: SortMode, catalog: &ItemCatalog) -> ListingOrder {
    let mut visible: Vec<&Item> = catalog.visible().collect();
    match mode {
        SortMode::Featured | SortMode::Unsorted => {}
        SortMode::PriceAsc => visible.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortMode::PriceDesc => visible.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortMode::RatingDesc => {
            visible.sort_by(|a, b| cmp_f64(b.rating_score(), a.rating_score()))
        }
        SortMode::Newest => visible.sort_by(|a, b| b.release_date.cmp(&a.release_date)),
    }

    let visible_len = visible.len();
    let ids = visible
        .into_iter()
        .chain(catalog.hidden())
        .map(|i| i.id.clone())
        .collect();

    tracing::debug!(mode = mode.as_str(), visible_len, "listing ordered");
    ListingOrder { ids, visible_len }
}

/// Holds the selected sort mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortEngine {
    mode: SortMode,
}

impl SortEngine {
    pub fn new(mode: SortMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SortMode) {
        self.mode = mode;
    }

    pub fn order(&self, catalog: &ItemCatalog) -> ListingOrder {
        order(self.mode, catalog)
    }
}
