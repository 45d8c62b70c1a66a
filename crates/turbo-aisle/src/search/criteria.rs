//! Filter criteria and the control-value parsers that feed them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{department_key, normalize};
use crate::search::Filter;

/// Value of the single-select department control that disables it.
pub const ALL_DEPARTMENTS: &str = "all";

/// The visitor's current filter selections.
///
/// One instance lives for the whole page session. Text fields are stored
/// normalized so predicates can compare directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Normalized free-text query; empty matches everything.
    pub query: String,
    /// Department key from the dropdown, or `"all"`.
    pub department_single: String,
    /// Departments ticked in the sidebar (OR). Empty means inactive.
    pub department_set: BTreeSet<String>,
    /// Flags that must all be present (AND).
    pub required_flags: BTreeSet<String>,
    pub rating_min: f64,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            department_single: ALL_DEPARTMENTS.to_string(),
            department_set: BTreeSet::new(),
            required_flags: BTreeSet::new(),
            rating_min: 0.0,
            price_min: None,
            price_max: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria that admit every item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query from raw input.
    pub fn with_query(mut self, raw: &str) -> Self {
        self.set_query(raw);
        self
    }

    /// Set the dropdown department from its raw label.
    pub fn with_department(mut self, raw: &str) -> Self {
        self.select_department(raw);
        self
    }

    /// Tick a sidebar department.
    pub fn with_department_checked(mut self, value: &str) -> Self {
        self.toggle_department(value, true);
        self
    }

    /// Require a flag.
    pub fn with_flag(mut self, flag: &str) -> Self {
        self.toggle_flag(flag, true);
        self
    }

    pub fn with_rating_min(mut self, min: f64) -> Self {
        self.rating_min = min;
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = normalize(raw);
    }

    pub fn select_department(&mut self, raw: &str) {
        self.department_single = department_key(raw);
    }

    pub fn toggle_department(&mut self, value: &str, checked: bool) {
        toggle(&mut self.department_set, value, checked);
    }

    pub fn toggle_flag(&mut self, value: &str, checked: bool) {
        toggle(&mut self.required_flags, value, checked);
    }

    /// Set the minimum rating from a control value; non-numeric is 0.
    pub fn set_rating_input(&mut self, raw: &str) {
        self.rating_min = parse_rating(raw);
    }

    /// Set both price bounds from raw text inputs.
    pub fn set_price_inputs(&mut self, min_raw: &str, max_raw: &str) {
        self.price_min = parse_money(min_raw);
        self.price_max = parse_money(max_raw);
    }

    /// Reset the sidebar facets: departments, flags, rating, and price.
    ///
    /// The query and dropdown department belong to the search bar and are
    /// left alone.
    pub fn clear_facets(&mut self) {
        self.department_set.clear();
        self.required_flags.clear();
        self.rating_min = 0.0;
        self.price_min = None;
        self.price_max = None;
    }

    /// The seven predicates an item must all satisfy to stay visible.
    pub fn filters(&self) -> [Filter<'_>; 7] {
        [
            Filter::Text(&self.query),
            Filter::Department(&self.department_single),
            Filter::Departments(&self.department_set),
            Filter::Flags(&self.required_flags),
            Filter::Rating { min: self.rating_min },
            Filter::MinPrice(self.price_min),
            Filter::MaxPrice(self.price_max),
        ]
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str, checked: bool) {
    let key = normalize(value);
    if checked {
        set.insert(key);
    } else {
        set.remove(&key);
    }
}

/// Parse a price input by keeping only its digits.
///
/// `"$1,200"` reads as 1200. Input without any digit is absent.
pub fn parse_money(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a rating control value; anything non-numeric is 0.
pub fn parse_rating(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
