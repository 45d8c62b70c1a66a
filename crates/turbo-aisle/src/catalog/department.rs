//! Department keys for the single-select department control.

use super::normalize;

/// Map a department dropdown label onto the key items are tagged with.
///
/// Dropdown labels are human-facing ("Snacks & Sundries"), while items
/// carry short keys ("snacks"). Matching is by substring, first hit wins;
/// an unrecognized label falls through as its normalized self.
pub fn department_key(raw: &str) -> String {
    let d = normalize(raw);
    let key = if d == "all" {
        "all"
    } else if d.contains("snack") {
        "snacks"
    } else if d.contains("drink") {
        "drinks"
    } else if d.contains("house") {
        "household"
    } else if d.contains("gacha") {
        "trinkets"
    } else if d.contains("not cursed") {
        "notcursed"
    } else {
        return d;
    };
    key.to_string()
}
