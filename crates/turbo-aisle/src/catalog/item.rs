//! Catalog item records.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ItemId;

/// Lower-case, collapse internal whitespace runs to one space, and trim.
///
/// ```
/// use turbo_aisle::catalog::normalize;
/// assert_eq!(normalize("  Fizzy\tDRINK \n 2L "), "fizzy drink 2l");
/// ```
pub fn normalize(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A catalog entry as supplied by the rendering layer.
///
/// Every attribute is optional text, as it arrives from markup. Numbers
/// and booleans in a JSON source are accepted and read as their text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Short description line shown under the title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub meta: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: Option<String>,
    #[serde(default, alias = "dept", deserialize_with = "lenient_text")]
    pub department: Option<String>,
    /// Free-form tag text, searched but not used as flags.
    #[serde(default, deserialize_with = "lenient_text")]
    pub tags: Option<String>,
    /// Space-delimited flag tokens.
    #[serde(default, deserialize_with = "lenient_text")]
    pub flags: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reviews: Option<String>,
    #[serde(default, alias = "release_date", deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

impl ItemRecord {
    /// Create a record with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_price(mut self, price: impl ToString) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn with_rating(mut self, rating: impl ToString, reviews: impl ToString) -> Self {
        self.rating = Some(rating.to_string());
        self.reviews = Some(reviews.to_string());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// A parsed catalog item.
///
/// Read-only after load except for the hidden flag, which the filter
/// engine sets on every recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub meta_text: String,
    pub note_text: String,
    pub department_raw: String,
    pub tags_text: String,
    /// Normalized department key.
    pub department: String,
    /// Normalized flag tokens.
    pub flags: BTreeSet<String>,
    /// Non-negative; 0 when missing or unparsable.
    pub price: f64,
    pub rating: f64,
    pub review_count: f64,
    /// Unix epoch when missing or unparsable.
    pub release_date: DateTime<Utc>,
    #[serde(skip)]
    search_text: String,
    #[serde(skip)]
    hidden: bool,
}

impl Item {
    /// Build an item from a raw record, applying each attribute's default
    /// when it is missing or malformed. Never fails.
    pub fn from_record(record: &ItemRecord) -> Self {
        let text = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();

        let title = text(&record.title);
        let meta_text = text(&record.meta);
        let note_text = text(&record.note);
        let department_raw = text(&record.department);
        let tags_text = text(&record.tags);

        let id = match record.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ItemId::new(id),
            _ => ItemId::new(normalize(&title)),
        };

        let flags = normalize(record.flags.as_deref().unwrap_or(""))
            .split(' ')
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        let price = parse_number(record.price.as_deref()).max(0.0);

        let search_text = normalize(&format!(
            "{} {} {} {}",
            title, meta_text, note_text, tags_text
        ));

        Self {
            id,
            department: normalize(&department_raw),
            flags,
            price,
            rating: parse_number(record.rating.as_deref()),
            review_count: parse_number(record.reviews.as_deref()),
            release_date: parse_date(record.date.as_deref()),
            title,
            meta_text,
            note_text,
            department_raw,
            tags_text,
            search_text,
            hidden: false,
        }
    }

    /// Normalized concatenation of title, meta, note, and tag text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Whether the last filter recompute hid this item.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Check if the item carries a flag (expects a normalized token).
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Sort key for "top rated": rating dominates, review count breaks ties.
    pub fn rating_score(&self) -> f64 {
        self.rating * 1_000_000.0 + self.review_count
    }
}

/// Parse a finite number, defaulting to 0.
fn parse_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Parse an RFC 3339 timestamp, a bare `YYYY-MM-DD` date, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp (read as UTC). Anything else is the epoch.
fn parse_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DateTime::<Utc>::UNIX_EPOCH;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc();
    }
    DateTime::<Utc>::UNIX_EPOCH
}

/// Accept a string, number, or bool as text; anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello   World "), "hello world");
        assert_eq!(normalize("\n\t"), "");
        assert_eq!(normalize("ÉCLAIR  Box"), "éclair box");
    }

    #[test]
    fn test_full_record() {
        let record = ItemRecord::titled("Moon Crisps")
            .with_id("sku-1")
            .with_department("  Snacks ")
            .with_flags("Prime  EUCLID")
            .with_tags("crunchy lunar")
            .with_meta("Salted")
            .with_note("Do not microwave")
            .with_price("12.5")
            .with_rating("4.5", "120")
            .with_date("2024-03-01");
        let item = Item::from_record(&record);

        assert_eq!(item.id.as_str(), "sku-1");
        assert_eq!(item.department, "snacks");
        assert_eq!(item.department_raw, "  Snacks ");
        assert!(item.has_flag("prime"));
        assert!(item.has_flag("euclid"));
        assert_eq!(item.flags.len(), 2);
        assert_eq!(item.price, 12.5);
        assert_eq!(item.rating, 4.5);
        assert_eq!(item.review_count, 120.0);
        assert_eq!(item.release_date.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(
            item.search_text(),
            "moon crisps salted do not microwave crunchy lunar"
        );
        assert!(!item.is_hidden());
    }

    #[test]
    fn test_defaults_for_malformed_attributes() {
        let record = ItemRecord::titled("Odd Thing")
            .with_price("twelve")
            .with_rating("NaN", "inf")
            .with_date("someday");
        let item = Item::from_record(&record);

        assert_eq!(item.price, 0.0);
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.review_count, 0.0);
        assert_eq!(item.release_date, DateTime::<Utc>::UNIX_EPOCH);
        assert!(item.flags.is_empty());
        assert_eq!(item.department, "");
    }

    #[test]
    fn test_negative_price_clamps_to_zero() {
        let item = Item::from_record(&ItemRecord::titled("Refund").with_price("-3"));
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_id_falls_back_to_normalized_title() {
        let item = Item::from_record(&ItemRecord::titled("  Fizzy   POP "));
        assert_eq!(item.id.as_str(), "fizzy pop");

        let blank_id = Item::from_record(&ItemRecord::titled("Fizzy Pop").with_id("   "));
        assert_eq!(blank_id.id.as_str(), "fizzy pop");

        let nothing = Item::from_record(&ItemRecord::default());
        assert!(nothing.id.is_empty());
    }

    #[test]
    fn test_date_formats() {
        let rfc = parse_date(Some("2024-05-06T07:08:09+02:00"));
        assert_eq!(rfc.to_rfc3339(), "2024-05-06T05:08:09+00:00");

        let naive = parse_date(Some("2024-05-06T07:08:09"));
        assert_eq!(naive.to_rfc3339(), "2024-05-06T07:08:09+00:00");

        assert_eq!(parse_date(None), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(parse_date(Some("  ")), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_rating_score_orders_rating_first() {
        let a = Item::from_record(&ItemRecord::titled("a").with_rating(5, 1));
        let b = Item::from_record(&ItemRecord::titled("b").with_rating(4, 999_999));
        assert!(a.rating_score() > b.rating_score());
    }

    #[test]
    fn test_record_from_json_accepts_numbers() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"id": 7, "title": "Widget", "dept": "household", "price": 19.99, "rating": null}"#,
        )
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("7"));
        assert_eq!(record.department.as_deref(), Some("household"));
        assert_eq!(record.price.as_deref(), Some("19.99"));
        assert_eq!(record.rating, None);
        assert_eq!(record.note, None);
    }
}
