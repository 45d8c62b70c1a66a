//! Persisted cart store.

use indexmap::IndexMap;
use serde::Deserialize;
use turbo_cache::{Cache, Store};

use crate::cart::{CartLine, CartSummary};
use crate::config::AisleConfig;
use crate::error::AisleError;
use crate::ids::ItemId;
use crate::money::{Currency, Money};

/// Name given to a line added without one.
pub const DEFAULT_PLACEHOLDER_NAME: &str = "Item";

/// Cart quantities keyed by item id, mirrored to durable storage.
///
/// Every mutation writes the whole snapshot back under one key. If the
/// write fails, the in-memory cart is restored to its state before the
/// mutation and the error is returned, so memory and storage agree.
///
/// Ids are trimmed on the way in by every operation.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    lines: IndexMap<ItemId, CartLine>,
    currency: Currency,
    placeholder_name: String,
}

/// Lenient shape of a stored line; anything that doesn't fit is dropped.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: f64,
    quantity: f64,
}

impl<S: Store> CartStore<S> {
    /// Open the cart stored under `key`.
    ///
    /// A missing, unreadable, or malformed snapshot yields an empty cart.
    /// This never fails.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let mut cart = Self {
            cache: Cache::new(store),
            key: key.into(),
            lines: IndexMap::new(),
            currency: Currency::default(),
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
        };
        cart.reload();
        cart
    }

    /// Open the cart using the storage key, currency, and placeholder name
    /// from `config`.
    pub fn from_config(store: S, config: &AisleConfig) -> Self {
        Self::load(store, config.cart_storage_key())
            .with_currency(config.currency)
            .with_placeholder_name(&config.placeholder_name)
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_placeholder_name(mut self, name: &str) -> Self {
        self.placeholder_name = name.to_string();
        self
    }

    /// Replace in-memory state with whatever is in storage now.
    pub fn reload(&mut self) {
        self.lines = match self.cache.get_raw(&self.key) {
            Ok(Some(bytes)) => decode_snapshot(&self.key, &bytes),
            Ok(None) => IndexMap::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart unreadable, starting empty");
                IndexMap::new()
            }
        };
    }

    /// Add one of an item, creating its line on first add.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is empty or
    /// `price` is not finite. The name and price are captured only when the
    /// line is created; the price is rounded to a whole unit.
    pub fn add_item(&mut self, id: &str, name: &str, price: f64) -> Result<bool, AisleError> {
        let id = id.trim();
        if id.is_empty() || !price.is_finite() {
            tracing::debug!(id, price, "cart add rejected");
            return Ok(false);
        }

        let previous = self.lines.clone();
        let placeholder = &self.placeholder_name;
        let line = self.lines.entry(ItemId::new(id)).or_insert_with(|| {
            let name = match name.trim() {
                "" => placeholder.clone(),
                n => n.to_string(),
            };
            let unit_price = Money::from_decimal(price, Currency::default()).amount.max(0);
            CartLine::new(ItemId::new(id), name, unit_price, 0)
        });
        line.quantity = line.quantity.saturating_add(1);
        tracing::debug!(id, quantity = line.quantity, "cart add");

        self.commit(previous)?;
        Ok(true)
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// Returns `Ok(false)` when no line has this id.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> Result<bool, AisleError> {
        let id = id.trim();
        if !self.lines.contains_key(id) {
            return Ok(false);
        }

        let previous = self.lines.clone();
        let quantity = quantity.max(0);
        if quantity == 0 {
            self.lines.shift_remove(id);
        } else if let Some(line) = self.lines.get_mut(id) {
            line.quantity = quantity;
        }
        tracing::debug!(id, quantity, "cart set quantity");

        self.commit(previous)?;
        Ok(true)
    }

    /// Adjust a line's quantity by `delta`, removing it if it drops to zero.
    ///
    /// Returns `Ok(false)` when no line has this id.
    pub fn increment_quantity(&mut self, id: &str, delta: i64) -> Result<bool, AisleError> {
        let id = id.trim();
        match self.lines.get(id).map(|line| line.quantity) {
            Some(current) => self.set_quantity(id, current.saturating_add(delta)),
            None => Ok(false),
        }
    }

    /// Remove a line entirely.
    pub fn remove_item(&mut self, id: &str) -> Result<bool, AisleError> {
        self.set_quantity(id, 0)
    }

    /// Write the whole cart to storage.
    pub fn persist(&self) -> Result<(), AisleError> {
        self.cache.set(&self.key, &self.lines)?;
        Ok(())
    }

    fn commit(&mut self, previous: IndexMap<ItemId, CartLine>) -> Result<(), AisleError> {
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "cart write failed, mutation dropped");
            self.lines = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn subtotal(&self) -> i64 {
        self.lines
            .values()
            .fold(0_i64, |acc, l| acc.saturating_add(l.line_total()))
    }

    /// Sum of quantities over all lines.
    pub fn count(&self) -> i64 {
        self.lines
            .values()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.get(id.trim())
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Storage key the snapshot lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Count, totals, and lines for display.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_lines(self.lines.values().cloned().collect(), self.currency)
    }
}

/// Decode a stored snapshot, keeping only well-formed lines with a
/// positive quantity. The map key is the line's id.
fn decode_snapshot(key: &str, bytes: &[u8]) -> IndexMap<ItemId, CartLine> {
    let entries = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Object(entries)) => entries,
        Ok(_) => {
            tracing::warn!(key, "stored cart is not an object, starting empty");
            return IndexMap::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored cart is corrupt, starting empty");
            return IndexMap::new();
        }
    };

    let mut lines = IndexMap::new();
    for (id, value) in entries {
        let Ok(stored) = serde_json::from_value::<StoredLine>(value) else {
            continue;
        };
        let quantity = stored.quantity.floor();
        if id.is_empty() || !quantity.is_finite() || quantity < 1.0 || !stored.price.is_finite() {
            continue;
        }
        let id = ItemId::new(id);
        let line = CartLine::new(
            id.clone(),
            stored.name,
            Money::from_decimal(stored.price, Currency::default()).amount.max(0),
            quantity as i64,
        );
        lines.insert(id, line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_cache::MemoryStore;

    const KEY: &str = "aisle:cart";

    fn cart() -> (MemoryStore, CartStore<MemoryStore>) {
        let store = MemoryStore::new();
        let cart = CartStore::load(store.clone(), KEY);
        (store, cart)
    }

    #[test]
    fn test_add_round_trips_through_storage() {
        let (store, mut cart) = cart();
        assert!(cart.add_item("a", "X", 12.6).unwrap());

        let reloaded = CartStore::load(store, KEY);
        assert_eq!(reloaded.len(), 1);
        let line = reloaded.get("a").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, 13);
        assert_eq!(line.name, "X");
    }

    #[test]
    fn test_repeat_add_increments_and_keeps_first_price() {
        let (_, mut cart) = cart();
        cart.add_item("a", "X", 10.0).unwrap();
        cart.add_item("a", "Renamed", 99.0).unwrap();

        let line = cart.get("a").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, 10);
        assert_eq!(line.name, "X");
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.subtotal(), 20);
    }

    #[test]
    fn test_invalid_adds_are_noops() {
        let (store, mut cart) = cart();
        assert!(!cart.add_item("", "X", 1.0).unwrap());
        assert!(!cart.add_item("  ", "X", 1.0).unwrap());
        assert!(!cart.add_item("a", "X", f64::NAN).unwrap());
        assert!(!cart.add_item("a", "X", f64::INFINITY).unwrap());
        assert!(cart.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_placeholder_name_and_negative_price() {
        let (_, mut cart) = cart();
        cart.add_item("a", "   ", -4.0).unwrap();
        let line = cart.get("a").unwrap();
        assert_eq!(line.name, DEFAULT_PLACEHOLDER_NAME);
        assert_eq!(line.unit_price, 0);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let (store, mut cart) = cart();
        cart.add_item("a", "X", 12.6).unwrap();
        assert!(cart.set_quantity("a", 0).unwrap());

        assert!(cart.get("a").is_none());
        assert_eq!(cart.subtotal(), 0);
        assert_eq!(crate::cart::fee(cart.subtotal()), 0);
        assert!(CartStore::load(store, KEY).is_empty());
    }

    #[test]
    fn test_set_quantity_clamps_and_ignores_unknown() {
        let (_, mut cart) = cart();
        cart.add_item("a", "X", 5.0).unwrap();

        assert!(!cart.set_quantity("missing", 3).unwrap());
        assert!(cart.set_quantity("a", 4).unwrap());
        assert_eq!(cart.get("a").unwrap().quantity, 4);

        assert!(cart.set_quantity("a", -2).unwrap());
        assert!(cart.get("a").is_none());
    }

    #[test]
    fn test_increment_quantity() {
        let (_, mut cart) = cart();
        cart.add_item("a", "X", 5.0).unwrap();

        assert!(cart.increment_quantity("a", 2).unwrap());
        assert_eq!(cart.get("a").unwrap().quantity, 3);
        assert!(cart.increment_quantity("a", -1).unwrap());
        assert_eq!(cart.get("a").unwrap().quantity, 2);
        assert!(cart.increment_quantity("a", -5).unwrap());
        assert!(cart.get("a").is_none());
        assert!(!cart.increment_quantity("a", 1).unwrap());
    }

    #[test]
    fn test_lines_keep_insertion_order_after_removal() {
        let (store, mut cart) = cart();
        for id in ["c", "a", "b"] {
            cart.add_item(id, id, 1.0).unwrap();
        }
        cart.remove_item("a").unwrap();

        let ids: Vec<_> = cart.lines().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);

        let reloaded = CartStore::load(store, KEY);
        let ids: Vec<_> = reloaded.lines().map(|l| l.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_count_saturates_instead_of_overflowing() {
        let (_, mut cart) = cart();
        cart.add_item("a", "X", 1.0).unwrap();
        cart.add_item("b", "Y", 1.0).unwrap();
        cart.set_quantity("a", i64::MAX).unwrap();
        cart.set_quantity("b", 5).unwrap();

        assert_eq!(cart.count(), i64::MAX);
        assert_eq!(cart.subtotal(), i64::MAX);
        assert_eq!(cart.summary().count, i64::MAX);
    }

    #[test]
    fn test_ids_are_trimmed_everywhere() {
        let (_, mut cart) = cart();
        cart.add_item(" a ", "X", 2.0).unwrap();
        assert!(cart.get("a").is_some());

        assert!(cart.set_quantity(" a ", 3).unwrap());
        assert_eq!(cart.get(" a").unwrap().quantity, 3);
        assert!(cart.increment_quantity("a  ", 1).unwrap());
        assert_eq!(cart.get("a").unwrap().quantity, 4);
        assert!(cart.remove_item("\ta\n").unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        for raw in ["{not json", "[1,2,3]", "\"cart\"", "null"] {
            let store = MemoryStore::new();
            store.set(KEY, raw.as_bytes()).unwrap();
            assert!(CartStore::load(store, KEY).is_empty());
        }
    }

    #[test]
    fn test_snapshot_drops_bad_lines() {
        let store = MemoryStore::new();
        let raw = serde_json::json!({
            "good": {"id": "good", "name": "Fine", "price": 12.4, "quantity": 2},
            "zero": {"id": "zero", "name": "Gone", "price": 3, "quantity": 0},
            "weird": {"id": "weird", "price": "free", "quantity": 1},
            "partial": {"quantity": 1},
            "scalar": 5
        });
        store.set(KEY, raw.to_string().as_bytes()).unwrap();

        let cart = CartStore::load(store, KEY);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("good").unwrap().unit_price, 12);
        let partial = cart.get("partial").unwrap();
        assert_eq!(partial.unit_price, 0);
        assert_eq!(partial.name, "");
    }

    #[test]
    fn test_write_failure_rolls_back() {
        let store = MemoryStore::with_quota(80);
        let mut cart = CartStore::load(store.clone(), KEY);
        cart.add_item("a", "X", 10.0).unwrap();

        let long_name = "n".repeat(200);
        let err = cart.add_item("b", &long_name, 10.0).unwrap_err();
        assert!(matches!(err, AisleError::Storage(_)));

        // The failed add left neither memory nor storage changed.
        assert!(cart.get("b").is_none());
        assert_eq!(cart.count(), 1);
        let reloaded = CartStore::load(store, KEY);
        assert_eq!(reloaded.count(), 1);
    }

    #[test]
    fn test_summary_matches_state() {
        let (_, mut cart) = cart();
        cart.add_item("a", "X", 100.0).unwrap();
        cart.add_item("a", "X", 100.0).unwrap();

        let summary = cart.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.subtotal.amount, 200);
        assert_eq!(summary.fee.amount, 13);
        assert_eq!(summary.lines.len(), 1);
    }
}
