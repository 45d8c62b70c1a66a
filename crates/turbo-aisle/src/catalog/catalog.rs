//! The item catalog for one page session.

use crate::catalog::{Item, ItemRecord};
use crate::error::AisleError;
use crate::ids::ItemId;

/// Items parsed once at load, held in declaration order.
///
/// The backing vector is never reordered, so its order *is* the featured
/// order. Sorting produces id sequences and leaves the catalog untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Build a catalog from raw records, in the order given.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ItemRecord>) -> Self {
        Self {
            items: records.into_iter().map(Item::from_record).collect(),
        }
    }

    /// Build a catalog from a JSON array of records.
    ///
    /// Individual malformed attributes degrade to their defaults; only a
    /// document that isn't an array of objects is rejected.
    pub fn from_json(json: &str) -> Result<Self, AisleError> {
        let records: Vec<ItemRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(&records))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in featured order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in featured order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// First item with the given id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Items left visible by the last filter recompute, in featured order.
    pub fn visible(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| !i.is_hidden())
    }

    /// Items hidden by the last filter recompute, in featured order.
    pub fn hidden(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_hidden())
    }

    /// Ids in featured order.
    pub fn featured_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub(crate) fn items_mut(&mut self) -> std::slice::IterMut<'_, Item> {
        self.items.iter_mut()
    }
}

impl<'a> IntoIterator for &'a ItemCatalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
