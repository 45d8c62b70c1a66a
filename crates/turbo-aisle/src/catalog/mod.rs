//! Item catalog module.
//!
//! Parses catalog entries once at load into typed [`Item`] records and
//! keeps them in declaration ("featured") order.

mod catalog;
mod department;
mod item;

pub use catalog::ItemCatalog;
pub use department::department_key;
pub use item::{normalize, Item, ItemRecord};
