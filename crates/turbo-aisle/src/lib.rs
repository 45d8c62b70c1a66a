//! Catalog filtering, sorting, and cart state for TurboCommerce storefronts.
//!
//! This crate is the engine behind a single product listing page:
//!
//! - **Catalog**: Items parsed once from loosely typed records, in featured order
//! - **Search**: Seven-predicate filtering, visible-first sorting, search debounce
//! - **Cart**: Persisted cart lines, service fee, and display totals
//! - **Session**: Command handlers a front end forwards its control events to
//!
//! # Example
//!
//! ```rust
//! use turbo_aisle::prelude::*;
//! use turbo_cache::MemoryStore;
//!
//! let catalog = ItemCatalog::from_records(&[
//!     ItemRecord::titled("Moon Crisps").with_department("snacks").with_price(12),
//!     ItemRecord::titled("Void Soda").with_department("drinks").with_price(3),
//! ]);
//!
//! let mut session = PageSession::new(catalog, MemoryStore::new());
//! let view = session.on_sort_changed("priceAsc");
//! assert_eq!(view.visible()[0].as_str(), "void soda");
//!
//! session.on_cart_add("moon crisps", "Moon Crisps", 12.0).unwrap();
//! assert_eq!(session.cart_summary().display_total(), "$19");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod search;
pub mod session;

pub use config::AisleConfig;
pub use error::AisleError;
pub use ids::*;
pub use money::{Currency, Money};
pub use session::PageSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{AisleConfig, StorageConfig};
    pub use crate::error::AisleError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::session::PageSession;

    // Catalog
    pub use crate::catalog::{Item, ItemCatalog, ItemRecord};

    // Search
    pub use crate::search::{
        FilterCriteria, FilterEngine, FilterOutcome, ListingOrder, ListingView, SortEngine,
        SortMode,
    };

    // Cart
    pub use crate::cart::{CartLine, CartStore, CartSummary};
}
