//! Shopping cart module.
//!
//! Contains cart lines, the persisted cart store, and fee/summary pricing.

mod line;
mod pricing;
mod store;

pub use line::CartLine;
pub use pricing::{fee, service_fee, CartSummary, FEE_FLAT, FEE_RATE};
pub use store::CartStore;
