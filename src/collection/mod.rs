//! Collection
//!
//! The user's curated, ordered list of catalog items and its persistence.

mod controller;
mod store;

pub use controller::CollectionController;
pub use store::CollectionStore;
