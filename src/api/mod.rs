//! Remote Catalog
//!
//! Paginated listing and per-item detail lookups against the catalog REST API.

mod catalog;

use std::num::NonZeroU32;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{CatalogItemDetail, ListPage};

pub use catalog::CatalogClient;

/// Everything the app asks of the remote catalog.
///
/// Futures are not `Send`: the app runs on the browser's single thread.
/// No implementation retries; callers decide what to do with a failure.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Page of `limit` summaries starting at `offset`
    async fn list_page(&self, offset: u32, limit: NonZeroU32) -> Result<ListPage, FetchError>;

    /// Full detail for one item
    async fn get_detail(&self, id: u32) -> Result<CatalogItemDetail, FetchError>;
}
