//! Discovery Feed
//!
//! Incremental pagination over the catalog for the Discover view.
//!
//! Offsets advance by a fixed stride, `pages_loaded * page_size`, and never
//! follow the cursor the server returns. That only lines up while the server
//! honours the requested page size.

use std::num::NonZeroU32;

use crate::api::CatalogSource;
use crate::error::FetchError;
use crate::models::{CatalogItemSummary, ListPage};

#[derive(Debug, Clone, PartialEq)]
pub enum FeedPhase {
    /// Nothing requested yet
    Idle,
    /// First page in flight
    Loading,
    Ready,
    /// A later page in flight
    LoadingMore,
    /// The last page said there is nothing after it
    Exhausted,
    /// A page failed; the feed stays here
    Failed(FetchError),
}

/// One page fetch the caller should issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct DiscoveryFeed {
    page_size: NonZeroU32,
    pages_loaded: u32,
    items: Vec<CatalogItemSummary>,
    total: Option<u32>,
    phase: FeedPhase,
}

impl DiscoveryFeed {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            page_size,
            pages_loaded: 0,
            items: Vec::new(),
            total: None,
            phase: FeedPhase::Idle,
        }
    }

    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    /// Everything loaded so far, in arrival order
    pub fn items(&self) -> &[CatalogItemSummary] {
        &self.items
    }

    /// Catalog size reported by the most recent page
    pub fn total(&self) -> Option<u32> {
        self.total
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, FeedPhase::Loading | FeedPhase::LoadingMore)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.phase {
            FeedPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn next_offset(&self) -> u32 {
        self.pages_loaded.saturating_mul(self.page_size.get())
    }

    /// Proximity signal. Returns the page to fetch, or `None` when the signal
    /// is suppressed because a fetch is in flight or nothing more can load.
    /// Suppressed signals are dropped; the next page needs a fresh signal.
    pub fn request_page(&mut self) -> Option<PageRequest> {
        match self.phase {
            FeedPhase::Idle => self.phase = FeedPhase::Loading,
            FeedPhase::Ready => self.phase = FeedPhase::LoadingMore,
            FeedPhase::Loading
            | FeedPhase::LoadingMore
            | FeedPhase::Exhausted
            | FeedPhase::Failed(_) => return None,
        }
        Some(PageRequest { offset: self.next_offset(), limit: self.page_size })
    }

    /// Record the outcome of the in-flight fetch
    pub fn settle(&mut self, result: Result<ListPage, FetchError>) {
        if !self.is_fetching() {
            log::warn!("dropping page result with no fetch in flight ({:?})", self.phase);
            return;
        }
        match result {
            Ok(page) => {
                self.items.extend(page.items);
                self.pages_loaded += 1;
                self.total = Some(page.total);
                self.phase = if page.has_next { FeedPhase::Ready } else { FeedPhase::Exhausted };
                log::debug!(
                    "page {} loaded, {} of {} items",
                    self.pages_loaded,
                    self.items.len(),
                    page.total
                );
            }
            Err(e) => {
                log::error!("{}", e);
                self.phase = FeedPhase::Failed(e);
            }
        }
    }
}

/// Fetch one requested page and hand the outcome to `settle`
pub async fn load_page<S, F>(source: &S, request: PageRequest, settle: F)
where
    S: CatalogSource + ?Sized,
    F: FnOnce(Result<ListPage, FetchError>),
{
    let result = source.list_page(request.offset, request.limit).await;
    settle(result);
}
