//! Query Client
//!
//! Session-wide front for the catalog. Detail lookups are deduplicated while
//! in flight and kept for the rest of the session; list pages pass straight
//! through. Built once in `App` and shared through context.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::api::CatalogSource;
use crate::error::FetchError;
use crate::models::{CardSource, CatalogItemDetail, ListPage};

type DetailFuture = Shared<LocalBoxFuture<'static, Result<CatalogItemDetail, FetchError>>>;

struct QueryInner {
    source: Rc<dyn CatalogSource>,
    details: RefCell<HashMap<u32, DetailFuture>>,
}

/// Cheap to clone; clones share one cache
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<QueryInner>,
}

impl QueryClient {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            inner: Rc::new(QueryInner {
                source: Rc::new(source),
                details: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub async fn list_page(&self, offset: u32, limit: NonZeroU32) -> Result<ListPage, FetchError> {
        self.inner.source.list_page(offset, limit).await
    }

    /// Detail for `id`, fetched at most once per session on success.
    /// A failed lookup is forgotten so a later caller can ask again.
    pub async fn detail(&self, id: u32) -> Result<CatalogItemDetail, FetchError> {
        let pending = self
            .inner
            .details
            .borrow_mut()
            .entry(id)
            .or_insert_with(|| {
                let source = Rc::clone(&self.inner.source);
                async move { source.get_detail(id).await }.boxed_local().shared()
            })
            .clone();

        let result = pending.clone().await;
        if let Err(e) = &result {
            // Only the first waiter evicts; a newer request may already hold the slot
            let mut details = self.inner.details.borrow_mut();
            if details.get(&id).is_some_and(|current| current.ptr_eq(&pending)) {
                details.remove(&id);
                log::error!("{}", e);
            }
        }
        result
    }

    /// Detail already fetched this session, without touching the network
    pub fn cached_detail(&self, id: u32) -> Option<CatalogItemDetail> {
        let details = self.inner.details.borrow();
        match details.get(&id)?.peek()? {
            Ok(detail) => Some(detail.clone()),
            Err(_) => None,
        }
    }

    /// Full detail for whatever a card was given
    pub async fn resolve(&self, source: &CardSource) -> Result<CatalogItemDetail, FetchError> {
        match source {
            CardSource::Detail(detail) => Ok(detail.clone()),
            CardSource::Summary(summary) => {
                let id = summary
                    .id()
                    .ok_or_else(|| FetchError::InvalidReference(summary.reference_url.clone()))?;
                self.detail(id).await
            }
        }
    }
}

/// The cached client stands in for the raw source wherever one is expected
#[async_trait(?Send)]
impl CatalogSource for QueryClient {
    async fn list_page(&self, offset: u32, limit: NonZeroU32) -> Result<ListPage, FetchError> {
        QueryClient::list_page(self, offset, limit).await
    }

    async fn get_detail(&self, id: u32) -> Result<CatalogItemDetail, FetchError> {
        self.detail(id).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::num::NonZeroU32;
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::api::CatalogSource;
    use crate::error::{FetchError, FetchFailure};
    use crate::models::fixtures::{detail, summary};
    use crate::models::{CatalogItemDetail, ListPage};

    /// In-process catalog of `total` items. Records every request and
    /// yields once per request so concurrent callers overlap.
    #[derive(Clone, Default)]
    pub struct FakeCatalog {
        pub total: u32,
        pub failing_ids: Rc<RefCell<HashSet<u32>>>,
        pub failing_offsets: Rc<RefCell<HashSet<u32>>>,
        pub detail_calls: Rc<RefCell<Vec<u32>>>,
        pub page_calls: Rc<RefCell<Vec<u32>>>,
    }

    impl FakeCatalog {
        pub fn with_total(total: u32) -> Self {
            Self { total, ..Default::default() }
        }
    }

    #[async_trait(?Send)]
    impl CatalogSource for FakeCatalog {
        async fn list_page(&self, offset: u32, limit: NonZeroU32) -> Result<ListPage, FetchError> {
            self.page_calls.borrow_mut().push(offset);
            tokio::task::yield_now().await;
            if self.failing_offsets.borrow().contains(&offset) {
                return Err(FetchError::ListPage { offset, reason: FetchFailure::Status(500) });
            }
            let end = (offset + limit.get()).min(self.total);
            Ok(ListPage {
                total: self.total,
                has_next: end < self.total,
                items: (offset..end).map(|i| summary(i + 1)).collect(),
            })
        }

        async fn get_detail(&self, id: u32) -> Result<CatalogItemDetail, FetchError> {
            self.detail_calls.borrow_mut().push(id);
            tokio::task::yield_now().await;
            if self.failing_ids.borrow().contains(&id) {
                return Err(FetchError::Detail { id, reason: FetchFailure::Status(404) });
            }
            Ok(detail(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeCatalog;
    use super::*;
    use crate::models::fixtures::{detail, summary};
    use crate::models::CatalogItemSummary;

    #[tokio::test]
    async fn test_detail_fetched_once() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());

        assert_eq!(query.detail(3).await.unwrap().id, 3);
        assert_eq!(query.detail(3).await.unwrap().id, 3);
        assert_eq!(query.detail(4).await.unwrap().id, 4);

        assert_eq!(*fake.detail_calls.borrow(), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_request() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());

        let (a, b, c) = futures::join!(query.detail(7), query.detail(7), query.detail(7));
        assert_eq!(a.unwrap(), b.clone().unwrap());
        assert_eq!(b.unwrap(), c.unwrap());
        assert_eq!(*fake.detail_calls.borrow(), vec![7]);
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let fake = FakeCatalog::with_total(10);
        fake.failing_ids.borrow_mut().insert(5);
        let query = QueryClient::new(fake.clone());

        assert!(query.detail(5).await.is_err());
        assert_eq!(query.cached_detail(5), None);

        fake.failing_ids.borrow_mut().clear();
        assert_eq!(query.detail(5).await.unwrap().id, 5);
        assert_eq!(*fake.detail_calls.borrow(), vec![5, 5]);
    }

    #[tokio::test]
    async fn test_late_failure_keeps_newer_request() {
        let fake = FakeCatalog::with_total(10);
        fake.failing_ids.borrow_mut().insert(5);
        let query = QueryClient::new(fake.clone());

        let first = query.detail(5);
        let second = query.detail(5);
        futures::pin_mut!(first, second);
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        assert!(first.as_mut().await.is_err());

        // A fresh lookup takes the slot before the second waiter sees the failure
        fake.failing_ids.borrow_mut().clear();
        let retry = query.detail(5);
        futures::pin_mut!(retry);
        assert!(futures::poll!(retry.as_mut()).is_pending());

        assert!(second.as_mut().await.is_err());
        assert_eq!(retry.as_mut().await.unwrap().id, 5);

        assert_eq!(query.cached_detail(5), Some(detail(5)));
        assert_eq!(*fake.detail_calls.borrow(), vec![5, 5]);
    }

    #[tokio::test]
    async fn test_cached_detail_peek() {
        let query = QueryClient::new(FakeCatalog::with_total(10));
        assert_eq!(query.cached_detail(2), None);
        query.detail(2).await.unwrap();
        assert_eq!(query.cached_detail(2), Some(detail(2)));
    }

    #[tokio::test]
    async fn test_as_catalog_source() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());
        let source: &dyn CatalogSource = &query;

        source.get_detail(9).await.unwrap();
        source.get_detail(9).await.unwrap();
        let page = source.list_page(0, NonZeroU32::new(4).unwrap()).await.unwrap();

        assert_eq!(page.items.len(), 4);
        assert_eq!(*fake.detail_calls.borrow(), vec![9]);
        assert_eq!(*fake.page_calls.borrow(), vec![0]);
    }

    #[tokio::test]
    async fn test_resolve_detail_skips_network() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());

        let resolved = query.resolve(&CardSource::Detail(detail(8))).await.unwrap();
        assert_eq!(resolved.id, 8);
        assert!(fake.detail_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_summary_uses_reference_id() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());

        let resolved = query.resolve(&CardSource::Summary(summary(6))).await.unwrap();
        assert_eq!(resolved.id, 6);
        assert_eq!(*fake.detail_calls.borrow(), vec![6]);
    }

    #[tokio::test]
    async fn test_resolve_bad_reference() {
        let fake = FakeCatalog::with_total(10);
        let query = QueryClient::new(fake.clone());

        let bad = CatalogItemSummary { name: "missingno".into(), reference_url: "not-a-url".into() };
        let err = query.resolve(&CardSource::Summary(bad)).await.unwrap_err();
        assert_eq!(err, FetchError::InvalidReference("not-a-url".into()));
        assert!(fake.detail_calls.borrow().is_empty());
    }
}
