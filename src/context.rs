//! Application Context
//!
//! Session-wide services provided via Leptos Context API. Built once in
//! `App`; components pull them out with [`use_app_context`].

use std::num::NonZeroU32;

use leptos::prelude::*;

use crate::collection::CollectionStore;
use crate::feed::DiscoveryFeed;
use crate::query::QueryClient;
use crate::storage::AppStorage;

/// Handles are arena-backed so the context stays `Copy` while the values
/// behind them (fetch client, `web_sys::Storage`) live on the main thread only.
#[derive(Clone, Copy)]
pub struct AppContext {
    query: StoredValue<QueryClient, LocalStorage>,
    store: StoredValue<CollectionStore<AppStorage>, LocalStorage>,
    /// Discovery results, kept across tab switches
    pub feed: RwSignal<DiscoveryFeed>,
}

impl AppContext {
    pub fn new(query: QueryClient, store: CollectionStore<AppStorage>, page_size: NonZeroU32) -> Self {
        Self {
            query: StoredValue::new_local(query),
            store: StoredValue::new_local(store),
            feed: RwSignal::new(DiscoveryFeed::new(page_size)),
        }
    }

    pub fn query(&self) -> QueryClient {
        self.query.get_value()
    }

    pub fn collection_store(&self) -> CollectionStore<AppStorage> {
        self.store.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
