//! Pokedex Collection App
//!
//! Root component: builds the session services once, provides them through
//! context, and shows the tab bar with the active view.

use leptos::prelude::*;

use crate::api::CatalogClient;
use crate::collection::CollectionStore;
use crate::components::{CollectionView, DiscoveryView, Tab, TabBar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::query::QueryClient;
use crate::storage::AppStorage;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let query = QueryClient::new(CatalogClient::from_config(&config));
    let store = CollectionStore::new(AppStorage::detect(), config.storage_key.clone());

    // Provide context to all children
    provide_context(AppContext::new(query, store, config.page_size));

    let (current_tab, set_current_tab) = signal(Tab::Discover);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Pokemon Discovery"</h1>
                <p>"Discover Pokemon and build your personal collection"</p>
            </header>

            <TabBar current_tab=current_tab set_current_tab=set_current_tab />

            // Only the active view is mounted
            <main class="tab-content">
                {move || match current_tab.get() {
                    Tab::Discover => view! { <DiscoveryView /> }.into_any(),
                    Tab::Collection => view! { <CollectionView /> }.into_any(),
                }}
            </main>
        </div>
    }
}
