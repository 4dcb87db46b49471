//! Tab Bar Component
//!
//! Switches the main area between the Discover feed and the collection.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Discover,
    Collection,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Discover, Tab::Collection];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Discover => "Discover Pokemon",
            Tab::Collection => "My Collection",
        }
    }
}

/// Tab Bar component
#[component]
pub fn TabBar(
    current_tab: ReadSignal<Tab>,
    set_current_tab: WriteSignal<Tab>,
) -> impl IntoView {
    view! {
        <nav class="tab-bar">
            {Tab::ALL.iter().map(|tab| {
                let tab = *tab;
                let tab_class = move || {
                    if current_tab.get() == tab { "tab active" } else { "tab" }
                };
                view! {
                    <button
                        class=tab_class
                        on:click=move |_| set_current_tab.set(tab)
                    >
                        {tab.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
