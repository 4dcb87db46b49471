//! Pokemon Card Component
//!
//! One catalog item. Resolves the full detail when handed a bare list entry
//! and offers add/remove actions against the stored collection.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::error::FetchError;
use crate::models::{type_color, CardSource, CatalogItemDetail, CARD_STATS};

/// What happened on a card, reported to whoever renders it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEvent {
    Added(u32),
    Removed(u32),
}

/// Which action buttons a card shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardActions {
    pub add: bool,
    pub remove: bool,
}

impl CardActions {
    pub const DISCOVER: Self = Self { add: true, remove: false };
    pub const COLLECTION: Self = Self { add: false, remove: true };
}

type DetailState = Option<Result<CatalogItemDetail, FetchError>>;

#[component]
pub fn PokemonCard(
    source: CardSource,
    actions: CardActions,
    #[prop(into)] on_event: Callback<CardEvent>,
) -> impl IntoView {
    let ctx = use_app_context();

    let initial: DetailState = match &source {
        CardSource::Detail(detail) => Some(Ok(detail.clone())),
        CardSource::Summary(summary) => summary.id().and_then(|id| ctx.query().cached_detail(id)).map(Ok),
    };
    let needs_fetch = initial.is_none();
    let (detail, set_detail) = signal(initial);
    let (is_added, set_is_added) = signal(false);

    if needs_fetch {
        let query = ctx.query();
        spawn_local(async move {
            let result = query.resolve(&source).await;
            // The card may have been unmounted while the lookup was in flight
            let _ = set_detail.try_set(Some(result));
        });
    }

    // Disable "add" for anything already collected
    Effect::new(move |_| {
        let id = detail.with(|d| d.as_ref().and_then(|r| r.as_ref().ok()).map(|d| d.id));
        if let Some(id) = id {
            set_is_added.set(ctx.collection_store().contains(id));
        }
    });

    let resolved = move || detail.with_untracked(|d| d.as_ref().and_then(|r| r.as_ref().ok()).cloned());

    let on_add = move |_: web_sys::MouseEvent| {
        let Some(entry) = resolved() else { return };
        ctx.collection_store().add(&entry);
        set_is_added.set(true);
        on_event.run(CardEvent::Added(entry.id));
    };

    let on_remove = move |_: web_sys::MouseEvent| {
        let Some(entry) = resolved() else { return };
        ctx.collection_store().remove(entry.id);
        set_is_added.set(false);
        on_event.run(CardEvent::Removed(entry.id));
    };

    move || match detail.get() {
        None => view! {
            <div class="pokemon-card loading">
                <div class="spinner"></div>
            </div>
        }
        .into_any(),
        Some(Err(e)) => view! {
            <div class="pokemon-card failed">
                <p class="card-error">{e.to_string()}</p>
            </div>
        }
        .into_any(),
        Some(Ok(d)) => {
            let types = d
                .types
                .iter()
                .map(|t| {
                    let name = t.type_name().to_string();
                    let style = format!("background-color: {};", type_color(&name));
                    view! { <span class="type-badge" style=style>{name}</span> }
                })
                .collect_view();
            let stats = CARD_STATS
                .iter()
                .map(|(key, label)| {
                    view! {
                        <div class="card-stat">
                            <p class="card-stat-label">{*label}</p>
                            <p class="card-stat-value">{d.base_stat(key)}</p>
                        </div>
                    }
                })
                .collect_view();

            view! {
                <div class="pokemon-card">
                    <div class="card-header">
                        <img class="card-sprite" src=d.sprite_or_placeholder().to_string() alt=d.name.clone() />
                        <h3 class="card-name">{d.display_name()}</h3>
                        <p class="card-number">{d.display_number()}</p>
                    </div>

                    <div class="card-types">{types}</div>
                    <div class="card-stats">{stats}</div>

                    {actions.add.then(|| view! {
                        <button
                            class=move || if is_added.get() { "card-btn added" } else { "card-btn add" }
                            disabled=move || is_added.get()
                            on:click=on_add
                        >
                            {move || if is_added.get() { "+ Added to Collection" } else { "+ Add to Collection" }}
                        </button>
                    })}

                    {actions.remove.then(|| view! {
                        <button class="card-btn remove" on:click=on_remove>
                            "- Remove from Collection"
                        </button>
                    })}
                </div>
            }
            .into_any()
        }
    }
}
