//! Discovery View Component
//!
//! Infinite feed of catalog cards. A sentinel below the grid asks the feed
//! for the next page whenever it comes within reach of the viewport.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::components::{CardActions, CardEvent, PokemonCard};
use crate::context::use_app_context;
use crate::feed::{load_page, FeedPhase};
use crate::models::CardSource;

/// Sentinel counts as near once 10% of it is within 100px of the viewport
const NEAR_THRESHOLD: f64 = 0.1;
const NEAR_MARGIN: &str = "100px";

type ProximityCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Observer plus the JS callback it calls. Dropping it disconnects the
/// observer before the callback is freed.
struct ProximityWatch {
    observer: IntersectionObserver,
    _callback: ProximityCallback,
}

impl ProximityWatch {
    fn rearm(&self, target: &web_sys::Element) {
        self.observer.unobserve(target);
        self.observer.observe(target);
    }
}

impl Drop for ProximityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_near` every time `target` scrolls into reach
fn observe_proximity(
    target: &web_sys::Element,
    on_near: impl Fn() + 'static,
) -> Result<ProximityWatch, JsValue> {
    let callback = ProximityCallback::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let near = entries
                .iter()
                .any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
            if near {
                on_near();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(NEAR_MARGIN);
    options.set_threshold(&JsValue::from_f64(NEAR_THRESHOLD));

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(target);
    Ok(ProximityWatch { observer, _callback: callback })
}

#[component]
pub fn DiscoveryView() -> impl IntoView {
    let ctx = use_app_context();
    let feed = ctx.feed;

    // Proximity signal: start a page unless the feed suppresses it
    let load_more = move || {
        let Some(request) = feed.try_update(|f| f.request_page()).flatten() else { return };
        let query = ctx.query();
        spawn_local(async move {
            load_page(&query, request, |result| {
                feed.try_update(|f| f.settle(result));
            })
            .await;
        });
    };

    // First page on first display; later displays reuse what is loaded
    if feed.with_untracked(|f| matches!(f.phase(), FeedPhase::Idle)) {
        load_more();
    }

    let sentinel = NodeRef::<leptos::html::Div>::new();
    let watch = StoredValue::new_local(None::<ProximityWatch>);

    Effect::new(move |_| {
        let Some(el) = sentinel.get() else { return };
        if watch.with_value(Option::is_some) {
            return;
        }
        match observe_proximity(&el, load_more) {
            Ok(w) => watch.set_value(Some(w)),
            Err(e) => log::warn!("infinite scroll unavailable: {:?}", e),
        }
    });

    // The observer only reports changes. Re-arm it after each page so a
    // sentinel still in reach asks for the next one.
    Effect::new(move |_| {
        let ready = feed.with(|f| matches!(f.phase(), FeedPhase::Ready));
        if !ready {
            return;
        }
        let Some(el) = sentinel.get_untracked() else { return };
        watch.with_value(|w| {
            if let Some(w) = w {
                w.rearm(&el);
            }
        });
    });

    on_cleanup(move || {
        watch.try_update_value(|w| w.take());
    });

    let on_card_event = Callback::new(move |event: CardEvent| {
        if let CardEvent::Added(id) = event {
            log::info!("added #{} to collection", id);
        }
    });

    let first_loading = move || feed.with(|f| matches!(f.phase(), FeedPhase::Idle | FeedPhase::Loading));
    let loading_more = move || feed.with(|f| matches!(f.phase(), FeedPhase::LoadingMore));
    let progress = move || {
        feed.with(|f| {
            f.total()
                .filter(|_| !f.items().is_empty())
                .map(|total| format!("Showing {} of {} Pokemon", f.items().len(), total))
        })
    };
    let finished = move || feed.with(|f| matches!(f.phase(), FeedPhase::Exhausted) && !f.items().is_empty());

    view! {
        <div class="discovery-view">
            <Show when=first_loading>
                <div class="feed-status">
                    <div class="spinner"></div>
                    <span>"Loading Pokemon..."</span>
                </div>
            </Show>

            <p class="feed-progress">{progress}</p>

            <div class="card-grid">
                <For
                    each=move || feed.with(|f| f.items().to_vec())
                    key=|summary| summary.name.clone()
                    children=move |summary| {
                        view! {
                            <PokemonCard
                                source=CardSource::Summary(summary)
                                actions=CardActions::DISCOVER
                                on_event=on_card_event
                            />
                        }
                    }
                />
            </div>

            <div class="feed-sentinel" node_ref=sentinel>
                <Show when=loading_more>
                    <div class="feed-status">
                        <div class="spinner small"></div>
                        <span>"Loading more Pokemon..."</span>
                    </div>
                </Show>
            </div>

            {move || feed.with(|f| f.error().map(|e| e.to_string())).map(|detail| view! {
                <div class="feed-error">
                    <p>"Error loading Pokemon. Please try again."</p>
                    <p class="feed-error-detail">{detail}</p>
                </div>
            })}

            <Show when=finished>
                <p class="feed-end">"You've discovered all Pokemon!"</p>
            </Show>
        </div>
    }
}
