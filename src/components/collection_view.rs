//! Collection View Component
//!
//! The user's collection as a reorderable grid, with clear-all.
//! Uses leptos-dragdrop; dropping a card on another moves it to that slot.

use leptos::prelude::*;

use crate::collection::CollectionController;
use crate::components::{CardActions, CardEvent, ConfirmButton, PokemonCard};
use crate::context::use_app_context;
use crate::models::CardSource;

use leptos_dragdrop::*;

#[component]
pub fn CollectionView() -> impl IntoView {
    let ctx = use_app_context();

    // Fresh mirror on every display so additions from Discover show up
    let controller = RwSignal::new_local(CollectionController::new(ctx.collection_store()));
    controller.update(|c| c.initialize());

    let count = Memo::new(move |_| controller.with(|c| c.len()));
    let is_empty = Memo::new(move |_| controller.with(|c| c.is_empty()));

    let sort = create_sort_signals();
    let on_drop = move |drop: DropResult| {
        log::debug!("reorder {} -> {}", drop.from, drop.to);
        controller.update(|c| c.reorder(drop.from, drop.to));
    };

    let on_card_event = Callback::new(move |event: CardEvent| {
        if let CardEvent::Removed(id) = event {
            controller.update(|c| c.remove_by_id(id));
        }
    });

    let on_clear = Callback::new(move |_: ()| {
        controller.update(|c| c.clear_all());
    });

    move || {
        if is_empty.get() {
            return view! {
                <div class="collection-empty">
                    <div class="collection-empty-icon">"🔍"</div>
                    <h3>"No Pokemon in your collection yet"</h3>
                    <p>"Go to the Discover tab and start adding Pokemon to your collection!"</p>
                </div>
            }
            .into_any();
        }

        view! {
            <div class="collection-view">
                <div class="collection-header">
                    <h2>{move || format!("My Collection ({} Pokemon)", count.get())}</h2>
                    <ConfirmButton
                        label="Clear All"
                        prompt="Remove every Pokemon?"
                        on_confirm=on_clear
                    />
                </div>

                <div class="collection-tip">
                    <p>"Tip: drag and drop cards to reorder your collection!"</p>
                </div>

                <div
                    class="card-grid sortable"
                    on:mousemove=make_on_mousemove(sort)
                    on:mouseup=make_on_mouseup(sort, on_drop)
                    on:mouseleave=make_on_container_leave(sort)
                >
                    // Index is part of the key so handlers are rebuilt after a move
                    <For
                        each=move || controller.with(|c| c.entries().iter().cloned().enumerate().collect::<Vec<_>>())
                        key=|(index, entry)| (entry.id, *index)
                        children=move |(index, entry)| {
                            let is_dragging = move || sort.dragging_read.get() == Some(index);
                            let is_drop_target = move || sort.hover_read.get() == Some(index);
                            let slot_class = move || {
                                let mut c = String::from("sortable-slot");
                                if is_dragging() { c.push_str(" dragging"); }
                                if is_drop_target() { c.push_str(" drop-target"); }
                                c
                            };

                            view! {
                                <div
                                    class=slot_class
                                    on:mousedown=make_on_mousedown(sort, index)
                                    on:mouseenter=make_on_card_mouseenter(sort, index)
                                    on:mouseleave=make_on_mouseleave(sort)
                                >
                                    <PokemonCard
                                        source=CardSource::Detail(entry)
                                        actions=CardActions::COLLECTION
                                        on_event=on_card_event
                                    />
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        }
        .into_any()
    }
}
