//! UI Components
//!
//! Reusable Leptos components.

mod pokemon_card;
mod discovery_view;
mod collection_view;
mod tab_bar;
mod confirm_button;

pub use pokemon_card::{CardActions, CardEvent, PokemonCard};
pub use discovery_view::DiscoveryView;
pub use collection_view::CollectionView;
pub use tab_bar::{Tab, TabBar};
pub use confirm_button::ConfirmButton;
