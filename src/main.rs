//! Pokedex Collection Frontend Entry Point

mod api;
mod app;
mod collection;
mod components;
mod config;
mod context;
mod error;
mod feed;
mod logging;
mod models;
mod query;
mod storage;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    log::info!("catalog at {}, {} per page", config.api_base_url, config.page_size);

    mount_to_body(move || view! { <App config=config /> });
}
