pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::shared::config::load_config;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = load_config();
    log::set_max_level(config.log_level().to_level_filter());

    leptos::mount::mount_to_body(move || view! { <app::App config=config.clone() /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
