pub mod shared;

use shared::search_form::{bind_document, PersisterConfig};
use wasm_bindgen::prelude::wasm_bindgen;

fn bind_search_form() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    bind_document(PersisterConfig::default());
}

#[wasm_bindgen(start)]
pub fn start() {
    bind_search_form();
}
