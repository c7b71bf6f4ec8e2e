#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod assets;
pub mod motion;
pub mod particles;
pub mod profile;
pub mod reveal;
pub mod stage;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    // a second init (hot reload) is harmless
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
