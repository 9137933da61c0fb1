// ============================================================================
// RECIPE STORE - Estado del cliente para la app de recetas (RUST + WASM)
// ============================================================================
// - State: RecipeStore (sesión + colecciones) con Rc<RefCell> + subscribers
// - Router: tabla de rutas ordenada con catch-all y páginas lazy
// - Context: provider/hooks de Yew para compartir el store
// - Utils: storage durable (localStorage o memoria) y constantes
// ============================================================================

pub mod config;
pub mod context;
pub mod models;
pub mod router;
pub mod state;
pub mod utils;

pub use config::{AppConfig, CONFIG};
pub use models::{RecipeId, UserCollections, Username};
pub use router::{app_routes, Page, RouteTable};
pub use state::{Collection, CollectionKind, RecipeStore, StoreError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Inicialización del módulo WASM: panic hook + logging
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!(
        "🚀 Recipe store listo ({}, backend {})",
        CONFIG.environment,
        CONFIG.server_domain
    );

    Ok(())
}
