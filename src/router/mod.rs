// ============================================================================
// ROUTER MODULE - Tabla de rutas del lado del cliente
// ============================================================================

pub mod error;
pub mod pattern;
pub mod lazy;
pub mod table;
pub mod routes;

pub use error::*;
pub use pattern::{RouteParams, RoutePattern};
pub use lazy::{LazyPage, RouteTarget};
pub use table::*;
pub use routes::{app_routes, Page};
