// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod error;
pub mod recipe_store;

pub use reactivity::*;
pub use error::*;
pub use recipe_store::*;
