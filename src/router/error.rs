use thiserror::Error;

/// Errores al construir la tabla de rutas. Resolver nunca falla.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("patrón de ruta inválido '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("nombre de ruta duplicado: {0}")]
    DuplicateName(String),
    #[error("ya existe una ruta catch-all, no se puede registrar '{0}'")]
    DuplicateCatchAll(String),
    #[error("la tabla de rutas necesita una ruta catch-all")]
    MissingCatchAll,
}
