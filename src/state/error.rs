use thiserror::Error;

/// Errores visibles del store. Los fallos de storage nunca llegan aquí:
/// se registran con warn y el store sigue en memoria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("nombre de usuario inválido: {0:?}")]
    InvalidUsername(String),
}
