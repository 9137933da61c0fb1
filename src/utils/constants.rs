/// Clave de localStorage donde vive el usuario de la sesión.
/// El valor es el nombre de usuario en crudo (sin JSON).
pub const STORAGE_KEY_USERNAME: &str = "username";
