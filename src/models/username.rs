use std::fmt;

use crate::state::StoreError;

/// Nombre del usuario con sesión iniciada. Nunca vacío.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Guarda el texto tal cual; rechaza nombres vacíos o solo con espacios
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        if raw.trim().is_empty() {
            return Err(StoreError::InvalidUsername(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Username {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_raw_text() {
        assert_eq!(Username::parse("  alice ").unwrap(), "  alice ");
        assert_eq!(Username::parse("Ana María").unwrap().as_str(), "Ana María");
    }

    #[test]
    fn test_parse_rejects_blank_names() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(
                Username::parse(raw),
                Err(StoreError::InvalidUsername(raw.to_string()))
            );
        }
    }
}
