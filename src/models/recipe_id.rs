use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identificador de receta.
/// El backend lo manda como número o como string; aquí siempre es string,
/// así `42` y `"42"` son la misma receta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&RecipeId> for RecipeId {
    fn from(id: &RecipeId) -> Self {
        id.clone()
    }
}

macro_rules! recipe_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RecipeId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

recipe_id_from_integer!(i32, i64, u32, u64, usize);

impl PartialEq<str> for RecipeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecipeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecipeId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawRecipeId::deserialize(deserializer)? {
            RawRecipeId::Text(id) => Self(id),
            RawRecipeId::Number(id) => Self(id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_strings_normalize_to_same_id() {
        let ids: Vec<RecipeId> = serde_json::from_str(r#"[42, "42", "abc-7"]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[0], RecipeId::from(42));
        assert_eq!(ids[2], "abc-7");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![RecipeId::from(7u64), RecipeId::from("x")]).unwrap();
        assert_eq!(json, r#"["7","x"]"#);
    }

    #[test]
    fn test_rejects_non_scalar_ids() {
        assert!(serde_json::from_str::<RecipeId>(r#"{"id": 1}"#).is_err());
        assert!(serde_json::from_str::<RecipeId>("null").is_err());
    }
}
