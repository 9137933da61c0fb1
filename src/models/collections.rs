use serde::{Deserialize, Serialize};

use super::RecipeId;

/// Listas de recetas del usuario tal como llegan del backend.
/// Un campo ausente deja intacta la colección correspondiente.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCollections {
    #[serde(default, alias = "favorites")]
    pub favorite_recipe_ids: Option<Vec<RecipeId>>,
    #[serde(default, alias = "lastWatched")]
    pub last_watched_recipe_ids: Option<Vec<RecipeId>>,
    #[serde(default, alias = "myRecipes")]
    pub my_recipe_ids: Option<Vec<RecipeId>>,
    #[serde(default, alias = "liked")]
    pub liked_recipe_ids: Option<Vec<RecipeId>>,
}
