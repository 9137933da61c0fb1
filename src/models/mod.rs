pub mod recipe_id;
pub mod username;
pub mod collections;

pub use recipe_id::RecipeId;
pub use username::Username;
pub use collections::UserCollections;
