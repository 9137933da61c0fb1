// ============================================================================
// ROUTES - Rutas de la app de recetas
// ============================================================================

use std::fmt;

use super::{RouteError, RouteTable};

/// Páginas de la app. La capa de UI decide cómo renderizar cada una.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Main,
    Register,
    Login,
    Search,
    RecipeView,
    About,
    MyFavorites,
    MyRecipes,
    MyFamilyRecipes,
    NotFound,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Main => "Main",
            Page::Register => "Register",
            Page::Login => "Login",
            Page::Search => "Search",
            Page::RecipeView => "Recipe",
            Page::About => "About",
            Page::MyFavorites => "My Favorites",
            Page::MyRecipes => "My Recipes",
            Page::MyFamilyRecipes => "My Family Recipes",
            Page::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Loader de una página diferida
async fn load_page(page: Page) -> Page {
    log::info!("📦 [ROUTER] Cargando página {}", page);
    page
}

/// Tabla de rutas de la app.
/// Las páginas secundarias se cargan al navegar; la principal, las listas
/// del usuario y "not found" están disponibles desde el inicio.
pub fn app_routes() -> Result<RouteTable<Page>, RouteError> {
    RouteTable::builder()
        .page("/", "main", Page::Main)
        .lazy("/register", "register", || load_page(Page::Register))
        .lazy("/login", "login", || load_page(Page::Login))
        .lazy("/search", "search", || load_page(Page::Search))
        .lazy("/recipe/:recipeId", "recipe", || load_page(Page::RecipeView))
        .page("/:catchAll(.*)", "notFound", Page::NotFound)
        .lazy("/about", "about", || load_page(Page::About))
        .page("/favorites", "myfavorites", Page::MyFavorites)
        .page("/my-recipes", "myrecipes", Page::MyRecipes)
        .page("/family-recipes", "myfamilyrecipes", Page::MyFamilyRecipes)
        .build()
}
