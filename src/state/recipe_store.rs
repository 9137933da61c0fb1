// ============================================================================
// RECIPE STORE - Sesión del usuario + colecciones de recetas
// ============================================================================
// Única fuente de verdad de "quién está logueado" y "qué recetas son suyas".
// Se construye explícitamente (sin singleton) y se comparte por contexto.
// Solo el usuario se persiste; las colecciones viven lo que dura el proceso.
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::models::{RecipeId, UserCollections, Username};
use crate::state::{Reactive, StoreError};
use crate::utils::{browser_or_memory_storage, SessionStorage, STORAGE_KEY_USERNAME};

/// Lista ordenada de recetas observable
pub type Collection = Reactive<Vec<RecipeId>>;

/// Usuario actual observable (`None` = anónimo)
pub type SessionField = Reactive<Option<Username>>;

/// Las cuatro colecciones por usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Favorites,
    LastWatched,
    MyRecipes,
    Liked,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Favorites,
        CollectionKind::LastWatched,
        CollectionKind::MyRecipes,
        CollectionKind::Liked,
    ];
}

#[derive(Clone)]
pub struct RecipeStore {
    storage: Rc<dyn SessionStorage>,
    username: SessionField,
    favorite_recipe_ids: Collection,
    last_watched_recipe_ids: Collection,
    my_recipe_ids: Collection,
    liked_recipe_ids: Collection,
}

impl RecipeStore {
    /// Crear el store y rehidratar la sesión desde el storage
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        let username = Self::rehydrate(storage.as_ref());

        Self {
            storage,
            username: Reactive::new(username),
            favorite_recipe_ids: Reactive::new(Vec::new()),
            last_watched_recipe_ids: Reactive::new(Vec::new()),
            my_recipe_ids: Reactive::new(Vec::new()),
            liked_recipe_ids: Reactive::new(Vec::new()),
        }
    }

    /// Store respaldado por localStorage (o memoria si no está disponible)
    pub fn in_browser() -> Self {
        Self::new(browser_or_memory_storage())
    }

    fn rehydrate(storage: &dyn SessionStorage) -> Option<Username> {
        match storage.get_item(STORAGE_KEY_USERNAME) {
            Ok(Some(raw)) => match Username::parse(&raw) {
                Ok(username) => {
                    log::info!("💾 [STORE] Sesión restaurada para {}", username);
                    Some(username)
                }
                Err(e) => {
                    log::warn!("⚠️ [STORE] Usuario guardado ignorado: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("⚠️ [STORE] No se pudo leer la sesión: {}", e);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Sesión
    // ------------------------------------------------------------------

    /// Iniciar sesión. La autenticación contra el backend ya la hizo el llamador.
    pub fn login(&self, username: &str) -> Result<(), StoreError> {
        let username = Username::parse(username)?;

        if let Err(e) = self.storage.set_item(STORAGE_KEY_USERNAME, username.as_str()) {
            log::warn!("⚠️ [STORE] Sesión solo en memoria: {}", e);
        }

        log::info!("🔐 [STORE] login {}", username);
        self.username.set(Some(username));
        Ok(())
    }

    /// Cerrar sesión y vaciar las cuatro colecciones en sitio.
    /// Los subscribers solo corren cuando todo quedó limpio.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove_item(STORAGE_KEY_USERNAME) {
            log::warn!("⚠️ [STORE] No se pudo borrar la sesión guardada: {}", e);
        }

        log::info!("🚪 [STORE] logout");
        self.username.mutate(|username| *username = None);
        for collection in self.collections() {
            collection.mutate(Vec::clear);
        }

        self.username.notify();
        for collection in self.collections() {
            collection.notify();
        }
    }

    pub fn username(&self) -> Option<Username> {
        self.username.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.with(Option::is_some)
    }

    /// Handle vivo del usuario actual
    pub fn session(&self) -> SessionField {
        self.username.clone()
    }

    // ------------------------------------------------------------------
    // Colecciones (handles vivos, no copias)
    // ------------------------------------------------------------------

    pub fn favorite_recipe_ids(&self) -> Collection {
        self.favorite_recipe_ids.clone()
    }

    pub fn last_watched_recipe_ids(&self) -> Collection {
        self.last_watched_recipe_ids.clone()
    }

    pub fn my_recipe_ids(&self) -> Collection {
        self.my_recipe_ids.clone()
    }

    pub fn liked_recipe_ids(&self) -> Collection {
        self.liked_recipe_ids.clone()
    }

    pub fn collection(&self, kind: CollectionKind) -> Collection {
        match kind {
            CollectionKind::Favorites => self.favorite_recipe_ids(),
            CollectionKind::LastWatched => self.last_watched_recipe_ids(),
            CollectionKind::MyRecipes => self.my_recipe_ids(),
            CollectionKind::Liked => self.liked_recipe_ids(),
        }
    }

    fn collections(&self) -> [&Collection; 4] {
        [
            &self.favorite_recipe_ids,
            &self.last_watched_recipe_ids,
            &self.my_recipe_ids,
            &self.liked_recipe_ids,
        ]
    }

    pub fn set_favorites<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        Self::replace(&self.favorite_recipe_ids, ids);
    }

    pub fn set_last_watched<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        Self::replace(&self.last_watched_recipe_ids, ids);
    }

    pub fn set_my_recipes<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        Self::replace(&self.my_recipe_ids, ids);
    }

    /// Reemplazo completo, sin deduplicar (igual que las otras listas);
    /// solo `add_liked` garantiza unicidad
    pub fn set_liked<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        Self::replace(&self.liked_recipe_ids, ids);
    }

    /// Añade la receta a "liked" si no estaba. Devuelve true si la añadió.
    pub fn add_liked(&self, id: impl Into<RecipeId>) -> bool {
        let id = id.into();
        if self.liked_recipe_ids.contains(&id) {
            return false;
        }
        self.liked_recipe_ids.update(|liked| liked.push(id));
        true
    }

    /// Aplicar de una vez las listas que mandó el backend.
    /// Las listas ausentes no se tocan.
    pub fn apply_collections(&self, payload: UserCollections) {
        let updates = [
            (&self.favorite_recipe_ids, payload.favorite_recipe_ids),
            (&self.last_watched_recipe_ids, payload.last_watched_recipe_ids),
            (&self.my_recipe_ids, payload.my_recipe_ids),
            (&self.liked_recipe_ids, payload.liked_recipe_ids),
        ];

        let mut touched = Vec::new();
        for (collection, ids) in updates {
            if let Some(ids) = ids {
                collection.mutate(|current| *current = ids);
                touched.push(collection);
            }
        }

        log::debug!("📥 [STORE] {} colecciones actualizadas", touched.len());
        for collection in touched {
            collection.notify();
        }
    }

    fn replace<I>(collection: &Collection, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        collection.update(|current| {
            current.clear();
            current.extend(ids.into_iter().map(Into::into));
        });
    }
}

/// Igualdad por identidad: dos stores son iguales si comparten estado
impl PartialEq for RecipeStore {
    fn eq(&self, other: &Self) -> bool {
        self.username.ptr_eq(&other.username)
    }
}

impl fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeStore")
            .field("username", &self.username)
            .field("favorite_recipe_ids", &self.favorite_recipe_ids)
            .field("last_watched_recipe_ids", &self.last_watched_recipe_ids)
            .field("my_recipe_ids", &self.my_recipe_ids)
            .field("liked_recipe_ids", &self.liked_recipe_ids)
            .finish()
    }
}
