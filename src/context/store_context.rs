// ============================================================================
// STORE CONTEXT - Compartir el RecipeStore entre componentes
// ============================================================================
// Usa Context API de Yew: el store se construye una vez (en main) y se pasa
// al provider; los componentes lo leen con hooks que re-renderizan al cambiar.
// ============================================================================

use yew::prelude::*;

use crate::models::{RecipeId, Username};
use crate::state::{CollectionKind, Reactive, RecipeStore};

#[derive(Properties, PartialEq)]
pub struct StoreProviderProps {
    pub store: RecipeStore,
    pub children: Children,
}

/// Provider que envuelve la app y expone el store
#[function_component(StoreProvider)]
pub fn store_provider(props: &StoreProviderProps) -> Html {
    html! {
        <ContextProvider<RecipeStore> context={props.store.clone()}>
            {props.children.clone()}
        </ContextProvider<RecipeStore>>
    }
}

/// Store del contexto. Sin provider se crea uno local respaldado por
/// localStorage, así la sesión sigue siendo la misma.
#[hook]
pub fn use_recipe_store() -> RecipeStore {
    let context = use_context::<RecipeStore>();
    let fallback = use_memo(context.is_some(), |has_provider| {
        (!has_provider).then(|| {
            log::warn!("⚠️ [CONTEXT] use_recipe_store sin StoreProvider, usando store local");
            RecipeStore::in_browser()
        })
    });

    match (context, fallback.as_ref()) {
        (Some(store), _) => store,
        (None, Some(store)) => store.clone(),
        (None, None) => RecipeStore::in_browser(),
    }
}

/// Valor actual de un campo reactivo; el componente se re-renderiza
/// después de cada mutación y se desuscribe al desmontarse
#[hook]
pub fn use_reactive<T>(state: &Reactive<T>) -> T
where
    T: Clone + 'static,
{
    let trigger = use_force_update();

    use_effect_with(state.clone(), move |state| {
        let id = state.subscribe(move || trigger.force_update());
        let state = state.clone();
        move || {
            state.unsubscribe(id);
        }
    });

    state.get()
}

/// Usuario con sesión (`None` = anónimo)
#[hook]
pub fn use_session_user() -> Option<Username> {
    let store = use_recipe_store();
    use_reactive(&store.session())
}

/// Contenido actual de una de las colecciones del usuario
#[hook]
pub fn use_collection(kind: CollectionKind) -> Vec<RecipeId> {
    let store = use_recipe_store();
    use_reactive(&store.collection(kind))
}
