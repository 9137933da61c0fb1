// ============================================================================
// ROUTE TABLE - path -> página, en orden de registro, con catch-all final
// ============================================================================

use std::collections::HashSet;
use std::future::Future;

use super::lazy::{LazyPage, RouteTarget};
use super::pattern::{split_path, RoutePattern, RouteParams};
use super::RouteError;

#[derive(Debug)]
pub struct RouteEntry<P: Clone> {
    pub name: String,
    pub pattern: RoutePattern,
    pub target: RouteTarget<P>,
}

/// Resultado de resolver un path (síncrono; la página puede ser lazy)
#[derive(Debug)]
pub struct RouteMatch<'a, P: Clone> {
    pub entry: &'a RouteEntry<P>,
    pub params: RouteParams,
    not_found: bool,
}

impl<'a, P: Clone + 'static> RouteMatch<'a, P> {
    pub fn name(&self) -> &'a str {
        &self.entry.name
    }

    /// Solo casó el catch-all (equivalente a un 404)
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub async fn page(&self) -> P {
        self.entry.target.page().await
    }
}

/// Ruta resuelta con la página ya cargada
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute<P> {
    pub name: String,
    pub params: RouteParams,
    pub page: P,
    pub not_found: bool,
}

/// Tabla de rutas inmutable. Siempre tiene exactamente un catch-all,
/// que se evalúa después de todas las demás entradas.
#[derive(Debug)]
pub struct RouteTable<P: Clone> {
    entries: Vec<RouteEntry<P>>,
    catch_all: RouteEntry<P>,
}

impl<P: Clone + 'static> RouteTable<P> {
    pub fn builder() -> RouteTableBuilder<P> {
        RouteTableBuilder::new()
    }

    /// Nunca falla: si nada casa, resuelve el catch-all
    pub fn resolve(&self, path: &str) -> RouteMatch<'_, P> {
        let segments = split_path(path);

        for entry in &self.entries {
            if let Some(params) = entry.pattern.match_segments(&segments) {
                log::debug!("🧭 [ROUTER] {} -> {}", path, entry.name);
                return RouteMatch {
                    entry,
                    params,
                    not_found: false,
                };
            }
        }

        log::debug!("🧭 [ROUTER] {} -> {} (no encontrada)", path, self.catch_all.name);
        let params = self
            .catch_all
            .pattern
            .match_segments(&segments)
            .unwrap_or_default();
        RouteMatch {
            entry: &self.catch_all,
            params,
            not_found: true,
        }
    }

    /// Resolver y cargar la página (ejecuta el loader lazy si hace falta)
    pub async fn resolve_page(&self, path: &str) -> ResolvedRoute<P> {
        let route = self.resolve(path);
        let page = route.page().await;
        ResolvedRoute {
            name: route.entry.name.clone(),
            params: route.params,
            page,
            not_found: route.not_found,
        }
    }

    /// Path de una ruta por nombre; `None` si no existe o faltan parámetros
    pub fn path_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        self.get(name)?.pattern.build(params)
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry<P>> {
        self.entries()
            .find(|entry| entry.name == name)
    }

    /// Todas las entradas en orden de evaluación (catch-all al final)
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<P>> {
        self.entries.iter().chain(std::iter::once(&self.catch_all))
    }
}

/// Builder de la tabla. El primer error se guarda y lo devuelve `build`.
pub struct RouteTableBuilder<P: Clone> {
    entries: Vec<RouteEntry<P>>,
    catch_all: Option<RouteEntry<P>>,
    names: HashSet<String>,
    error: Option<RouteError>,
}

impl<P: Clone + 'static> RouteTableBuilder<P> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            catch_all: None,
            names: HashSet::new(),
            error: None,
        }
    }

    /// Ruta con página cargada de entrada
    pub fn page(self, pattern: &str, name: &str, page: P) -> Self {
        self.register(pattern, name, RouteTarget::Eager(page))
    }

    /// Ruta cuya página se carga al navegar por primera vez
    pub fn lazy<F, Fut>(self, pattern: &str, name: &str, loader: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = P> + 'static,
    {
        self.register(pattern, name, RouteTarget::Lazy(LazyPage::new(loader)))
    }

    fn register(mut self, pattern: &str, name: &str, target: RouteTarget<P>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let pattern = match RoutePattern::parse(pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                self.error = Some(e);
                return self;
            }
        };

        if !self.names.insert(name.to_string()) {
            self.error = Some(RouteError::DuplicateName(name.to_string()));
            return self;
        }

        let entry = RouteEntry {
            name: name.to_string(),
            pattern,
            target,
        };

        // El catch-all se guarda aparte: siempre va último aunque se registre antes
        if entry.pattern.is_catch_all() {
            if self.catch_all.is_some() {
                self.error = Some(RouteError::DuplicateCatchAll(entry.pattern.as_str().to_string()));
            } else {
                self.catch_all = Some(entry);
            }
        } else {
            self.entries.push(entry);
        }
        self
    }

    pub fn build(self) -> Result<RouteTable<P>, RouteError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let catch_all = self.catch_all.ok_or(RouteError::MissingCatchAll)?;
        Ok(RouteTable {
            entries: self.entries,
            catch_all,
        })
    }
}
