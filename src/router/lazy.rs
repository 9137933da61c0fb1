// ============================================================================
// LAZY PAGE - Páginas que se cargan la primera vez que se navega a ellas
// ============================================================================
// Unresolved -> Loading(futuro compartido) -> Resolved(página)
// Varias navegaciones simultáneas esperan el mismo futuro: un solo load.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

pub type PageFuture<P> = LocalBoxFuture<'static, P>;
type Loader<P> = Box<dyn Fn() -> PageFuture<P>>;

enum LazyState<P: Clone> {
    Unresolved,
    Loading(Shared<PageFuture<P>>),
    Resolved(P),
}

pub struct LazyPage<P: Clone> {
    loader: Loader<P>,
    state: RefCell<LazyState<P>>,
    loads: Cell<usize>,
}

impl<P: Clone + 'static> LazyPage<P> {
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = P> + 'static,
    {
        Self {
            loader: Box::new(move || loader().boxed_local()),
            state: RefCell::new(LazyState::Unresolved),
            loads: Cell::new(0),
        }
    }

    /// Devuelve la página, ejecutando el loader solo la primera vez
    pub async fn load(&self) -> P {
        let pending = {
            let mut state = self.state.borrow_mut();
            match &*state {
                LazyState::Resolved(page) => return page.clone(),
                LazyState::Loading(pending) => pending.clone(),
                LazyState::Unresolved => {
                    self.loads.set(self.loads.get() + 1);
                    let pending = (self.loader)().shared();
                    *state = LazyState::Loading(pending.clone());
                    pending
                }
            }
        };

        let page = pending.await;
        *self.state.borrow_mut() = LazyState::Resolved(page.clone());
        page
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.state.borrow(), LazyState::Resolved(_))
    }

    /// Cuántas veces corrió el loader (0 o 1)
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}

impl<P: Clone> fmt::Debug for LazyPage<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.state.borrow() {
            LazyState::Unresolved => "unresolved",
            LazyState::Loading(_) => "loading",
            LazyState::Resolved(_) => "resolved",
        };
        f.debug_struct("LazyPage").field("state", &state).finish()
    }
}

/// Destino de una ruta: página ya disponible o loader diferido
#[derive(Debug)]
pub enum RouteTarget<P: Clone> {
    Eager(P),
    Lazy(LazyPage<P>),
}

impl<P: Clone + 'static> RouteTarget<P> {
    pub async fn page(&self) -> P {
        match self {
            RouteTarget::Eager(page) => page.clone(),
            RouteTarget::Lazy(lazy) => lazy.load().await,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, RouteTarget::Lazy(_))
    }

    pub fn is_loaded(&self) -> bool {
        match self {
            RouteTarget::Eager(_) => true,
            RouteTarget::Lazy(lazy) => lazy.is_resolved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::rc::Rc;
    use std::task::Poll;

    /// Cede el control una vez para que otro futuro avance
    async fn yield_now() {
        let mut yielded = false;
        futures::future::poll_fn(move |cx| {
            if yielded {
                Poll::Ready(())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }

    fn counting_page(calls: Rc<Cell<usize>>) -> LazyPage<&'static str> {
        LazyPage::new(move || {
            calls.set(calls.get() + 1);
            async {
                yield_now().await;
                "recipe"
            }
        })
    }

    #[test]
    fn test_loader_runs_once_and_caches() {
        let calls = Rc::new(Cell::new(0));
        let lazy = counting_page(calls.clone());
        assert!(!lazy.is_resolved());

        assert_eq!(block_on(lazy.load()), "recipe");
        assert_eq!(block_on(lazy.load()), "recipe");

        assert!(lazy.is_resolved());
        assert_eq!(calls.get(), 1);
        assert_eq!(lazy.load_count(), 1);
    }

    #[test]
    fn test_concurrent_first_loads_coalesce() {
        let calls = Rc::new(Cell::new(0));
        let lazy = counting_page(calls.clone());

        let (a, b, c) = block_on(async { futures::join!(lazy.load(), lazy.load(), lazy.load()) });

        assert_eq!((a, b, c), ("recipe", "recipe", "recipe"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_loader_not_called_until_navigated() {
        let calls = Rc::new(Cell::new(0));
        let target = RouteTarget::Lazy(counting_page(calls.clone()));

        assert!(target.is_lazy());
        assert!(!target.is_loaded());
        assert_eq!(calls.get(), 0);

        assert_eq!(block_on(target.page()), "recipe");
        assert!(target.is_loaded());
    }

    #[test]
    fn test_eager_target_is_always_loaded() {
        let target = RouteTarget::Eager(7u8);
        assert!(target.is_loaded());
        assert_eq!(block_on(target.page()), 7);
    }
}
