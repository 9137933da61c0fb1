// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Identificador devuelto por `subscribe`, sirve para `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Valor reactivo compartido.
///
/// Los clones son handles al MISMO contenedor y a la MISMA lista de
/// subscribers: quien guarde un handle ve todas las mutaciones posteriores.
/// Solo el crate puede mutar; los componentes leen y se suscriben.
pub struct Reactive<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Callback)>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T> Reactive<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Leer el valor vivo sin copiarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Copia del valor actual
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// ¿Ambos handles apuntan al mismo contenedor?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }

    /// Suscribirse a cambios. El callback corre después de cada mutación completa.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Devuelve false si la suscripción ya no existía
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Reemplazar el contenido y notificar
    pub(crate) fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutar en sitio y notificar
    pub(crate) fn update<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        let result = self.mutate(updater);
        self.notify();
        result
    }

    /// Mutar sin notificar; el llamador debe llamar `notify` cuando
    /// todas las mutaciones relacionadas hayan terminado
    pub(crate) fn mutate<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        updater(&mut self.value.borrow_mut())
    }

    /// Notificar a todos los subscribers.
    /// Ningún borrow queda activo mientras corren los callbacks, así que
    /// pueden leer (o volver a mutar) el estado.
    pub(crate) fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in callbacks {
            callback();
        }
    }
}

impl<T: PartialEq> Reactive<Vec<T>> {
    pub fn len(&self) -> usize {
        self.value.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.borrow().is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.value.borrow().contains(item)
    }
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

/// Igualdad por identidad del contenedor (sirve como dependencia de hooks)
impl<T> PartialEq for Reactive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: fmt::Debug> fmt::Debug for Reactive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactive")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_clones_share_value_and_subscribers() {
        let state = Reactive::new(vec![1]);
        let handle = state.clone();
        let (count, callback) = counter();
        handle.subscribe(callback);

        state.update(|v| v.push(2));

        assert_eq!(handle.get(), vec![1, 2]);
        assert!(handle.ptr_eq(&state));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let state = Reactive::new(0);
        let (count, callback) = counter();
        let id = state.subscribe(callback);

        state.set(1);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set(2);

        assert_eq!(count.get(), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn test_mutate_defers_until_notify() {
        let state = Reactive::new(String::new());
        let (count, callback) = counter();
        state.subscribe(callback);

        state.mutate(|s| s.push_str("ab"));
        assert_eq!(count.get(), 0);
        state.notify();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_callback_can_read_state() {
        let state = Reactive::new(vec![0u8; 0]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let reader = state.clone();
            let seen = seen.clone();
            state.subscribe(move || seen.borrow_mut().push(reader.len()));
        }

        state.update(|v| v.extend([1, 2, 3]));
        state.set(vec![]);

        assert_eq!(*seen.borrow(), vec![3, 0]);
    }
}
