use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Updater handed to a [`Setter`]: receives the latest snapshot and returns
/// the next one. Returning the same `Arc` leaves the state unchanged.
pub type Update<T> = Box<dyn FnOnce(&Arc<T>) -> Arc<T> + Send>;

/// Sink that applies an [`Update`] to some externally held snapshot.
pub type Setter<T> = Arc<dyn Fn(Update<T>) + Send + Sync>;

/// Shared state cell with interior mutability.
///
/// `State<T>` uses `Arc<RwLock<T>>` internally, making it cheap to clone and
/// safe to share. A dirty flag records whether the value changed since the
/// last [`clear_dirty`](Self::clear_dirty), which is what tells a form to
/// recompute its derived values.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use formstate::state::State;
///
/// let count = State::new(Arc::new(1));
/// let set = count.setter();
/// set(Box::new(|prev: &Arc<i32>| Arc::new(**prev + 1)));
/// assert_eq!(*count.get(), 2);
/// assert!(count.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = value;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: Send + Sync + 'static> State<Arc<T>> {
    /// Apply an updater to the current snapshot.
    ///
    /// The updater runs under the write lock, so it always sees the latest
    /// snapshot. The state is only replaced (and marked dirty) when the
    /// updater returns a different `Arc`.
    pub fn apply(&self, update: Update<T>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let next = update(&*guard);
        if !Arc::ptr_eq(&guard, &next) {
            *guard = next;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Returns a [`Setter`] writing into this state.
    pub fn setter(&self) -> Setter<T> {
        let state = self.clone();
        Arc::new(move |update: Update<T>| state.apply(update))
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
