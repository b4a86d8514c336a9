use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// A single-assignment slot with lock-free reads.
///
/// Concurrent initialisers may each compute a value, but only the first
/// one to publish is kept. Losers drop their value and return the winner.
pub struct PublishOnce<T> {
    slot: ArcSwapOption<T>,
}

impl<T> PublishOnce<T> {
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// The published value, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    pub fn is_published(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Publish `value` unless something was published first.
    ///
    /// Returns the canonical value either way.
    pub fn publish(&self, value: T) -> Arc<T> {
        let fresh = Arc::new(value);
        let prev = self
            .slot
            .compare_and_swap(&None::<Arc<T>>, Some(Arc::clone(&fresh)));
        match &*prev {
            Some(winner) => Arc::clone(winner),
            None => fresh,
        }
    }

    /// Return the published value, or run `load` and publish its result.
    ///
    /// A failed load publishes nothing, so the next caller tries again.
    pub fn get_or_try_publish<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        let value = load()?;
        Ok(self.publish(value))
    }
}

impl<T> Default for PublishOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for PublishOnce<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishOnce")
            .field("published", &self.is_published())
            .finish()
    }
}
