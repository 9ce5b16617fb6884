use std::sync::Arc;

use arc_swap::ArcSwapOption;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use tracing::debug;

use super::Resolver;

lazy_static! {
    // Start-once lifecycle for the process-wide slot: the first caller
    // initializes it, later callers reuse the same instance.
    static ref SHARED: Arc<GlobalRegistry> = Arc::new(GlobalRegistry::new());
}

/// Single replaceable resolver slot shared by all execution contexts.
///
/// `get` is lock-free and only ever observes a fully installed resolver;
/// conflicting `set` calls serialize through the write lock, so the visible
/// value is always the last write to complete. The slot is replaced, never
/// deleted, for the lifetime of the process (tests may [`clear`] it between
/// cases).
///
/// [`clear`]: GlobalRegistry::clear
pub struct GlobalRegistry {
    slot: ArcSwapOption<Resolver>,
    write_lock: Mutex<()>,
}

impl GlobalRegistry {
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
            write_lock: Mutex::new(()),
        }
    }

    /// The process-wide instance
    pub fn shared() -> Arc<GlobalRegistry> {
        SHARED.clone()
    }

    /// Installs or replaces the shared resolver, last write wins
    pub fn set(
        &self,
        resolver: Resolver,
    ) {
        let _guard = self.write_lock.lock();
        debug!("installing global mock resolver");
        self.slot.store(Some(Arc::new(resolver)));
    }

    /// Returns the currently installed resolver, if any
    pub fn get(&self) -> Option<Resolver> {
        self.slot.load_full().map(|resolver| (*resolver).clone())
    }

    /// Empties the slot. Test teardown only; production registrations
    /// replace rather than delete.
    pub fn clear(&self) {
        let _guard = self.write_lock.lock();
        self.slot.store(None);
    }
}

impl Default for GlobalRegistry {
    fn default() -> Self {
        Self::new()
    }
}
