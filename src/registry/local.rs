use dashmap::DashMap;
use tracing::debug;

use super::Resolver;
use crate::context::ContextId;

/// Per-context resolver storage. Pure key-value semantics, no failure modes.
///
/// The owner is the only writer of its entry, but the ancestry search reads
/// other contexts' entries concurrently, so the backing store must never
/// expose a torn write. Entries become unreachable together with the owning
/// context; no active garbage collection is required.
#[derive(Default)]
pub struct LocalRegistry {
    entries: DashMap<ContextId, Resolver>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `resolver` for `context`, replacing any existing entry
    pub fn set(
        &self,
        context: ContextId,
        resolver: Resolver,
    ) {
        if self.entries.insert(context.clone(), resolver).is_some() {
            debug!(context = %context, "replaced local mock resolver");
        } else {
            debug!(context = %context, "registered local mock resolver");
        }
    }

    /// Returns the resolver registered for exactly this context, if any.
    /// Cross-context traversal belongs to the ancestry search, not here.
    pub fn get(
        &self,
        context: &ContextId,
    ) -> Option<Resolver> {
        self.entries.get(context).map(|entry| entry.value().clone())
    }

    /// Context teardown hook
    pub fn remove(
        &self,
        context: &ContextId,
    ) {
        self.entries.remove(context);
    }
}
