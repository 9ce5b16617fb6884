use std::sync::Arc;

use tracing::trace;

use super::LocalRegistry;
use super::Resolver;
use crate::context::ContextDirectory;
use crate::context::ExecutionContext;

/// Searches a context and its relation chains for a registered resolver.
///
/// Candidate order: the context itself, then its `callers` in reverse, then
/// its `ancestors` in reverse, so the relative closest to the running context
/// wins. Duplicates across the two chains are permitted; each candidate is
/// simply checked in turn. The dual chain search is legacy/compatibility
/// behavior: both propagation mechanisms remain in use by existing callers.
pub struct AncestryResolver {
    local: Arc<LocalRegistry>,
    directory: Arc<dyn ContextDirectory>,
    search_chain: bool,
}

impl AncestryResolver {
    pub fn new(
        local: Arc<LocalRegistry>,
        directory: Arc<dyn ContextDirectory>,
    ) -> Self {
        Self::with_chain_search(local, directory, true)
    }

    pub(crate) fn with_chain_search(
        local: Arc<LocalRegistry>,
        directory: Arc<dyn ContextDirectory>,
        search_chain: bool,
    ) -> Self {
        Self {
            local,
            directory,
            search_chain,
        }
    }

    /// Returns the first resolver found in candidate order, or `None`.
    ///
    /// The supplied context is its own live handle and is queried directly;
    /// chain identifiers are converted through the directory first, and ids
    /// of already-terminated contexts are dropped.
    pub fn resolve(
        &self,
        context: &ExecutionContext,
    ) -> Option<Resolver> {
        if let Some(resolver) = self.local.get(context.id()) {
            trace!(context = %context.id(), "resolver found in own registry");
            return Some(resolver);
        }

        if !self.search_chain {
            return None;
        }

        let chain = context
            .callers()
            .iter()
            .rev()
            .chain(context.ancestors().iter().rev());
        for candidate in chain {
            let handle = match self.directory.lookup(candidate) {
                Some(handle) => handle,
                None => {
                    trace!(candidate = %candidate, "skipping terminated context");
                    continue;
                }
            };

            if let Some(resolver) = self.local.get(handle.id()) {
                trace!(
                    context = %context.id(),
                    candidate = %candidate,
                    "resolver inherited from ancestry chain"
                );
                return Some(resolver);
            }
        }

        None
    }
}
