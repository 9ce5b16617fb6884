//! Execution context identity and liveness.
//!
//! This module:
//! - Generates opaque [`ContextId`]s for units of work (e.g. a test process)
//! - Carries the caller/ancestor chains the surrounding runtime established
//!   before the engine is invoked
//! - Converts chain identifiers back into live context handles through the
//!   [`ContextDirectory`] trait, so already-terminated contexts drop out of
//!   the ancestry search


use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
#[cfg(test)]
use mockall::automock;
use nanoid::nanoid;
use tracing::debug;

/// Opaque identifier of a unit of work
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(String);

impl ContextId {
    pub fn generate() -> Self {
        Self(nanoid!())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextId {
    fn from(id: &str) -> Self {
        ContextId(id.to_string())
    }
}

impl From<String> for ContextId {
    fn from(id: String) -> Self {
        ContextId(id)
    }
}

/// The currently running unit of work plus its relation chains.
///
/// `callers` and `ancestors` are two historical mechanisms for propagating
/// "which context spawned this work"; both are searched for registered
/// resolvers and neither can be dropped without breaking existing callers.
/// Chains are stored oldest-first: the nearest relative sits last and is
/// checked first by the reverse-order ancestry search.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    id: ContextId,
    callers: Vec<ContextId>,
    ancestors: Vec<ContextId>,
}

impl ExecutionContext {
    /// A fresh context with empty chains
    pub fn root() -> Self {
        Self {
            id: ContextId::generate(),
            callers: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// A context spawned by `parent`: both chains extend the parent's with
    /// the parent itself appended.
    pub fn child_of(parent: &ExecutionContext) -> Self {
        let mut callers = parent.callers.clone();
        callers.push(parent.id.clone());
        let mut ancestors = parent.ancestors.clone();
        ancestors.push(parent.id.clone());

        Self {
            id: ContextId::generate(),
            callers,
            ancestors,
        }
    }

    /// For runtimes that track the chains themselves
    pub fn with_chains(
        id: ContextId,
        callers: Vec<ContextId>,
        ancestors: Vec<ContextId>,
    ) -> Self {
        Self { id, callers, ancestors }
    }

    pub fn id(&self) -> &ContextId {
        &self.id
    }

    pub fn callers(&self) -> &[ContextId] {
        &self.callers
    }

    pub fn ancestors(&self) -> &[ContextId] {
        &self.ancestors
    }
}

pub type ContextHandle = Arc<ExecutionContext>;

/// Converts a context identifier into a live, queryable handle.
///
/// Identifiers that no longer resolve to anything queryable (the context
/// already terminated) yield `None` and are dropped from the ancestry search.
#[cfg_attr(test, automock)]
pub trait ContextDirectory: Send + Sync + 'static {
    fn lookup(
        &self,
        id: &ContextId,
    ) -> Option<ContextHandle>;
}

/// Live-context table for contexts running inside the current process
#[derive(Default)]
pub struct InProcessDirectory {
    contexts: DashMap<ContextId, ContextHandle>,
}

impl InProcessDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Marks a context live. Called by the surrounding runtime when the unit
    /// of work starts.
    pub fn register(
        &self,
        context: ExecutionContext,
    ) -> ContextHandle {
        let handle = Arc::new(context);
        debug!(context = %handle.id(), "registering live context");
        self.contexts.insert(handle.id().clone(), handle.clone());
        handle
    }

    /// Removes a terminated context; its id then drops out of other
    /// contexts' chain searches.
    pub fn deregister(
        &self,
        id: &ContextId,
    ) {
        debug!(context = %id, "deregistering context");
        self.contexts.remove(id);
    }
}

impl ContextDirectory for InProcessDirectory {
    fn lookup(
        &self,
        id: &ContextId,
    ) -> Option<ContextHandle> {
        self.contexts.get(id).map(|entry| entry.value().clone())
    }
}
