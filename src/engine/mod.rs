//! Top-level mock resolution engine.
//!
//! On each call the engine asks the ancestry search first, then the global
//! registry, then fails with [`MockError::NoMockRegistered`]. Registration
//! and resolution never perform I/O; everything is in-memory and
//! non-suspending.

mod invoker;

#[cfg(test)]
mod engine_test;

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::config::EngineConfig;
use crate::context::ContextDirectory;
use crate::context::ExecutionContext;
use crate::errors::MockError;
use crate::errors::Result;
use crate::http::Request;
use crate::http::Response;
use crate::registry::AncestryResolver;
use crate::registry::GlobalRegistry;
use crate::registry::LocalRegistry;
use crate::registry::Resolver;
use crate::registry::ResolverResult;

/// Public entry point for mock registration and resolution.
///
/// One engine serves many concurrently running execution contexts; the only
/// shared mutable state is the global registry slot and the cross-context
/// reads performed by the ancestry search.
pub struct MockEngine {
    local: Arc<LocalRegistry>,
    ancestry: AncestryResolver,
    global: Arc<GlobalRegistry>,
    global_fallback: bool,
}

impl MockEngine {
    /// Engine wired to the process-wide global registry with default
    /// configuration
    pub fn new(directory: Arc<dyn ContextDirectory>) -> Self {
        Self::with_config(EngineConfig::default(), directory)
    }

    pub fn with_config(
        config: EngineConfig,
        directory: Arc<dyn ContextDirectory>,
    ) -> Self {
        Self::assemble(config, directory, GlobalRegistry::shared())
    }

    /// Engine with a private global registry. For tests that must not touch
    /// the process-wide slot.
    pub fn with_global_registry(
        config: EngineConfig,
        directory: Arc<dyn ContextDirectory>,
        global: Arc<GlobalRegistry>,
    ) -> Self {
        Self::assemble(config, directory, global)
    }

    fn assemble(
        config: EngineConfig,
        directory: Arc<dyn ContextDirectory>,
        global: Arc<GlobalRegistry>,
    ) -> Self {
        let local = Arc::new(LocalRegistry::new());
        let ancestry = AncestryResolver::with_chain_search(
            local.clone(),
            directory,
            config.search_ancestry,
        );

        Self {
            local,
            ancestry,
            global,
            global_fallback: config.global_fallback,
        }
    }

    /// Binds `resolver` to `context`, replacing any resolver the context
    /// already owns. Always succeeds.
    pub fn register_local(
        &self,
        context: &ExecutionContext,
        resolver: impl Fn(&Request) -> ResolverResult + Send + Sync + 'static,
    ) {
        self.local.set(context.id().clone(), Resolver::new(resolver));
    }

    /// Installs `resolver` in the shared slot, replacing any prior global
    /// resolver. Intended for requests that originate on a different worker
    /// than the test itself.
    pub fn register_global(
        &self,
        resolver: impl Fn(&Request) -> ResolverResult + Send + Sync + 'static,
    ) {
        self.global.set(Resolver::new(resolver));
    }

    /// Context teardown hook: drops the context's local registration
    pub fn unregister_local(
        &self,
        context: &ExecutionContext,
    ) {
        self.local.remove(context.id());
    }

    /// Transport-facing entry point: resolves a test-double response for
    /// `request` without any network call.
    ///
    /// # Errors
    /// - [`MockError::NoMockRegistered`] if no resolver is found in the
    ///   ancestry chain nor globally. Fatal to the test step.
    /// - [`MockError::ResolverMismatch`] if the chosen resolver rejected this
    ///   request shape. Fatal to the test step.
    /// - [`crate::TransportError`] if the resolver simulated a failed call.
    ///   An ordinary outcome for the code under test, not a defect.
    pub fn resolve(
        &self,
        context: &ExecutionContext,
        request: &Request,
    ) -> Result<Response> {
        // The resolver reference is cloned out of the registry before the
        // call; no registry lock is held across resolver invocation.
        if let Some(resolver) = self.ancestry.resolve(context) {
            debug!(
                context = %context.id(),
                "resolving {} {} via context resolver",
                request.method,
                request.url
            );
            return invoker::invoke(&resolver, request);
        }

        if self.global_fallback {
            if let Some(resolver) = self.global.get() {
                debug!(
                    context = %context.id(),
                    "resolving {} {} via global resolver",
                    request.method,
                    request.url
                );
                return invoker::invoke(&resolver, request);
            }
        }

        warn!(context = %context.id(), "no mock resolver registered");
        Err(MockError::NoMockRegistered {
            context: context.id().clone(),
        }
        .into())
    }
}
