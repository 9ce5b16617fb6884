use std::sync::Arc;

use super::AncestryResolver;
use super::LocalRegistry;
use super::Resolver;
use crate::context::ContextId;
use crate::context::ExecutionContext;
use crate::context::InProcessDirectory;
use crate::context::MockContextDirectory;
use crate::http::RawResult;
use crate::http::Request;

fn resolver_with_status(status: u16) -> Resolver {
    Resolver::new(move |_| Ok(RawResult::parts(status, vec![], vec![])))
}

fn status_of(resolver: &Resolver) -> u16 {
    match resolver.call(&Request::get("http://example.com")).unwrap() {
        RawResult::Parts { status, .. } => status,
        other => panic!("unexpected raw result: {:?}", other),
    }
}

#[test]
fn test_own_resolver_wins_over_ancestors() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    let parent = ExecutionContext::root();
    let child = ExecutionContext::child_of(&parent);
    let parent = directory.register(parent);
    local.set(parent.id().clone(), resolver_with_status(500));
    local.set(child.id().clone(), resolver_with_status(200));

    let resolver = AncestryResolver::new(local, directory)
        .resolve(&child)
        .expect("child has its own resolver");
    assert_eq!(200, status_of(&resolver));
}

#[test]
fn test_nearest_caller_wins() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    // grandparent -> parent -> child; both elders registered a resolver
    let grandparent = ExecutionContext::root();
    let parent = ExecutionContext::child_of(&grandparent);
    let child = ExecutionContext::child_of(&parent);
    let grandparent = directory.register(grandparent);
    let parent = directory.register(parent);
    local.set(grandparent.id().clone(), resolver_with_status(500));
    local.set(parent.id().clone(), resolver_with_status(201));

    let resolver = AncestryResolver::new(local, directory)
        .resolve(&child)
        .expect("chain holds a resolver");
    assert_eq!(201, status_of(&resolver));
}

#[test]
fn test_callers_searched_before_ancestors() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    let caller = directory.register(ExecutionContext::root());
    let ancestor = directory.register(ExecutionContext::root());
    local.set(caller.id().clone(), resolver_with_status(201));
    local.set(ancestor.id().clone(), resolver_with_status(500));

    let context = ExecutionContext::with_chains(
        ContextId::generate(),
        vec![caller.id().clone()],
        vec![ancestor.id().clone()],
    );

    let resolver = AncestryResolver::new(local, directory)
        .resolve(&context)
        .expect("chain holds a resolver");
    assert_eq!(201, status_of(&resolver));
}

#[test]
fn test_terminated_context_is_skipped() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    let dead = ExecutionContext::root();
    let dead_id = dead.id().clone();
    let live = directory.register(ExecutionContext::root());
    // the dead context still has a stale registry entry, but was never
    // registered (or was deregistered) in the directory
    local.set(dead_id.clone(), resolver_with_status(500));
    local.set(live.id().clone(), resolver_with_status(201));

    let context = ExecutionContext::with_chains(
        ContextId::generate(),
        vec![live.id().clone(), dead_id],
        vec![],
    );

    let resolver = AncestryResolver::new(local, directory)
        .resolve(&context)
        .expect("live candidate remains");
    assert_eq!(201, status_of(&resolver));
}

#[test]
fn test_liveness_checked_through_directory_seam() {
    let local = Arc::new(LocalRegistry::new());
    let dead_id = ContextId::from("ctx-dead");
    local.set(dead_id.clone(), resolver_with_status(500));

    let mut directory = MockContextDirectory::new();
    directory
        .expect_lookup()
        .withf(move |id| *id == ContextId::from("ctx-dead"))
        .times(1)
        .returning(|_| None);

    let context = ExecutionContext::with_chains(ContextId::generate(), vec![dead_id], vec![]);

    let resolver = AncestryResolver::new(local, Arc::new(directory)).resolve(&context);
    assert!(resolver.is_none());
}

#[test]
fn test_no_resolver_anywhere_returns_none() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    let context = ExecutionContext::root();
    assert!(AncestryResolver::new(local, directory).resolve(&context).is_none());
}

#[test]
fn test_chain_search_disabled_checks_self_only() {
    let local = Arc::new(LocalRegistry::new());
    let directory = InProcessDirectory::new();

    let parent = directory.register(ExecutionContext::root());
    local.set(parent.id().clone(), resolver_with_status(200));

    let child = ExecutionContext::with_chains(
        ContextId::generate(),
        vec![parent.id().clone()],
        vec![parent.id().clone()],
    );

    let resolver =
        AncestryResolver::with_chain_search(local, directory, false).resolve(&child);
    assert!(resolver.is_none());
}
