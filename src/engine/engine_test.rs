use std::sync::Arc;

use super::MockEngine;
use crate::config::EngineConfig;
use crate::context::ExecutionContext;
use crate::context::InProcessDirectory;
use crate::errors::Error;
use crate::errors::MockError;
use crate::http::RawResult;
use crate::http::Request;
use crate::registry::GlobalRegistry;

struct Fixture {
    engine: MockEngine,
    directory: Arc<InProcessDirectory>,
}

fn fixture() -> Fixture {
    fixture_with_config(EngineConfig::default())
}

fn fixture_with_config(config: EngineConfig) -> Fixture {
    let directory = InProcessDirectory::new();
    let engine = MockEngine::with_global_registry(
        config,
        directory.clone(),
        Arc::new(GlobalRegistry::new()),
    );
    Fixture { engine, directory }
}

fn respond_with(status: u16) -> impl Fn(&Request) -> crate::registry::ResolverResult {
    move |_| Ok(RawResult::parts(status, vec![], vec![]))
}

#[test]
fn test_local_registration_resolves() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_local(&context, respond_with(200));

    let response = engine.resolve(&context, &Request::get("http://example.com")).unwrap();
    assert_eq!(200, response.status);
}

#[test]
fn test_reregistration_replaces_local_resolver() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_local(&context, respond_with(200));
    engine.register_local(&context, respond_with(503));

    let response = engine.resolve(&context, &Request::get("http://example.com")).unwrap();
    assert_eq!(503, response.status);
}

#[test]
fn test_resolution_falls_back_to_ancestor() {
    let Fixture { engine, directory } = fixture();

    let parent = ExecutionContext::root();
    let child = ExecutionContext::child_of(&parent);
    let parent = directory.register(parent);
    engine.register_local(&parent, respond_with(200));

    let response = engine.resolve(&child, &Request::get("http://example.com")).unwrap();
    assert_eq!(200, response.status);
}

#[test]
fn test_resolution_falls_back_to_global() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_global(respond_with(200));

    let response = engine.resolve(&context, &Request::get("http://example.com")).unwrap();
    assert_eq!(200, response.status);
}

#[test]
fn test_local_resolver_wins_over_global() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_global(respond_with(500));
    engine.register_local(&context, respond_with(200));

    let response = engine.resolve(&context, &Request::get("http://example.com")).unwrap();
    assert_eq!(200, response.status);
}

#[test]
fn test_no_resolver_anywhere_is_a_setup_defect() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    let err = engine
        .resolve(&context, &Request::get("http://example.com"))
        .unwrap_err();
    assert!(err.is_setup_defect());
    match err {
        Error::Mock(MockError::NoMockRegistered { context: reported }) => {
            assert_eq!(context.id(), &reported);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unregister_local_removes_resolver() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_local(&context, respond_with(200));
    engine.unregister_local(&context);

    let err = engine
        .resolve(&context, &Request::get("http://example.com"))
        .unwrap_err();
    assert!(err.is_setup_defect());
}

#[test]
fn test_simulated_failure_is_an_ordinary_outcome() {
    let Fixture { engine, .. } = fixture();
    let context = ExecutionContext::root();

    engine.register_local(&context, |_| Ok(RawResult::failure("timeout")));

    let err = engine
        .resolve(&context, &Request::get("http://example.com"))
        .unwrap_err();
    assert!(err.is_simulated_failure());
    assert!(!err.is_setup_defect());
}

#[test]
fn test_global_fallback_disabled_by_config() {
    let Fixture { engine, .. } = fixture_with_config(EngineConfig {
        search_ancestry: true,
        global_fallback: false,
    });
    let context = ExecutionContext::root();

    engine.register_global(respond_with(200));

    let err = engine
        .resolve(&context, &Request::get("http://example.com"))
        .unwrap_err();
    assert!(err.is_setup_defect());
}

#[test]
fn test_ancestry_search_disabled_by_config() {
    let Fixture { engine, directory } = fixture_with_config(EngineConfig {
        search_ancestry: false,
        global_fallback: true,
    });

    let parent = ExecutionContext::root();
    let child = ExecutionContext::child_of(&parent);
    let parent = directory.register(parent);
    engine.register_local(&parent, respond_with(200));

    let err = engine
        .resolve(&child, &Request::get("http://example.com"))
        .unwrap_err();
    assert!(err.is_setup_defect());
}
