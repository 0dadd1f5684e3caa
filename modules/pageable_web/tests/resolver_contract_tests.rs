//! Resolver contract and module lifecycle tests

use pageable_web::*;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;
use common::print_test_header;

/// Resolves only pageables qualified with its own qualifier and counts calls
struct QualifiedOnly {
    qualifier: &'static str,
    calls: AtomicUsize,
}

impl PageableArgumentResolver for QualifiedOnly {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        parameter.is_pageable() && parameter.qualifier() == Some(self.qualifier)
    }

    fn resolve_argument(
        &self,
        _parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match request.parameter("cursor") {
            Some(_) => Ok(Some(Pageable::of(0, 1)?)),
            None => Ok(None),
        }
    }
}

fn compare_method() -> Arc<HandlerMethod> {
    HandlerMethod::new("compare_catalogs")
        .with_parameter(ParameterSpec::pageable("left").qualifier("left"))
        .with_parameter(ParameterSpec::pageable("right").qualifier("right"))
        .with_parameter(ParameterSpec::other("tenant", "String"))
        .into_shared()
}

#[test]
fn test_chain_only_asks_supporting_resolvers() {
    print_test_header(
        "test_chain_only_asks_supporting_resolvers",
        &["A chain never calls resolve_argument on members that do not support the parameter"],
    );
    let left = Arc::new(QualifiedOnly {
        qualifier: "left",
        calls: AtomicUsize::new(0),
    });
    let chain = ResolverChain::new()
        .with_shared(left.clone())
        .with(PageableResolver::default());
    let method = compare_method();
    let right = method.parameter_named("right").unwrap();

    let resolved = chain
        .resolve_argument(&right, &WebRequest::from_query("right_page=3&right_size=7"))
        .unwrap();

    assert_eq!(resolved, Some(Pageable::of(3, 7).unwrap()));
    assert_eq!(left.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_absent_result_falls_through_chain() {
    print_test_header(
        "test_absent_result_falls_through_chain",
        &["An absent result from one member is valid and lets the next member answer"],
    );
    let left = Arc::new(QualifiedOnly {
        qualifier: "left",
        calls: AtomicUsize::new(0),
    });
    let chain = ResolverChain::new()
        .with_shared(left.clone())
        .with(PageableResolver::default());
    let method = compare_method();
    let parameter = method.parameter_named("left").unwrap();

    let resolved = chain
        .resolve_argument(&parameter, &WebRequest::from_query("left_page=1&left_size=2"))
        .unwrap();
    assert_eq!(resolved, Some(Pageable::of(1, 2).unwrap()));
    assert_eq!(left.calls.load(Ordering::SeqCst), 1);

    let resolved = chain
        .resolve_argument(&parameter, &WebRequest::from_query("cursor=abc"))
        .unwrap();
    assert_eq!(resolved, Some(Pageable::of(0, 1).unwrap()));
}

#[test]
fn test_qualified_pageables_resolve_independently() {
    print_test_header(
        "test_qualified_pageables_resolve_independently",
        &["Two qualified pageables on one handler read their own parameters"],
    );
    let resolver = PageableResolver::default();
    let method = compare_method();
    let request = WebRequest::from_query(
        "left_page=1&left_size=5&right_page=4&right_size=9&right_sort=title,desc",
    );

    let left = resolver
        .resolve_argument(&method.parameter(0).unwrap(), &request)
        .unwrap()
        .unwrap();
    let right = resolver
        .resolve_argument(&method.parameter(1).unwrap(), &request)
        .unwrap()
        .unwrap();

    assert_eq!(left, Pageable::of(1, 5).unwrap());
    assert_eq!(right.page_number(), Some(4));
    assert_eq!(right.page_size(), Some(9));
    assert_eq!(right.sort().orders(), [Order::desc("title")]);
    assert!(!resolver.supports_parameter(&method.parameter(2).unwrap()));
}

#[test]
fn test_resolvers_are_shareable_across_threads() {
    print_test_header(
        "test_resolvers_are_shareable_across_threads",
        &["A single resolver instance serves concurrent requests"],
    );
    let resolver: Arc<dyn PageableArgumentResolver> = Arc::new(PageableResolver::default());
    let method = HandlerMethod::new("list")
        .with_parameter(ParameterSpec::pageable("pageable"))
        .into_shared();

    let handles: Vec<_> = (0..8u32)
        .map(|page| {
            let resolver = Arc::clone(&resolver);
            let parameter = method.parameter(0).unwrap();
            std::thread::spawn(move || {
                let request = WebRequest::from_query(&format!("page={}&size=3", page));
                resolver.resolve_argument(&parameter, &request).unwrap()
            })
        })
        .collect();

    for (page, handle) in handles.into_iter().enumerate() {
        let resolved = handle.join().unwrap();
        assert_eq!(resolved, Some(Pageable::of(page as u32, 3).unwrap()));
    }
}

#[test]
fn test_module_requires_init() {
    print_test_header(
        "test_module_requires_init",
        &["Bindings cannot be created before the module is initialized"],
    );
    let module = PageableWebModule::default();
    assert!(module.resolver().is_err());

    module.init(Config::default()).unwrap();
    assert!(module.resolver().is_ok());
}

#[test]
fn test_module_rejects_invalid_config() {
    print_test_header(
        "test_module_rejects_invalid_config",
        &["Initialization validates configuration and keeps the previous state"],
    );
    let module = PageableWebModule::with_config(Config::default()).unwrap();
    let result = module.init(Config {
        fallback_page_size: 0,
        ..Config::default()
    });
    assert!(result.is_err());
    assert_eq!(module.config(), Config::default());
}

#[test]
fn test_module_rejects_unbindable_parameters() {
    print_test_header(
        "test_module_rejects_unbindable_parameters",
        &["Only pageable parameters get pageable bindings; one binding per route"],
    );
    let module = PageableWebModule::with_config(Config::default()).unwrap();
    let method = compare_method();

    assert!(module.pageable_binding(method.parameter(2).unwrap()).is_err());
    assert!(module.sort_binding(method.parameter(0).unwrap()).is_err());

    let route: axum::routing::MethodRouter = axum::routing::get(|| async { "ok" });
    assert!(module.bind(route, &method).is_err());
}

#[test]
fn test_module_from_yaml_file() {
    print_test_header(
        "test_module_from_yaml_file",
        &["Configuration loads from YAML with defaults for omitted keys"],
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "page_parameter: p\nsize_parameter: s\nmax_page_size: 50").unwrap();

    let module = PageableWebModule::from_sources(Some(file.path())).unwrap();
    let resolver = module.resolver().unwrap();
    let parameter = HandlerMethod::new("list")
        .with_parameter(ParameterSpec::pageable("pageable"))
        .into_shared()
        .parameter(0)
        .unwrap();

    let resolved = resolver
        .resolve_argument(&parameter, &WebRequest::from_query("p=2&s=80&sort=name"))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.page_number(), Some(2));
    assert_eq!(resolved.page_size(), Some(50));
    assert_eq!(module.config().sort_parameter, "sort");
}

#[test]
fn test_chain_reports_names_of_named_member() {
    print_test_header(
        "test_chain_reports_names_of_named_member",
        &["Decorators and chains report the query parameter names of the resolver they wrap"],
    );
    let left = Arc::new(QualifiedOnly {
        qualifier: "left",
        calls: AtomicUsize::new(0),
    });
    let chain = ResolverChain::new()
        .with_shared(left.clone())
        .with(PageableResolver::default().with_prefix("q_"));
    let method = compare_method();
    let parameter = method.parameter_named("left").unwrap();

    assert_eq!(left.query_parameter_names(&parameter), None);
    assert_eq!(
        chain.query_parameter_names(&parameter),
        Some(("q_left_page".to_string(), "q_left_size".to_string()))
    );

    let stable = StableSortResolver::new(chain, Order::asc("id"));
    assert_eq!(
        stable.query_parameter_names(&parameter),
        Some(("q_left_page".to_string(), "q_left_size".to_string()))
    );
}
