// Scalability and shared-read tests for the first-match router.

use super::{Router, RoutingResult};
use crate::routes::compile_routes;
use http::Method;
use std::sync::Arc;
use std::thread;

fn many_routes(n: usize) -> String {
    let mut config = String::new();
    for i in 0..n {
        config.push_str(&format!("get /api/v1/resource{i}/item:params resource{i}#show\n"));
    }
    config
}

#[test]
fn test_router_with_many_routes() {
    let compiled = compile_routes(&many_routes(500));
    assert_eq!(compiled.table.len(), 500);
    let router = Router::new(compiled.table);

    for _ in 0..1000 {
        let result = router.route(&Method::GET, "/api/v1/resource499/item/123");
        let target = result.into_target().expect("route should match");
        assert_eq!(&*target.controller, "resource499controller");
        assert_eq!(target.params.as_slice(), ["123"]);
    }
}

#[test]
fn test_router_shared_across_threads() {
    let compiled = compile_routes(&many_routes(50));
    let router = Arc::new(Router::new(compiled.table));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..50 {
                    let path = format!("/api/v1/resource{i}/item/{t}");
                    match router.route(&Method::GET, &path) {
                        RoutingResult::Found(target) => {
                            assert_eq!(&*target.action, "show");
                            assert_eq!(target.params.as_slice(), [t.to_string()]);
                        }
                        other => panic!("unexpected {other:?} for {path}"),
                    }
                    assert!(matches!(
                        router.route(&Method::POST, &path),
                        RoutingResult::Rejected { .. }
                    ));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("reader thread panicked");
    }
}

#[test]
fn test_router_matches_do_not_copy_names() {
    let (router, _) = Router::from_config("get /users:params user#show\n");
    let first = router.route(&Method::GET, "/users/1").into_target().unwrap();
    let second = router.route(&Method::GET, "/users/2").into_target().unwrap();
    assert!(Arc::ptr_eq(&first.controller, &second.controller));
    assert!(Arc::ptr_eq(&first.action, &second.action));
}
