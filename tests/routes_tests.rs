use actionrouter::routes::{load_routes, CompiledRoutes, ConfigParseErrorKind, RouteMethod};
use std::error::Error;

mod common;
use common::{WebRoot, SAMPLE_ROUTES};

#[test]
fn test_load_routes_from_file() {
    let root = WebRoot::with_routes(SAMPLE_ROUTES);
    let compiled = load_routes(root.routes_path()).unwrap();
    assert!(compiled.is_clean());
    assert_eq!(compiled.table.len(), 8);

    let first = &compiled.table.entries()[0];
    assert_eq!(first.method, RouteMethod::Get);
    assert_eq!(first.path_pattern, "/");
    assert_eq!(&*first.controller, "homecontroller");
    assert_eq!(&*first.action, "index");
}

#[test]
fn test_load_routes_unreadable_file() {
    let root = WebRoot::empty();
    let err = load_routes(root.routes_path()).unwrap_err();
    assert_eq!(err.path, root.routes_path());
    assert!(err.to_string().starts_with("failed to read file : "));
    assert!(err.source().is_some());

    // Callers that keep running fall back to an empty table
    let fallback = load_routes(root.routes_path()).unwrap_or_else(|_| CompiledRoutes::empty());
    assert!(fallback.table.is_empty());
    assert!(fallback.is_clean());
}

#[test]
fn test_load_routes_collects_diagnostics() {
    let root = WebRoot::with_routes(
        "get /a a#b\n\
         get /b\n\
         delete /c c#d\n\
         get /d nohash\n\
         post /e e#f\n",
    );
    let compiled = load_routes(root.routes_path()).unwrap();
    assert_eq!(compiled.table.len(), 4);

    let kinds: Vec<&ConfigParseErrorKind> =
        compiled.diagnostics.iter().map(|d| &d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &ConfigParseErrorKind::TokenCount { found: 2 },
            &ConfigParseErrorKind::UnknownMethod("delete".to_string()),
            &ConfigParseErrorKind::InvalidAction("nohash".to_string()),
        ]
    );
    assert_eq!(
        compiled.diagnostics[1].to_string(),
        "Invalid directive, 'delete'  [line : 3]"
    );
}

#[test]
fn test_crlf_and_tabs() {
    let root = WebRoot::with_routes("get\t/a\ta#b\r\n  match   /p:params   p#q  \r\n");
    let compiled = load_routes(root.routes_path()).unwrap();
    assert!(compiled.is_clean());
    assert_eq!(compiled.table.len(), 3);
    assert!(compiled.table.entries()[2].has_params);
}

#[test]
fn test_table_serializes_in_order() {
    let root = WebRoot::with_routes("get /a a#b\npost /p:params p#q\n");
    let compiled = load_routes(root.routes_path()).unwrap();
    let json = serde_json::to_value(&compiled.table).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["path_pattern"], "/a");
    assert_eq!(entries[1]["path_pattern"], "/a/");
    assert_eq!(entries[2]["method"], "post");
    assert_eq!(entries[2]["has_params"], true);
    assert_eq!(entries[2]["controller"], "pcontroller");
}
