#![allow(clippy::unwrap_used)]

//! Canonical key derivation and store keying.

use std::path::Path;

use declindex::hir::{KeyResolver, ResourceClass, ResourceStore, index_origin};
use declindex::{IndexConfig, Resource};
use rstest::rstest;

fn keys() -> KeyResolver {
    IndexConfig::new("/ws").key_resolver()
}

// =============================================================================
// FILE KEYS
// =============================================================================

#[rstest]
#[case("/ws/src/app.ts", Some("/src/app"))]
#[case("/ws/src/app.tsx", Some("/src/app"))]
#[case("/ws/src/app.d.ts", Some("/src/app"))]
#[case("/ws/lib/util.jsx", Some("/lib/util"))]
#[case("/ws/src/components/index.ts", Some("/src/components/index"))]
#[case("/ws/node_modules/lodash/lodash.d.ts", Some("lodash"))]
#[case("/ws/node_modules/@angular/core/index.d.ts", Some("@angular/core"))]
#[case("/ws/node_modules/rxjs/operators/index.d.ts", Some("rxjs/operators"))]
#[case("/ws/node_modules/@types/node/index.d.ts", None)]
#[case("/ws/typings/custom.d.ts", None)]
fn test_file_key(#[case] path: &str, #[case] expected: Option<&str>) {
    assert_eq!(keys().file_key(Path::new(path)).as_deref(), expected);
}

#[rstest]
#[case("/ws/src/typings/x.d.ts", ResourceClass::Typings)]
#[case("/ws/src/typings-helper.ts", ResourceClass::Workspace)]
#[case("/ws/node_modules/@types/react/index.d.ts", ResourceClass::Typings)]
#[case("/ws/node_modules/@typesafe/lib/index.d.ts", ResourceClass::Package)]
fn test_classification_is_by_segment(#[case] path: &str, #[case] expected: ResourceClass) {
    assert_eq!(keys().classify(path), expected);
}

#[test]
fn test_windows_separators_are_normalized() {
    let keys = KeyResolver::new("C:\\ws");
    assert_eq!(keys.workspace_key("C:\\ws\\src\\app.ts"), "/src/app");
    assert_eq!(
        keys.library_name("C:\\ws\\node_modules\\lodash\\index.js")
            .as_deref(),
        Some("lodash")
    );
}

// =============================================================================
// EXPORT TARGETS
// =============================================================================

#[rstest]
#[case("./util", "/src/util")]
#[case("./util.ts", "/src/util")]
#[case("../lib/helpers", "/lib/helpers")]
#[case("./nested/", "/src/nested")]
#[case("../node_modules/lodash/lodash", "lodash")]
#[case("lodash", "/src/lodash")]
#[case("@angular/core", "/src/@angular/core")]
#[case("../node_modules/@angular/core", "@angular/core")]
fn test_export_target_from_workspace_file(#[case] specifier: &str, #[case] expected: &str) {
    let target = keys().export_target_key(Some(Path::new("/ws/src/index.ts")), specifier);
    assert_eq!(target, expected);
}

#[test]
fn test_export_target_from_container_is_verbatim() {
    assert_eq!(keys().export_target_key(None, "./looks-relative"), "./looks-relative");
}

#[rstest]
#[case("/src/index", "/src")]
#[case("/index", "/")]
#[case("/src/reindex", "/src/reindex")]
#[case("lodash", "lodash")]
fn test_index_origin(#[case] key: &str, #[case] expected: &str) {
    assert_eq!(index_origin(key), expected);
}

// =============================================================================
// STORE KEYING
// =============================================================================

#[test]
fn test_store_keys_each_resource_class() {
    let keys = keys();
    let mut store = ResourceStore::new();

    store.add_file(Resource::file("/ws/src/app.ts"), &keys);
    store.add_file(Resource::file("/ws/node_modules/lodash/index.d.ts"), &keys);
    store.add_file(
        Resource::file("/ws/node_modules/@types/node/index.d.ts")
            .with_resource(Resource::module("fs"))
            .with_resource(Resource::module("path")),
        &keys,
    );

    let stored: Vec<&str> = store.keys().map(|key| key.as_str()).collect();
    assert_eq!(stored, vec!["/src/app", "lodash", "fs", "path"]);
    assert_eq!(
        store.keys_for_file(Path::new("/ws/node_modules/@types/node/index.d.ts")),
        ["fs", "path"]
    );
}
