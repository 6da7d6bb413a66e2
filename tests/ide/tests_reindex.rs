#![allow(clippy::unwrap_used)]

//! Incremental reindex tests for `DeclarationIndex`.

use declindex::{Export, FileChanges, Resource, SymbolSpecifier};

use crate::helpers::fixture_parser::*;
use crate::helpers::index_assertions::*;
use crate::helpers::resource_fixtures::*;

/// `g.ts` re-exports everything from `f.ts`; `other.ts` is unrelated.
fn reexport_project() -> FixtureParser {
    FixtureParser::new()
        .with_file(Resource::file(ws("f.ts")).with_declaration(class("Foo")))
        .with_file(Resource::file(ws("g.ts")).with_export(Export::all("./f")))
        .with_file(Resource::file(ws("other.ts")).with_declaration(class("Other")))
}

// =============================================================================
// DELETIONS
// =============================================================================

#[test]
fn test_deleting_reexported_file_reparses_dependent() {
    let index = built_index(reexport_project());
    assert_single(&index.index().unwrap(), "Foo", "/g");

    index.parser().remove_file(ws("f.ts"));
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_deleted(uri("f.ts")))
        .unwrap();

    assert_eq!(index.parser().last_call_sorted(), vec![ws("g.ts")]);
    assert_eq!(delta.deleted, vec!["Foo"]);
    assert!(delta.added.is_empty());
    assert!(delta.updated.is_empty());
    assert_not_indexed(&index.index().unwrap(), "Foo");
    assert!(!index.resolved_store().contains("/f"));
}

#[test]
fn test_deleting_unreferenced_file_reparses_nothing() {
    let index = built_index(reexport_project());
    let calls_before = index.parser().call_count();

    index.parser().remove_file(ws("other.ts"));
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_deleted(uri("other.ts")))
        .unwrap();

    assert_eq!(index.parser().call_count(), calls_before);
    assert_eq!(delta.deleted, vec!["Other"]);
    assert_single(&index.index().unwrap(), "Foo", "/g");
}

#[test]
fn test_deleting_typings_file_removes_its_modules() {
    let parser = FixtureParser::new()
        .with_file(
            Resource::file(ws("typings/env.d.ts"))
                .with_resource(Resource::module("env").with_declaration(function("getEnv"))),
        )
        .with_file(Resource::file(ws("config.ts")).with_export(Export::all("./settings")))
        .with_file(Resource::file(ws("settings.ts")).with_declaration(class("Settings")));
    let index = built_index(parser);
    assert_single(&index.index().unwrap(), "getEnv", "env");
    let calls_before = index.parser().call_count();

    index.parser().remove_file(ws("typings/env.d.ts"));
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_deleted(uri("typings/env.d.ts")))
        .unwrap();

    assert_eq!(index.parser().call_count(), calls_before);
    assert!(!index.resolved_store().contains("env"));
    let mut deleted: Vec<String> = delta.deleted.iter().map(|n| n.to_string()).collect();
    deleted.sort();
    assert_eq!(deleted, vec!["env", "getEnv"]);
    assert_single(&index.index().unwrap(), "Settings", "/config");
}

#[test]
fn test_bare_specifier_does_not_make_file_a_package_dependent() {
    let parser = FixtureParser::new()
        .with_file(
            Resource::file(ws("node_modules/lodash/index.d.ts"))
                .with_declaration(function("chunk")),
        )
        .with_file(Resource::file(ws("src/bare.ts")).with_export(Export::all("lodash")))
        .with_file(
            Resource::file(ws("src/path.ts")).with_export(Export::all("../node_modules/lodash")),
        );
    let index = built_index(parser);
    assert_single(&index.index().unwrap(), "chunk", "/src/path");

    index.parser().set_file(
        Resource::file(ws("node_modules/lodash/index.d.ts"))
            .with_declaration(function("chunk"))
            .with_declaration(function("map")),
    );
    let changes = FileChanges::new().with_updated(uri("node_modules/lodash/index.d.ts"));
    let delta = index.reindex_for_changes(&changes).unwrap();

    assert_eq!(
        index.parser().last_call_sorted(),
        vec![ws("node_modules/lodash/index.d.ts"), ws("src/path.ts")]
    );
    assert_eq!(delta.added["map"][0].from, "/src/path");
    assert_single(&index.index().unwrap(), "chunk", "/src/path");
}

// =============================================================================
// UPDATES AND CREATIONS
// =============================================================================

#[test]
fn test_updating_reexported_file_reports_new_declarations() {
    let index = built_index(reexport_project());

    index.parser().set_file(
        Resource::file(ws("f.ts"))
            .with_declaration(class("Foo"))
            .with_declaration(class("Bar")),
    );
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_updated(uri("f.ts")))
        .unwrap();

    assert_eq!(index.parser().last_call_sorted(), vec![ws("f.ts"), ws("g.ts")]);
    assert_eq!(delta.added.keys().collect::<Vec<_>>(), vec!["Bar"]);
    assert_eq!(delta.added["Bar"][0].from, "/g");
    assert!(delta.updated.is_empty());
    assert!(delta.deleted.is_empty());
    assert_single(&index.index().unwrap(), "Foo", "/g");
}

#[test]
fn test_moved_declaration_is_an_update() {
    let index = built_index(reexport_project());

    index.parser().set_file(
        Resource::file(ws("f.ts")).with_declaration(class("Foo").with_span(100, 120)),
    );
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_updated(uri("f.ts")))
        .unwrap();

    let updated = &delta.updated["Foo"];
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].declaration.span.map(|s| s.start), Some(100));
}

#[test]
fn test_creating_file_adds_its_declarations() {
    let index = built_index(reexport_project());

    index
        .parser()
        .set_file(Resource::file(ws("new file.ts")).with_declaration(function("fresh")));
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_created(uri("new%20file.ts")))
        .unwrap();

    assert_eq!(index.parser().last_call_sorted(), vec![ws("new file.ts")]);
    assert_eq!(delta.added["fresh"][0].from, "/new file");
}

#[test]
fn test_reexporting_file_change_does_not_reparse_its_target() {
    let index = built_index(reexport_project());

    index.parser().set_file(
        Resource::file(ws("g.ts")).with_export(Export::named(
            "./f",
            vec![SymbolSpecifier::aliased("Foo", "Renamed")],
        )),
    );
    let delta = index
        .reindex_for_changes(&FileChanges::new().with_updated(uri("g.ts")))
        .unwrap();

    assert_eq!(index.parser().last_call_sorted(), vec![ws("g.ts")]);
    assert_eq!(delta.deleted, vec!["Foo"]);
    assert_single(&index.index().unwrap(), "Renamed", "/g");
}

#[test]
fn test_chain_is_recomputed_from_pristine_resources() {
    // a -> b -> c; touching only `a` must still see `c`'s declarations.
    let parser = FixtureParser::new()
        .with_file(Resource::file(ws("a.ts")).with_export(Export::all("./b")))
        .with_file(Resource::file(ws("b.ts")).with_export(Export::all("./c")))
        .with_file(Resource::file(ws("c.ts")).with_declaration(class("Deep")));
    let index = built_index(parser);

    let delta = index
        .reindex_for_changes(&FileChanges::new().with_updated(uri("a.ts")))
        .unwrap();

    assert!(delta.is_empty(), "unexpected delta: {:?}", delta);
    assert_single(&index.index().unwrap(), "Deep", "/a");
}

#[test]
fn test_empty_change_set_yields_empty_delta() {
    let index = built_index(reexport_project());
    let calls_before = index.parser().call_count();

    let delta = index.reindex_for_changes(&FileChanges::new()).unwrap();

    assert!(delta.is_empty());
    assert_eq!(index.parser().call_count(), calls_before);
}

#[test]
fn test_reindex_parser_failure_keeps_previous_index() {
    let index = built_index(reexport_project());
    let before = index.index().unwrap();
    index.parser().fail_next();

    let result = index.reindex_for_changes(&FileChanges::new().with_updated(uri("f.ts")));

    assert_eq!(result.unwrap_err(), FixtureError::Injected(2));
    assert_eq!(*index.index().unwrap(), *before);
}
