//! Export and re-export tracking

mod common;

use std::path::PathBuf;

use common::{ProgramBuilder, ROOT};
use ouroboros_docgen::oracle::{NodeInfo, NodeKind, SymbolKind, WildcardExport};
use ouroboros_docgen::{DocgenConfig, Documentation, ReferenceKind};

fn extract(program: &ProgramBuilder) -> Documentation {
    let mut session = program.session(DocgenConfig::default());
    session.extract();
    session.finish()
}

#[test]
fn test_wildcard_and_named_reexports_share_a_group() {
    let mut program = ProgramBuilder::new();
    let a = program.file("a.ts");
    let (c, _) = program.class(a, "a.ts", "C");
    program.class(a, "a.ts", "E");

    let index = program.file("index.ts");
    program.oracle.add_wildcard_export(
        index,
        WildcardExport {
            target: a,
            namespace: None,
        },
    );
    program.alias(index, "index.ts", "D", c);

    let docs = extract(&program);
    let root = docs.project("app").unwrap().root();

    let exports = &root.exports["index.ts"];
    assert!(exports.exports.is_empty());
    assert_eq!(exports.reexports.len(), 1);

    let group = &exports.reexports[0];
    assert_eq!(group.file, "a.ts");
    assert_eq!(group.module, vec!["app"]);
    assert!(group.namespace.is_none());
    assert!(group.wildcard);
    assert!(group.same_module);
    assert_eq!(group.references.len(), 1);
    assert_eq!(group.references[0].exported_name(), "D");
    assert_eq!(group.references[0].reference.name, "C");

    // the originating file keeps its own direct exports
    let a_exports = &root.exports["a.ts"];
    assert_eq!(a_exports.exports.len(), 2);
    assert!(a_exports.export("C").is_some());
    assert!(a_exports.export("E").is_some());
}

#[test]
fn test_namespace_reexports() {
    let mut program = ProgramBuilder::new();
    let number = program.intrinsic(ouroboros_docgen::oracle::Intrinsic::Number);
    let strings = program.file("util/strings.ts");
    program.function(strings, "util/strings.ts", "capitalize", number);
    let numbers = program.file("util/numbers.ts");
    program.function(numbers, "util/numbers.ts", "clamp", number);

    let index = program.file("index.ts");
    // export * as strings from "./util/strings"
    program.alias(index, "index.ts", "strings", strings);
    program.oracle.add_wildcard_export(
        index,
        WildcardExport {
            target: numbers,
            namespace: Some("numbers".to_string()),
        },
    );

    let docs = extract(&program);
    let root = docs.project("app").unwrap().root();
    let exports = &root.exports["index.ts"];
    assert!(exports.exports.is_empty());
    assert_eq!(exports.reexports.len(), 2);

    let strings_group = exports
        .reexports
        .iter()
        .find(|g| g.namespace.as_deref() == Some("strings"))
        .unwrap();
    assert_eq!(strings_group.file, "util/strings.ts");
    assert_eq!(strings_group.module, vec!["app", "util"]);
    assert!(strings_group.wildcard);
    assert!(!strings_group.same_module);
    assert!(strings_group.references.is_empty());

    let numbers_group = exports
        .reexports
        .iter()
        .find(|g| g.namespace.as_deref() == Some("numbers"))
        .unwrap();
    assert_eq!(numbers_group.file, "util/numbers.ts");
    assert!(numbers_group.wildcard);
}

#[test]
fn test_local_alias_is_a_direct_export() {
    let mut program = ProgramBuilder::new();
    let a = program.file("a.ts");
    let (c, _) = program.class(a, "a.ts", "C");
    // export { C as Main }
    program.alias(a, "a.ts", "Main", c);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let c_reference = session.reference(c).unwrap();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    let exports = &root.exports["a.ts"];
    assert!(exports.reexports.is_empty());
    let main = exports.export("Main").unwrap();
    assert_eq!(main.alias.as_deref(), Some("Main"));
    assert!(main.reference.same_symbol(&c_reference));
    let direct = exports.export("C").unwrap();
    assert!(direct.alias.is_none());
    assert_eq!(root.classes.len(), 1);
}

#[test]
fn test_dependency_reexports() {
    let mut program = ProgramBuilder::new();
    let rxjs_file = PathBuf::from(ROOT).join("node_modules/rxjs/index.d.ts");
    let rxjs = program.oracle.add_file(rxjs_file.clone());
    let observable = program.oracle.declare(
        Some(rxjs),
        "Observable",
        SymbolKind::Class,
        NodeInfo::new(
            NodeKind::Class {
                type_parameters: vec![],
                extends: vec![],
                implements: vec![],
            },
            rxjs_file,
        ),
    );
    program.oracle.export(rxjs, observable);

    let index = program.file("index.ts");
    // export { Observable } from "rxjs"
    program.alias(index, "index.ts", "Observable", observable);
    // export * from "rxjs"
    program.oracle.add_wildcard_export(
        index,
        WildcardExport {
            target: rxjs,
            namespace: None,
        },
    );

    let docs = extract(&program);
    let root = docs.project("app").unwrap().root();
    assert!(!root.modules.contains_key("node_modules"));
    assert!(root.classes.is_empty());

    let exports = &root.exports["index.ts"];
    assert!(exports.reexports.is_empty());
    let export = exports.export("Observable").unwrap();
    assert!(export.alias.is_none());
    assert_eq!(export.reference.kind, ReferenceKind::Class);
}

#[test]
fn test_files_without_exports_record_nothing() {
    let mut program = ProgramBuilder::new();
    program.file("internal.ts");
    let index = program.file("index.ts");
    program.class(index, "index.ts", "App");

    let docs = extract(&program);
    let root = docs.project("app").unwrap().root();
    assert!(root.exports.contains_key("index.ts"));
    assert!(!root.exports.contains_key("internal.ts"));
}
