//! End-to-end extraction over in-memory programs

mod common;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use common::{module_path, ProgramBuilder, ROOT};
use ouroboros_docgen::oracle::Modifiers;
use ouroboros_docgen::model::PrimitiveKind;
use ouroboros_docgen::oracle::{Intrinsic, NodeInfo, NodeKind, SymbolKind, TypeInfo, TypeShape};
use ouroboros_docgen::{
    Declaration, DocgenConfig, DocgenError, ExtractionSession, Module, ProjectSpec,
    ReferenceKind, Type, TypeOracle, TypeReference,
};

#[test]
fn test_self_referential_class() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let (tree_node, instance) = program.class(index, "index.ts", "TreeNode");
    program.property(instance, "index.ts", "parent", instance);
    program.method(instance, "index.ts", "clone", instance);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let reference = session.reference(tree_node).unwrap();
    assert_eq!(session.reference(tree_node).unwrap(), reference);
    assert_eq!(reference.kind, ReferenceKind::Class);
    assert_eq!(reference.path, module_path(&["app"]));

    let docs = session.finish();
    let root = docs.project("app").unwrap().root();
    assert_eq!(root.classes.len(), 1);

    let class = root.class("TreeNode").unwrap();
    let parent = class.members.property("parent").unwrap();
    let parent_type = parent.ty.as_ref().unwrap().as_reference().unwrap();
    assert!(parent_type.same_symbol(&reference));

    let clone = class.members.method("clone").unwrap();
    assert_eq!(clone.signatures.len(), 1);
    assert!(clone.signatures[0]
        .return_type
        .as_reference()
        .unwrap()
        .same_symbol(&reference));

    assert_eq!(class.members.construct_signatures.len(), 1);
    assert_eq!(class.loc.file.as_deref(), Some("index.ts"));
    assert!(class.is_exported);

    let exports = root.exports.get("index.ts").unwrap();
    assert!(exports.export("TreeNode").unwrap().reference.same_symbol(&reference));
}

#[test]
fn test_static_members_come_from_constructor_type() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let (counter, instance) = program.class(index, "index.ts", "Counter");
    let number = program.intrinsic(Intrinsic::Number);
    program.property(instance, "index.ts", "value", number);

    let constructor = program.oracle.type_of_symbol(counter).unwrap();
    program.property(constructor, "index.ts", "instances", number);
    program.property(constructor, "index.ts", "prototype", instance);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let class = docs.project("app").unwrap().root().class("Counter").unwrap();

    let value = class.members.property("value").unwrap();
    assert!(!value.flags.is_static);
    let instances = class.members.property("instances").unwrap();
    assert!(instances.flags.is_static);
    assert!(instances
        .ty
        .as_ref()
        .unwrap()
        .is_primitive(PrimitiveKind::Number));
    assert!(class.members.property("prototype").is_none());
}

#[test]
fn test_callable_constant_becomes_function() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let string = program.intrinsic(Intrinsic::String);
    let event = program.parameter("index.ts", "event", string);
    let handler_type = program.function_type(vec![event], string);
    program.constant(
        index,
        "index.ts",
        "handler",
        handler_type,
        "(event: string) => event",
    );

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    assert!(root.constant("handler").is_none());
    let function = root.function("handler").unwrap();
    assert_eq!(function.signatures.len(), 1);
    let parameter = function.signatures[0].parameter("event").unwrap();
    assert!(parameter
        .ty
        .as_ref()
        .unwrap()
        .is_primitive(PrimitiveKind::String));
    assert_eq!(
        root.exports["index.ts"].export("handler").unwrap().reference.kind,
        ReferenceKind::Function
    );
}

#[test]
fn test_constant_initializer_is_truncated() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let greeting = program.string_literal("hello world!");
    program.constant(index, "index.ts", "GREETING", greeting, "\"hello world!\"");
    let short = program.number_literal(3.0);
    program.constant(index, "index.ts", "RETRIES", short, "3");

    let config = DocgenConfig::default().with_max_constant_text_length(8);
    let mut session = program.session(config);
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    let constant = root.constant("GREETING").unwrap();
    let content = constant.content.as_deref().unwrap();
    assert_eq!(content.chars().count(), 8);
    assert_eq!(content, "\"hello w");
    assert_eq!(
        constant.ty.as_ref().unwrap().to_string(),
        "\"hello world!\""
    );

    let retries = root.constant("RETRIES").unwrap();
    assert_eq!(retries.content.as_deref(), Some("3"));
    assert_eq!(retries.ty.as_ref().unwrap().to_string(), "3");
}

#[test]
fn test_nested_namespaces() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let number = program.intrinsic(Intrinsic::Number);
    let shapes = program.namespace(index, "index.ts", "Shapes");
    let (circle, _) = program.class(shapes, "index.ts", "Circle");
    let inner = program.namespace(shapes, "index.ts", "Inner");
    let area = program.function(inner, "index.ts", "area", number);

    let mut session = program.session(DocgenConfig::default());

    // the innermost declaration is seen before its namespaces
    let area_reference = session.reference(area).unwrap();
    assert_eq!(area_reference.path, module_path(&["app", "Shapes", "Inner"]));

    session.extract();
    let circle_reference = session.reference(circle).unwrap();
    assert_eq!(circle_reference.path, module_path(&["app", "Shapes"]));
    let shapes_reference = session.reference(shapes).unwrap();
    assert_eq!(shapes_reference.kind, ReferenceKind::Module);
    assert_eq!(shapes_reference.path, module_path(&["app"]));

    let docs = session.finish();
    let project = docs.project("app").unwrap();
    let tree = &project.modules;

    let shapes_id = tree
        .find(&["app".to_string(), "Shapes".to_string()])
        .unwrap();
    let shapes_module = tree.get(shapes_id).unwrap();
    assert!(shapes_module.is_namespace());
    let class = shapes_module.class("Circle").unwrap();
    assert!(class.loc.file.is_none());

    let inner_id = tree
        .find(&["app".to_string(), "Shapes".to_string(), "Inner".to_string()])
        .unwrap();
    let inner_module = tree.get(inner_id).unwrap();
    assert!(inner_module.is_namespace());
    assert_eq!(inner_module.path, vec!["app", "Shapes"]);
    assert_eq!(inner_module.functions.len(), 1);
    assert!(inner_module.function("area").is_some());

    assert!(project.root().function("area").is_none());
    let export = project.root().exports["index.ts"].export("Shapes").unwrap();
    assert_eq!(export.reference.kind, ReferenceKind::Module);
}

#[test]
fn test_enum_members() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let color = program.declare(
        index,
        "index.ts",
        "Color",
        SymbolKind::Enum,
        NodeKind::Enum { is_const: false },
    );
    let color_type = program.object_type(color);
    program.oracle.set_declared_type(color, color_type);

    let red = program.declare(
        color,
        "index.ts",
        "Red",
        SymbolKind::EnumMember,
        NodeKind::EnumMember { initializer: None },
    );
    let zero = program.number_literal(0.0);
    program.oracle.set_declared_type(red, zero);

    let green_literal = program.string_literal("g");
    let initializer = program.node("index.ts", NodeKind::Expression, "\"g\"");
    program.oracle.set_node_type(initializer, green_literal);
    let green = program.declare(
        color,
        "index.ts",
        "Green",
        SymbolKind::EnumMember,
        NodeKind::EnumMember {
            initializer: Some(initializer),
        },
    );

    let mut session = program.session(DocgenConfig::default());

    // a member pulls in its whole enum
    let green_reference = session.reference(green).unwrap();
    let color_reference = session.reference(color).unwrap();
    assert_eq!(green_reference.kind, ReferenceKind::EnumMember);
    assert_eq!(
        green_reference.parent.as_deref(),
        Some(&color_reference)
    );
    assert_eq!(green_reference.path, color_reference.path);
    assert_eq!(green_reference.to_string(), "Color.Green");
    assert_eq!(session.reference(red).unwrap().name, "Red");

    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();
    assert_eq!(root.enums.len(), 1);

    let enumeration = root.enumeration("Color").unwrap();
    assert_eq!(enumeration.members.len(), 2);
    let red = enumeration.member("Red").unwrap();
    assert_eq!(red.initializer.as_ref().unwrap().to_string(), "0");
    let green = enumeration.member("Green").unwrap();
    assert_eq!(green.initializer.as_ref().unwrap().to_string(), "\"g\"");
}

#[test]
fn test_hooks_fire_once_before_attach() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let (_, a_instance) = program.class(index, "index.ts", "A");
    let (_, b_instance) = program.class(index, "index.ts", "B");
    program.property(a_instance, "index.ts", "b", b_instance);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut session = program.session(DocgenConfig::default());
    session.on_declaration(Box::new(
        move |declaration: &Declaration, reference: &TypeReference, module: &Module| {
            sink.borrow_mut().push((
                declaration.name().to_string(),
                reference.id,
                module.class(declaration.name()).is_some(),
            ));
        },
    ));
    session.extract();
    session.extract_file(&program.path("index.ts"));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    // B is registered while A's body is being built
    assert_eq!(seen[0].0, "B");
    assert_eq!(seen[1].0, "A");
    assert_ne!(seen[0].1, seen[1].1);
    assert!(seen.iter().all(|(_, _, attached)| !attached));
}

#[test]
fn test_builtin_library_links() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let lib = "/usr/lib/node_modules/typescript/lib/lib.es2015.promise.d.ts";
    program.oracle.mark_default_library(lib);
    let promise = program.oracle.declare(
        None,
        "Promise",
        SymbolKind::Interface,
        NodeInfo::new(
            NodeKind::Interface {
                type_parameters: vec![],
                extends: vec![],
            },
            lib,
        ),
    );
    let number = program.intrinsic(Intrinsic::Number);
    let promise_number = program.object_type(promise);
    program.oracle.set_type_arguments(promise_number, vec![number]);
    program.function(index, "index.ts", "load", promise_number);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    assert!(root.interfaces.is_empty());
    let load = root.function("load").unwrap();
    let return_type = &load.signatures[0].return_type;
    assert_eq!(return_type.to_string(), "Promise<number>");
    let reference = return_type.as_reference().unwrap();
    assert!(reference.is_external());
    assert_eq!(
        reference.link.as_deref(),
        Some("https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Promise")
    );
}

#[test]
fn test_dependency_link_templates() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let observable_file =
        PathBuf::from(ROOT).join("node_modules/rxjs/dist/types/internal/Observable.d.ts");
    let observable = program.oracle.declare(
        None,
        "Observable",
        SymbolKind::Class,
        NodeInfo::new(
            NodeKind::Class {
                type_parameters: vec![],
                extends: vec![],
                implements: vec![],
            },
            observable_file.clone(),
        ),
    );
    let observable_type = program.object_type(observable);
    program.function(index, "index.ts", "stream", observable_type);

    let subject_file = PathBuf::from(ROOT).join("node_modules/other-lib/index.d.ts");
    let subject = program.oracle.declare(
        None,
        "Subject",
        SymbolKind::Class,
        NodeInfo::new(
            NodeKind::Class {
                type_parameters: vec![],
                extends: vec![],
                implements: vec![],
            },
            subject_file,
        ),
    );
    let subject_type = program.object_type(subject);
    program.function(index, "index.ts", "subject", subject_type);

    let config = DocgenConfig::from_str(
        r#"
[docgen]
builtin_links = false

[[docgen.externals]]
library = "rxjs"
url = "https://rxjs.dev/api/{kind}/{name}"
"#,
    )
    .unwrap();

    let mut session = program.session(config);
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();
    assert!(root.classes.is_empty());

    let stream = root.function("stream").unwrap();
    let reference = stream.signatures[0].return_type.as_reference().unwrap();
    assert_eq!(
        reference.link.as_deref(),
        Some("https://rxjs.dev/api/class/Observable")
    );

    // unknown dependency: still a reference, just without a link
    let subject = root.function("subject").unwrap();
    let reference = subject.signatures[0].return_type.as_reference().unwrap();
    assert_eq!(reference.name, "Subject");
    assert!(reference.link.is_none());
}

#[test]
fn test_passthrough_directories() {
    let mut program = ProgramBuilder::new();
    let engine_file = program.file("src/core/engine.ts");
    let (engine, _) = program.class(engine_file, "src/core/engine.ts", "Engine");

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    assert_eq!(
        session.reference(engine).unwrap().path,
        module_path(&["app", "core"])
    );

    let docs = session.finish();
    let tree = &docs.project("app").unwrap().modules;
    assert!(!tree.root().modules.contains_key("src"));
    let core = tree.find(&["app".to_string(), "core".to_string()]).unwrap();
    let module = tree.get(core).unwrap();
    let class = module.class("Engine").unwrap();
    assert_eq!(class.loc.file.as_deref(), Some("src/core/engine.ts"));
    assert!(module.exports.contains_key("src/core/engine.ts"));
}

#[test]
fn test_passthrough_can_be_disabled() {
    let mut program = ProgramBuilder::new();
    let engine_file = program.file("src/core/engine.ts");
    let (engine, _) = program.class(engine_file, "src/core/engine.ts", "Engine");

    let config = DocgenConfig::default().with_passthrough_modules(Vec::<String>::new());
    let mut session = program.session(config);
    assert_eq!(
        session.reference(engine).unwrap().path,
        module_path(&["app", "src", "core"])
    );
}

#[test]
fn test_type_alias_keeps_its_definition() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let string = program.intrinsic(Intrinsic::String);
    let number = program.intrinsic(Intrinsic::Number);
    let id = program.declare(
        index,
        "index.ts",
        "Id",
        SymbolKind::TypeAlias,
        NodeKind::TypeAlias {
            type_parameters: vec![],
            value: None,
        },
    );
    let union = program.oracle.add_type(
        TypeInfo::new(TypeShape::Union(vec![string, number])).with_alias(id, vec![]),
    );
    program.oracle.set_declared_type(id, union);
    program.function(index, "index.ts", "nextId", union);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    let alias = root.type_alias("Id").unwrap();
    assert!(matches!(alias.value, Type::Union { .. }));
    assert_eq!(alias.value.to_string(), "string | number");

    let next_id = root.function("nextId").unwrap();
    let return_type = &next_id.signatures[0].return_type;
    assert_eq!(return_type.as_reference().unwrap().kind, ReferenceKind::TypeAlias);
    assert_eq!(return_type.to_string(), "Id");
}

#[test]
fn test_external_and_excluded_files_are_not_walked() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    program.class(index, "index.ts", "App");
    let vendored = program.file("node_modules/pkg/index.d.ts");
    program.class(vendored, "node_modules/pkg/index.d.ts", "Vendored");
    let generated = program.file("generated/api.ts");
    program.class(generated, "generated/api.ts", "Generated");

    let config = DocgenConfig::from_str(
        r#"
[docgen]
exclude = ["node_modules", "generated"]
"#,
    )
    .unwrap();
    let mut session = program.session(config);
    session.extract();
    let docs = session.finish();
    let project = docs.project("app").unwrap();

    assert!(project.root().class("App").is_some());
    assert!(project.root().class("Vendored").is_none());
    assert!(!project.root().modules.contains_key("node_modules"));
    assert!(!project.root().modules.contains_key("generated"));
}

#[test]
fn test_project_registration_errors() {
    let mut program = ProgramBuilder::new();
    program.file("index.ts");

    let mut session = ExtractionSession::new(&program.oracle, DocgenConfig::default());
    let err = session
        .add_project(ProjectSpec::new("app", ROOT).with_entry(program.path("main.ts")))
        .unwrap_err();
    assert!(matches!(err, DocgenError::EntryNotInProgram(_)));

    let index = session
        .add_project(ProjectSpec::new("app", ROOT).with_entry(program.path("index.ts")))
        .unwrap();
    assert_eq!(index, 0);

    let err = session
        .add_project(ProjectSpec::new("app", "/work/other"))
        .unwrap_err();
    assert!(matches!(err, DocgenError::Other(_)));

    let docs = session.finish();
    assert_eq!(docs.projects.len(), 1);
    assert_eq!(docs.projects[0].entry.as_deref(), Some("index.ts"));
}

#[test]
fn test_project_group_shares_references() {
    let mut program = ProgramBuilder::new();
    let core_index = program.oracle.add_file("/work/core/index.ts");
    let core_node = NodeInfo::new(
        NodeKind::Interface {
            type_parameters: vec![],
            extends: vec![],
        },
        "/work/core/index.ts",
    )
    .with_modifiers(common::exported());
    let options = program
        .oracle
        .declare(Some(core_index), "Options", SymbolKind::Interface, core_node);
    program.oracle.export(core_index, options);
    let options_type = program.object_type(options);
    program.oracle.set_declared_type(options, options_type);

    let index = program.file("index.ts");
    program.function(index, "index.ts", "configure", options_type);

    let mut session = program.session(DocgenConfig::default());
    session
        .add_project(ProjectSpec::new("core", "/work/core"))
        .unwrap();
    session.extract();
    let options_reference = session.reference(options).unwrap();
    assert_eq!(options_reference.path, module_path(&["core"]));
    assert!(!options_reference.is_external());

    let docs = session.finish();
    let core = docs.project("core").unwrap();
    assert!(core.root().interface("Options").is_some());

    let app = docs.project("app").unwrap();
    let configure = app.root().function("configure").unwrap();
    assert!(configure.signatures[0]
        .return_type
        .as_reference()
        .unwrap()
        .same_symbol(&options_reference));
}

#[test]
fn test_documentation_serializes() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    program.class(index, "index.ts", "App");

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let json = session.finish().to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["projects"][0]["name"], "app");
    let modules = value["projects"][0]["modules"]["modules"].as_array().unwrap();
    assert_eq!(modules[0]["classes"][0]["name"], "App");
}

#[test]
fn test_long_declaration_chain_stays_structured() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let links: Vec<_> = (0..70)
        .map(|i| program.interface(index, "index.ts", &format!("I{}", i)))
        .collect();
    for pair in links.windows(2) {
        let (_, body) = pair[0];
        let (_, next) = pair[1];
        program.property(body, "index.ts", "next", next);
    }

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();
    assert_eq!(root.interfaces.len(), 70);

    for i in 0..69 {
        let interface = root.interface(&format!("I{}", i)).unwrap();
        let next = interface.members.property("next").unwrap();
        let reference = next.ty.as_ref().unwrap().as_reference();
        assert_eq!(
            reference.map(|r| r.name.clone()),
            Some(format!("I{}", i + 1)),
            "I{}.next",
            i
        );
    }
}

#[test]
fn test_class_heritage_clauses() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let (base, base_instance) = program.class(index, "index.ts", "Base");
    let (serializable, serializable_type) = program.interface(index, "index.ts", "Serializable");

    let extends = program.heritage("index.ts", base_instance, "Base");
    let implements = program.heritage("index.ts", serializable_type, "Serializable");
    program.class_with_heritage(index, "index.ts", "Derived", vec![extends], vec![implements]);

    let interface_extends = program.heritage("index.ts", serializable_type, "Serializable");
    program.interface_extending(index, "index.ts", "Document", vec![interface_extends]);

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let base_reference = session.reference(base).unwrap();
    let serializable_reference = session.reference(serializable).unwrap();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    let derived = root.class("Derived").unwrap();
    assert_eq!(derived.extends.len(), 1);
    assert!(derived.extends[0]
        .as_reference()
        .unwrap()
        .same_symbol(&base_reference));
    assert_eq!(derived.implements.len(), 1);
    assert!(derived.implements[0]
        .as_reference()
        .unwrap()
        .same_symbol(&serializable_reference));

    let document = root.interface("Document").unwrap();
    assert!(document.extends[0]
        .as_reference()
        .unwrap()
        .same_symbol(&serializable_reference));
}

#[test]
fn test_member_flags_only_on_declarations() {
    let mut program = ProgramBuilder::new();
    let index = program.file("index.ts");
    let number = program.intrinsic(Intrinsic::Number);
    let string = program.intrinsic(Intrinsic::String);

    let (_, account) = program.class(index, "index.ts", "Account");
    let private = Modifiers {
        is_private: true,
        ..Modifiers::default()
    };
    let protected = Modifiers {
        is_protected: true,
        ..Modifiers::default()
    };
    let abstract_ = Modifiers {
        is_abstract: true,
        ..Modifiers::default()
    };
    program.property_with(account, "index.ts", "balance", number, private);
    program.property_with(account, "index.ts", "owner", string, protected);
    program.property_with(account, "index.ts", "id", string, abstract_);
    program.property(account, "index.ts", "label", string);

    // const snapshot = { balance: 0 } with the same modifiers on its member
    let snapshot = program.oracle.add_type(TypeInfo::new(TypeShape::Object));
    program.property_with(snapshot, "index.ts", "balance", number, private);
    program.constant(index, "index.ts", "snapshot", snapshot, "{ balance: 0 }");

    let mut session = program.session(DocgenConfig::default());
    session.extract();
    let docs = session.finish();
    let root = docs.project("app").unwrap().root();

    let members = &root.class("Account").unwrap().members;
    let balance = members.property("balance").unwrap();
    assert!(balance.flags.is_private);
    assert!(!balance.flags.is_protected);
    assert!(members.property("owner").unwrap().flags.is_protected);
    assert!(members.property("id").unwrap().flags.is_abstract);
    assert!(members.property("label").unwrap().flags.is_empty());

    let constant = root.constant("snapshot").unwrap();
    let Some(Type::ObjectLiteral(object)) = &constant.ty else {
        panic!("expected an object literal, got {:?}", constant.ty);
    };
    assert!(object.property("balance").unwrap().flags.is_empty());
}

#[test]
fn test_namespace_sharing_a_directory_name() {
    for directory_first in [true, false] {
        let mut program = ProgramBuilder::new();
        let circle_file = program.file("shapes/circle.ts");
        let (circle, _) = program.class(circle_file, "shapes/circle.ts", "Circle");
        let index = program.file("index.ts");
        let shapes = program.namespace(index, "index.ts", "shapes");
        let (square, _) = program.class(shapes, "index.ts", "Square");

        let mut session = program.session(DocgenConfig::default());
        if directory_first {
            session.reference(circle).unwrap();
        } else {
            session.reference(square).unwrap();
        }
        session.extract();
        let docs = session.finish();
        let tree = &docs.project("app").unwrap().modules;

        let id = tree
            .find(&["app".to_string(), "shapes".to_string()])
            .unwrap();
        let module = tree.get(id).unwrap();
        assert_eq!(module.is_namespace(), !directory_first);

        let circle = module.class("Circle").unwrap();
        assert_eq!(circle.loc.file.as_deref(), Some("shapes/circle.ts"));
        let square = module.class("Square").unwrap();
        assert!(square.loc.file.is_none());
    }
}
