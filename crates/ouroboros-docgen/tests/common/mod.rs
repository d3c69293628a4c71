//! Shared helpers for integration tests: a small builder over [`MemoryOracle`]

#![allow(dead_code)]

use std::path::PathBuf;

use ouroboros_docgen::oracle::{
    Intrinsic, Modifiers, NodeInfo, NodeKind, SignatureInfo, SymbolKind, TypeInfo, TypeShape,
};
use ouroboros_docgen::{
    DocgenConfig, ExtractionSession, MemoryOracle, NodeId, ProjectSpec, SymbolId, TypeId,
};

pub const ROOT: &str = "/work/app";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Module path as stored on a reference
pub fn module_path(parts: &[&str]) -> Option<Vec<String>> {
    Some(parts.iter().map(|p| p.to_string()).collect())
}

pub fn exported() -> Modifiers {
    Modifiers {
        is_exported: true,
        ..Modifiers::default()
    }
}

/// Builds a program rooted at [`ROOT`] one declaration at a time
pub struct ProgramBuilder {
    pub oracle: MemoryOracle,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        init_tracing();
        Self {
            oracle: MemoryOracle::new(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        PathBuf::from(ROOT).join(relative)
    }

    /// Register a project file, returning its module symbol
    pub fn file(&mut self, relative: &str) -> SymbolId {
        let path = self.path(relative);
        self.oracle.add_file(path)
    }

    pub fn intrinsic(&mut self, kind: Intrinsic) -> TypeId {
        self.oracle.intrinsic_type(kind)
    }

    pub fn string_literal(&mut self, value: &str) -> TypeId {
        self.oracle
            .add_type(TypeInfo::new(TypeShape::StringLiteral(value.to_string())))
    }

    pub fn number_literal(&mut self, value: f64) -> TypeId {
        self.oracle
            .add_type(TypeInfo::new(TypeShape::NumberLiteral(value)))
    }

    /// Declare an exported symbol inside `container` (a file, namespace or enum)
    pub fn declare(
        &mut self,
        container: SymbolId,
        file: &str,
        name: &str,
        kind: SymbolKind,
        node: NodeKind,
    ) -> SymbolId {
        let node = NodeInfo::new(node, self.path(file))
            .at(1, 0)
            .with_modifiers(exported());
        let symbol = self.oracle.declare(Some(container), name, kind, node);
        self.oracle.export(container, symbol);
        symbol
    }

    /// Declare a syntax node with no symbol of its own
    pub fn node(&mut self, file: &str, kind: NodeKind, text: &str) -> NodeId {
        self.oracle
            .add_node(NodeInfo::new(kind, self.path(file)).with_text(text))
    }

    /// Object type owned by `symbol` (class instance or interface body)
    pub fn object_type(&mut self, symbol: SymbolId) -> TypeId {
        self.oracle
            .add_type(TypeInfo::new(TypeShape::Object).with_symbol(symbol))
    }

    /// Anonymous function type with one call signature
    pub fn function_type(&mut self, parameters: Vec<SymbolId>, return_type: TypeId) -> TypeId {
        let ty = self.oracle.add_type(TypeInfo::new(TypeShape::Object));
        self.oracle.add_call_signature(
            ty,
            SignatureInfo {
                declaration: None,
                type_parameters: vec![],
                parameters,
                return_type,
            },
        );
        ty
    }

    pub fn parameter(&mut self, file: &str, name: &str, ty: TypeId) -> SymbolId {
        let node = NodeInfo::new(
            NodeKind::Parameter {
                is_rest: false,
                initializer: None,
                type_annotation: None,
            },
            self.path(file),
        );
        let symbol = self
            .oracle
            .declare(None, name, SymbolKind::Parameter, node);
        self.oracle.set_value_type(symbol, ty);
        symbol
    }

    /// Property symbol of type `ty`, attached to `owner`
    pub fn property(&mut self, owner: TypeId, file: &str, name: &str, ty: TypeId) -> SymbolId {
        self.property_with(owner, file, name, ty, Modifiers::default())
    }

    /// Property carrying syntax modifiers (`private`, `abstract`, ...)
    pub fn property_with(
        &mut self,
        owner: TypeId,
        file: &str,
        name: &str,
        ty: TypeId,
        modifiers: Modifiers,
    ) -> SymbolId {
        let node = NodeInfo::new(
            NodeKind::Property {
                type_annotation: None,
            },
            self.path(file),
        )
        .with_modifiers(modifiers);
        let symbol = self
            .oracle
            .declare(None, name, SymbolKind::Property, node);
        self.oracle.set_value_type(symbol, ty);
        self.oracle.add_property(owner, symbol);
        symbol
    }

    /// Method symbol whose single signature returns `return_type`
    pub fn method(&mut self, owner: TypeId, file: &str, name: &str, return_type: TypeId) -> SymbolId {
        let node = NodeInfo::new(NodeKind::Method, self.path(file));
        let symbol = self.oracle.declare(None, name, SymbolKind::Method, node);
        let ty = self.function_type(vec![], return_type);
        self.oracle.set_value_type(symbol, ty);
        self.oracle.add_property(owner, symbol);
        symbol
    }

    /// Exported class with an instance type and an empty constructor type
    pub fn class(&mut self, container: SymbolId, file: &str, name: &str) -> (SymbolId, TypeId) {
        self.class_with_heritage(container, file, name, vec![], vec![])
    }

    /// Heritage clause (`extends Base`) resolving to `ty`
    pub fn heritage(&mut self, file: &str, ty: TypeId, text: &str) -> NodeId {
        let node = self.node(file, NodeKind::TypeNode, text);
        self.oracle.set_node_type(node, ty);
        node
    }

    pub fn class_with_heritage(
        &mut self,
        container: SymbolId,
        file: &str,
        name: &str,
        extends: Vec<NodeId>,
        implements: Vec<NodeId>,
    ) -> (SymbolId, TypeId) {
        let symbol = self.declare(
            container,
            file,
            name,
            SymbolKind::Class,
            NodeKind::Class {
                type_parameters: vec![],
                extends,
                implements,
            },
        );
        let instance = self.object_type(symbol);
        self.oracle.set_declared_type(symbol, instance);
        let constructor = self.oracle.add_type(TypeInfo::new(TypeShape::Object));
        self.oracle.add_construct_signature(
            constructor,
            SignatureInfo {
                declaration: None,
                type_parameters: vec![],
                parameters: vec![],
                return_type: instance,
            },
        );
        self.oracle.set_value_type(symbol, constructor);
        (symbol, instance)
    }

    pub fn interface(&mut self, container: SymbolId, file: &str, name: &str) -> (SymbolId, TypeId) {
        self.interface_extending(container, file, name, vec![])
    }

    pub fn interface_extending(
        &mut self,
        container: SymbolId,
        file: &str,
        name: &str,
        extends: Vec<NodeId>,
    ) -> (SymbolId, TypeId) {
        let symbol = self.declare(
            container,
            file,
            name,
            SymbolKind::Interface,
            NodeKind::Interface {
                type_parameters: vec![],
                extends,
            },
        );
        let ty = self.object_type(symbol);
        self.oracle.set_declared_type(symbol, ty);
        (symbol, ty)
    }

    pub fn function(
        &mut self,
        container: SymbolId,
        file: &str,
        name: &str,
        return_type: TypeId,
    ) -> SymbolId {
        let symbol = self.declare(container, file, name, SymbolKind::Function, NodeKind::Function);
        let ty = self.function_type(vec![], return_type);
        self.oracle.set_value_type(symbol, ty);
        symbol
    }

    /// `export const name = <text>`
    pub fn constant(
        &mut self,
        container: SymbolId,
        file: &str,
        name: &str,
        ty: TypeId,
        text: &str,
    ) -> SymbolId {
        let initializer = self.node(file, NodeKind::Expression, text);
        let symbol = self.declare(
            container,
            file,
            name,
            SymbolKind::Variable,
            NodeKind::Variable {
                initializer: Some(initializer),
                type_annotation: None,
            },
        );
        self.oracle.set_value_type(symbol, ty);
        symbol
    }

    pub fn namespace(&mut self, container: SymbolId, file: &str, name: &str) -> SymbolId {
        self.declare(container, file, name, SymbolKind::Namespace, NodeKind::Namespace)
    }

    /// `export { target as name }`, declared in `file`
    pub fn alias(&mut self, container: SymbolId, file: &str, name: &str, target: SymbolId) -> SymbolId {
        let symbol = self.declare(container, file, name, SymbolKind::Alias, NodeKind::Other);
        self.oracle.set_aliased(symbol, target);
        symbol
    }

    /// Session over this program with one project named `app` at [`ROOT`]
    pub fn session(&self, config: DocgenConfig) -> ExtractionSession<'_> {
        let mut session = ExtractionSession::new(&self.oracle, config);
        session
            .add_project(ProjectSpec::new("app", ROOT))
            .expect("project should be accepted");
        session
    }
}
