//! Type oracle interface
//!
//! The engine never parses or type-checks source code itself. Everything it
//! knows about a program comes through [`TypeOracle`], a synchronous,
//! side-effect-free query service supplied by the host.
//!
//! Handles ([`SymbolId`], [`TypeId`], [`NodeId`]) are opaque: the engine only
//! compares them for identity and hands them back to the oracle.

mod memory;

pub use memory::{MemoryOracle, SymbolRecord, TypeRecord};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, SymbolId, TypeId};
use crate::model::{MappedModifier, TypeOperator};

/// Symbol categories the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    Function,
    Variable,
    TypeAlias,
    TypeParameter,
    Namespace,
    SourceFile,
    /// Import or export specifier pointing at another symbol
    Alias,
    Property,
    Method,
    Accessor,
    Parameter,
    TypeLiteral,
    Other,
}

impl SymbolKind {
    /// Whether the symbol names a documentable declaration
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::EnumMember
                | SymbolKind::Function
                | SymbolKind::Variable
                | SymbolKind::TypeAlias
        )
    }
}

/// Symbol information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub kind: SymbolKind,
    /// Declaration sites, in source order
    #[serde(default)]
    pub declarations: Vec<NodeId>,
    /// Enclosing symbol (namespace, enum, class)
    #[serde(default)]
    pub parent: Option<SymbolId>,
}

impl SymbolInfo {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declarations: Vec::new(),
            parent: None,
        }
    }

    pub fn with_declaration(mut self, node: NodeId) -> Self {
        self.declarations.push(node);
        self
    }

    pub fn with_parent(mut self, parent: SymbolId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Primary declaration site
    pub fn declaration(&self) -> Option<NodeId> {
        self.declarations.first().copied()
    }
}

/// Syntax modifiers on a declaration node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub is_exported: bool,
    pub is_default: bool,
    pub is_public: bool,
    pub is_private: bool,
    pub is_protected: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub is_async: bool,
    /// `?` token on a property, method or parameter
    pub is_optional: bool,
}

/// Syntax-level view of a declaration or type node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    SourceFile,
    Class {
        #[serde(default)]
        type_parameters: Vec<NodeId>,
        #[serde(default)]
        extends: Vec<NodeId>,
        #[serde(default)]
        implements: Vec<NodeId>,
    },
    Interface {
        #[serde(default)]
        type_parameters: Vec<NodeId>,
        #[serde(default)]
        extends: Vec<NodeId>,
    },
    Enum {
        #[serde(default)]
        is_const: bool,
    },
    EnumMember {
        #[serde(default)]
        initializer: Option<NodeId>,
    },
    Function,
    Variable {
        #[serde(default)]
        initializer: Option<NodeId>,
        #[serde(default)]
        type_annotation: Option<NodeId>,
    },
    TypeAlias {
        #[serde(default)]
        type_parameters: Vec<NodeId>,
        #[serde(default)]
        value: Option<NodeId>,
    },
    Namespace,
    TypeParameter {
        #[serde(default)]
        constraint: Option<NodeId>,
        #[serde(default)]
        default: Option<NodeId>,
        /// Declared by an `infer X` clause
        #[serde(default)]
        in_infer: bool,
    },
    /// Named type reference such as `Foo<T>`
    TypeReference {
        #[serde(default)]
        target: Option<SymbolId>,
        #[serde(default)]
        type_arguments: Vec<NodeId>,
    },
    Parameter {
        #[serde(default)]
        is_rest: bool,
        #[serde(default)]
        initializer: Option<NodeId>,
        #[serde(default)]
        type_annotation: Option<NodeId>,
    },
    Property {
        #[serde(default)]
        type_annotation: Option<NodeId>,
    },
    Method,
    GetAccessor,
    SetAccessor,
    Constructor,
    Expression,
    TypeNode,
    Other,
}

/// Syntax node information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub kind: NodeKind,
    /// Absolute path of the containing file
    pub file: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub character: u32,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Source text of the node
    #[serde(default)]
    pub text: Option<String>,
    /// Raw `/** ... */` comment attached to the node
    #[serde(default)]
    pub doc_comment: Option<String>,
}

impl NodeInfo {
    pub fn new(kind: NodeKind, file: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            file: file.into(),
            name: None,
            line: 0,
            character: 0,
            modifiers: Modifiers::default(),
            text: None,
            doc_comment: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, line: u32, character: u32) -> Self {
        self.line = line;
        self.character = character;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_doc_comment(mut self, comment: impl Into<String>) -> Self {
        self.doc_comment = Some(comment.into());
        self
    }

    pub fn is_file(&self, file: &Path) -> bool {
        self.file == file
    }
}

/// Built-in intrinsic types, compared by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intrinsic {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    True,
    False,
    BigInt,
    Symbol,
    Void,
    Undefined,
    Null,
    Never,
    Object,
}

impl Intrinsic {
    pub fn keyword(&self) -> &'static str {
        match self {
            Intrinsic::Any => "any",
            Intrinsic::Unknown => "unknown",
            Intrinsic::String => "string",
            Intrinsic::Number => "number",
            Intrinsic::Boolean => "boolean",
            Intrinsic::True => "true",
            Intrinsic::False => "false",
            Intrinsic::BigInt => "bigint",
            Intrinsic::Symbol => "symbol",
            Intrinsic::Void => "void",
            Intrinsic::Undefined => "undefined",
            Intrinsic::Null => "null",
            Intrinsic::Never => "never",
            Intrinsic::Object => "object",
        }
    }
}

/// Tuple element as reported by the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleMember {
    pub ty: TypeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
}

/// Structural category of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeShape {
    Intrinsic(Intrinsic),
    StringLiteral(String),
    NumberLiteral(f64),
    BigIntLiteral(String),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    /// Class instance, interface, anonymous object or function type
    Object,
    Array(TypeId),
    Tuple(Vec<TupleMember>),
    TypeParameter,
    Mapped {
        type_parameter: TypeId,
        #[serde(default)]
        constraint: Option<TypeId>,
        #[serde(default)]
        template: Option<TypeId>,
        #[serde(default)]
        name_type: Option<TypeId>,
        #[serde(default)]
        readonly: Option<MappedModifier>,
        #[serde(default)]
        optional: Option<MappedModifier>,
    },
    Conditional {
        check: TypeId,
        extends: TypeId,
        true_type: TypeId,
        false_type: TypeId,
    },
    IndexedAccess {
        object: TypeId,
        index: TypeId,
    },
    /// `keyof T`
    Index(TypeId),
    Operator {
        operator: TypeOperator,
        target: TypeId,
    },
    /// `texts.len() == types.len() + 1`
    TemplateLiteral {
        texts: Vec<String>,
        types: Vec<TypeId>,
    },
    /// `Uppercase<T>` and friends
    StringMapping {
        name: String,
        target: TypeId,
    },
    Unrecognized,
}

/// Alias instantiation attached to a type (`Partial<User>` at a use site)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasInstance {
    pub symbol: SymbolId,
    #[serde(default)]
    pub type_arguments: Vec<TypeId>,
}

/// Type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub shape: TypeShape,
    /// Owning symbol (class, interface, enum, type parameter, ...)
    #[serde(default)]
    pub symbol: Option<SymbolId>,
    #[serde(default)]
    pub alias: Option<AliasInstance>,
}

impl TypeInfo {
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            symbol: None,
            alias: None,
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_alias(mut self, symbol: SymbolId, type_arguments: Vec<TypeId>) -> Self {
        self.alias = Some(AliasInstance {
            symbol,
            type_arguments,
        });
        self
    }
}

/// Call or construct signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureInfo {
    #[serde(default)]
    pub declaration: Option<NodeId>,
    #[serde(default)]
    pub type_parameters: Vec<TypeId>,
    /// Parameter symbols, in order
    #[serde(default)]
    pub parameters: Vec<SymbolId>,
    pub return_type: TypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    String,
    Number,
}

/// `export * from "./b"` or `export * as ns from "./b"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardExport {
    /// Source-file symbol of the re-exported module
    pub target: SymbolId,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Query interface over a type-checked program
pub trait TypeOracle {
    /// All source files of the program, including the default library
    fn source_files(&self) -> Vec<PathBuf>;

    /// Module symbol of a source file
    fn file_symbol(&self, file: &Path) -> Option<SymbolId>;

    /// Whether the file belongs to the language's built-in library
    fn is_default_library(&self, file: &Path) -> bool;

    fn symbol(&self, symbol: SymbolId) -> Option<SymbolInfo>;

    /// Next link of an alias chain (one hop)
    fn aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId>;

    /// Explicitly exported symbols of a file, namespace or enum
    ///
    /// Names reached only through `export *` are reported separately by
    /// [`TypeOracle::wildcard_exports`].
    fn exports_of(&self, symbol: SymbolId) -> Vec<SymbolId>;

    fn wildcard_exports(&self, file_symbol: SymbolId) -> Vec<WildcardExport>;

    /// Type a symbol declares (instance type of a class, aliased type, ...)
    fn declared_type(&self, symbol: SymbolId) -> Option<TypeId>;

    /// Type of the symbol's value (constructor type of a class, ...)
    fn type_of_symbol(&self, symbol: SymbolId) -> Option<TypeId>;

    fn node(&self, node: NodeId) -> Option<NodeInfo>;

    fn type_at(&self, node: NodeId) -> Option<TypeId>;

    fn type_info(&self, ty: TypeId) -> Option<TypeInfo>;

    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId>;

    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureInfo>;

    fn construct_signatures(&self, ty: TypeId) -> Vec<SignatureInfo>;

    /// Property symbols of a type, including methods
    fn properties(&self, ty: TypeId) -> Vec<SymbolId>;

    fn index_type(&self, ty: TypeId, kind: IndexKind) -> Option<TypeId>;

    /// Textual rendering of a type
    fn type_to_string(&self, ty: TypeId) -> String;

    /// Identity of a built-in intrinsic type
    fn intrinsic(&self, kind: Intrinsic) -> Option<TypeId>;
}
