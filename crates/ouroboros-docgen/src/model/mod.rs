//! Renderer-agnostic documentation model
//!
//! Everything here is plain serde data: once extraction finishes, the model
//! holds no handles back into the type oracle.

mod decl;
mod members;
mod module;
mod reference;
mod ty;

pub use decl::{
    ClassDecl, ConstantDecl, Declaration, EnumDecl, EnumMember, FunctionDecl, InterfaceDecl,
    TypeAliasDecl,
};
pub use members::{
    AccessorKind, FunctionParameter, IndexSignature, MemberFlags, Method, ObjectLiteral, Property,
    Signature, TypeParameter,
};
pub use module::{ExportedReference, FileExports, Module, NamespaceInfo, ReExport};
pub use reference::{ReferenceKind, TypeReference};
pub use ty::{
    MappedModifier, MappedType, PrimitiveKind, TemplateSpan, TupleElement, Type, TypeOperator,
};

use serde::{Deserialize, Serialize};

/// Source location (zero-based line and character)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub line: u32,
    pub character: u32,
    /// Source file relative to the project root, set on top-level declarations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Loc {
    pub fn new(line: u32, character: u32) -> Self {
        Self {
            line,
            character,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
