//! Declaration records attached to modules

use serde::{Deserialize, Serialize};

use super::members::{ObjectLiteral, Signature, TypeParameter};
use super::ty::Type;
use super::Loc;
use crate::comment::JsDoc;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<Type>,
    pub members: ObjectLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<Type>,
    pub members: ObjectLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Literal type, or the normalized initializer type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Type>,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_const: bool,
    pub members: Vec<EnumMember>,
}

impl EnumDecl {
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Function, or a constant whose value is callable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_async: bool,
    pub signatures: Vec<Signature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    /// Initializer text, truncated to the configured length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub name: String,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exported: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    pub value: Type,
}

/// Any declaration a module can own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Constant(ConstantDecl),
    TypeAlias(TypeAliasDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(d) => &d.name,
            Declaration::Interface(d) => &d.name,
            Declaration::Enum(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Constant(d) => &d.name,
            Declaration::TypeAlias(d) => &d.name,
        }
    }

    pub fn loc(&self) -> &Loc {
        match self {
            Declaration::Class(d) => &d.loc,
            Declaration::Interface(d) => &d.loc,
            Declaration::Enum(d) => &d.loc,
            Declaration::Function(d) => &d.loc,
            Declaration::Constant(d) => &d.loc,
            Declaration::TypeAlias(d) => &d.loc,
        }
    }

    pub fn jsdoc(&self) -> Option<&JsDoc> {
        match self {
            Declaration::Class(d) => d.jsdoc.as_ref(),
            Declaration::Interface(d) => d.jsdoc.as_ref(),
            Declaration::Enum(d) => d.jsdoc.as_ref(),
            Declaration::Function(d) => d.jsdoc.as_ref(),
            Declaration::Constant(d) => d.jsdoc.as_ref(),
            Declaration::TypeAlias(d) => d.jsdoc.as_ref(),
        }
    }

    /// Short kind name, matching the serialized tag
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Class(_) => "class",
            Declaration::Interface(_) => "interface",
            Declaration::Enum(_) => "enum",
            Declaration::Function(_) => "function",
            Declaration::Constant(_) => "constant",
            Declaration::TypeAlias(_) => "type_alias",
        }
    }
}
