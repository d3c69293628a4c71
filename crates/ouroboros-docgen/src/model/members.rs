//! Object-literal bodies, signatures and their members
//!
//! Shared between class/interface declarations and anonymous object types.

use serde::{Deserialize, Serialize};

use super::ty::Type;
use super::Loc;
use crate::comment::JsDoc;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Class-member flags read from syntax modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberFlags {
    #[serde(skip_serializing_if = "is_false")]
    pub is_private: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_protected: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_abstract: bool,
}

impl MemberFlags {
    pub fn is_empty(&self) -> bool {
        !(self.is_private || self.is_protected || self.is_static || self.is_abstract)
    }
}

/// Accessor declarations backing a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Generic type parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Type>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Type>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_rest: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    /// Source text of the default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One call or construct signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    pub return_type: Box<Type>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

impl Signature {
    pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Property (field or accessor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<AccessorKind>,
    #[serde(default, skip_serializing_if = "MemberFlags::is_empty")]
    pub flags: MemberFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Loc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

/// Method with every overload collapsed into one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub signatures: Vec<Signature>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "MemberFlags::is_empty")]
    pub flags: MemberFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Loc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

/// `[key: string]: T` / `[key: number]: T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSignature {
    pub key: Type,
    pub ty: Type,
}

/// Structural body of an object type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectLiteral {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub index_signatures: Vec<IndexSignature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub call_signatures: Vec<Signature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub construct_signatures: Vec<Signature>,
}

impl ObjectLiteral {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.methods.is_empty()
            && self.index_signatures.is_empty()
            && self.call_signatures.is_empty()
            && self.construct_signatures.is_empty()
    }

    /// Number of members of any kind
    pub fn member_count(&self) -> usize {
        self.properties.len()
            + self.methods.len()
            + self.index_signatures.len()
            + self.call_signatures.len()
            + self.construct_signatures.len()
    }
}
