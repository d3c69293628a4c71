//! Stable handles standing in for declarations wherever they are used as types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::ReferenceId;

/// What a [`TypeReference`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Class,
    Interface,
    Enum,
    EnumMember,
    Function,
    Constant,
    TypeAlias,
    TypeParameter,
    Module,
    StringUtility,
    Unknown,
}

impl ReferenceKind {
    /// Get a display name for the reference kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Class => "class",
            ReferenceKind::Interface => "interface",
            ReferenceKind::Enum => "enum",
            ReferenceKind::EnumMember => "enum-member",
            ReferenceKind::Function => "function",
            ReferenceKind::Constant => "constant",
            ReferenceKind::TypeAlias => "type-alias",
            ReferenceKind::TypeParameter => "type-parameter",
            ReferenceKind::Module => "module",
            ReferenceKind::StringUtility => "string-utility",
            ReferenceKind::Unknown => "unknown",
        }
    }

    /// Whether references of this kind point at a registered declaration
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            ReferenceKind::Class
                | ReferenceKind::Interface
                | ReferenceKind::Enum
                | ReferenceKind::Function
                | ReferenceKind::Constant
                | ReferenceKind::TypeAlias
        )
    }
}

/// Deduplicated handle for one program symbol
///
/// Every reference minted during a pass carries a unique `id`, so two
/// references compare equal only when they stand for the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReference {
    pub id: ReferenceId,
    pub name: String,
    pub kind: ReferenceKind,
    /// Children path of the owning module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    /// Enclosing reference (enum members point at their enum)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<TypeReference>>,
    /// Documentation link for symbols declared outside the analyzed sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TypeReference {
    pub fn new(id: ReferenceId, name: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            path: None,
            parent: None,
            link: None,
        }
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_parent(mut self, parent: TypeReference) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    /// External references are terminal: their path is not meaningful
    pub fn is_external(&self) -> bool {
        self.link.is_some()
    }

    /// Same underlying symbol
    pub fn same_symbol(&self, other: &TypeReference) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{}.", parent.name)?;
        }
        write!(f, "{}", self.name)
    }
}
