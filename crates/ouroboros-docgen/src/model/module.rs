//! Modules and their per-file export maps

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::decl::{
    ClassDecl, ConstantDecl, Declaration, EnumDecl, FunctionDecl, InterfaceDecl, TypeAliasDecl,
};
use super::reference::TypeReference;
use super::Loc;
use crate::comment::JsDoc;
use crate::ids::ModuleId;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Metadata for a module that stands for an in-language namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

/// A directory-scoped (or namespace-scoped) group of declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    /// Ancestor module names, excluding this module
    pub path: Vec<String>,
    /// `path` followed by `name`
    pub children_path: Vec<String>,
    pub base_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<NamespaceInfo>,
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleId>,
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
    #[serde(default)]
    pub types: Vec<TypeAliasDecl>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    #[serde(default)]
    pub constants: Vec<ConstantDecl>,
    /// Export map keyed by source file, relative to the project root
    #[serde(default)]
    pub exports: BTreeMap<String, FileExports>,
}

impl Module {
    pub fn new(name: impl Into<String>, path: Vec<String>, base_dir: PathBuf) -> Self {
        let name = name.into();
        let mut children_path = path.clone();
        children_path.push(name.clone());
        Self {
            name,
            path,
            children_path,
            base_dir,
            namespace: None,
            modules: BTreeMap::new(),
            classes: Vec::new(),
            interfaces: Vec::new(),
            enums: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
            constants: Vec::new(),
            exports: BTreeMap::new(),
        }
    }

    /// Append a declaration to the list matching its kind
    pub fn add_declaration(&mut self, declaration: Declaration) {
        match declaration {
            Declaration::Class(d) => self.classes.push(d),
            Declaration::Interface(d) => self.interfaces.push(d),
            Declaration::Enum(d) => self.enums.push(d),
            Declaration::Function(d) => self.functions.push(d),
            Declaration::Constant(d) => self.constants.push(d),
            Declaration::TypeAlias(d) => self.types.push(d),
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|d| d.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.interfaces.iter().find(|d| d.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|d| d.name == name)
    }

    pub fn type_alias(&self, name: &str) -> Option<&TypeAliasDecl> {
        self.types.iter().find(|d| d.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|d| d.name == name)
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantDecl> {
        self.constants.iter().find(|d| d.name == name)
    }

    pub fn is_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    /// Total number of declarations owned directly by this module
    pub fn declaration_count(&self) -> usize {
        self.classes.len()
            + self.interfaces.len()
            + self.enums.len()
            + self.types.len()
            + self.functions.len()
            + self.constants.len()
    }
}

/// Exported reference, with the exported name when it differs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedReference {
    pub reference: TypeReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ExportedReference {
    /// Name under which the reference is exported
    pub fn exported_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.reference.name)
    }
}

/// Names re-published from one originating file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReExport {
    /// Children path of the originating file's module
    pub module: Vec<String>,
    /// Originating file, relative to its project root
    pub file: String,
    /// `export * as ns from ...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub same_module: bool,
    /// `export * from ...`
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ExportedReference>,
}

/// Exports of a single source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileExports {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<ExportedReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reexports: Vec<ReExport>,
}

impl FileExports {
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty() && self.reexports.is_empty()
    }

    pub fn export(&self, name: &str) -> Option<&ExportedReference> {
        self.exports.iter().find(|e| e.exported_name() == name)
    }
}
