//! In-memory oracle
//!
//! Holds a fully materialized program: symbols, nodes and types in flat
//! tables addressed by their ids. Hosts can build one programmatically or
//! load a JSON snapshot exported by an external type checker.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    IndexKind, Intrinsic, NodeInfo, NodeKind, SignatureInfo, SymbolInfo, SymbolKind, TypeInfo,
    TypeOracle, TypeShape, WildcardExport,
};
use crate::error::Result;
use crate::ids::{NodeId, SymbolId, TypeId};

/// Symbol table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub info: SymbolInfo,
    #[serde(default)]
    pub aliased: Option<SymbolId>,
    #[serde(default)]
    pub exports: Vec<SymbolId>,
    #[serde(default)]
    pub wildcard_exports: Vec<WildcardExport>,
    #[serde(default)]
    pub declared_type: Option<TypeId>,
    #[serde(default)]
    pub value_type: Option<TypeId>,
}

/// Type table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    pub info: TypeInfo,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub type_arguments: Vec<TypeId>,
    #[serde(default)]
    pub call_signatures: Vec<SignatureInfo>,
    #[serde(default)]
    pub construct_signatures: Vec<SignatureInfo>,
    #[serde(default)]
    pub properties: Vec<SymbolId>,
    #[serde(default)]
    pub string_index: Option<TypeId>,
    #[serde(default)]
    pub number_index: Option<TypeId>,
}

impl TypeRecord {
    fn new(info: TypeInfo) -> Self {
        Self {
            info,
            text: None,
            type_arguments: Vec::new(),
            call_signatures: Vec::new(),
            construct_signatures: Vec::new(),
            properties: Vec::new(),
            string_index: None,
            number_index: None,
        }
    }
}

/// Program held entirely in memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryOracle {
    #[serde(default)]
    symbols: Vec<SymbolRecord>,
    #[serde(default)]
    nodes: Vec<NodeInfo>,
    #[serde(default)]
    types: Vec<TypeRecord>,
    #[serde(default)]
    files: BTreeMap<PathBuf, SymbolId>,
    #[serde(default)]
    default_library: BTreeSet<PathBuf>,
    #[serde(default)]
    intrinsics: Vec<(Intrinsic, TypeId)>,
    #[serde(default)]
    node_types: BTreeMap<NodeId, TypeId>,
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a program snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export the program as a JSON snapshot
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register a source file and its module symbol
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> SymbolId {
        let path = path.into();
        if let Some(symbol) = self.files.get(&path) {
            return *symbol;
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let node = self.add_node(NodeInfo::new(NodeKind::SourceFile, path.clone()));
        let symbol = self.add_symbol(SymbolInfo::new(name, SymbolKind::SourceFile).with_declaration(node));
        self.files.insert(path, symbol);
        symbol
    }

    pub fn add_node(&mut self, node: NodeInfo) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn add_symbol(&mut self, info: SymbolInfo) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolRecord {
            info,
            aliased: None,
            exports: Vec::new(),
            wildcard_exports: Vec::new(),
            declared_type: None,
            value_type: None,
        });
        id
    }

    pub fn add_type(&mut self, info: TypeInfo) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeRecord::new(info));
        id
    }

    /// Add a declaration node and a symbol declared by it
    pub fn declare(
        &mut self,
        parent: Option<SymbolId>,
        name: impl Into<String>,
        kind: SymbolKind,
        node: NodeInfo,
    ) -> SymbolId {
        let name = name.into();
        let node = if node.name.is_none() {
            node.with_name(name.clone())
        } else {
            node
        };
        let node = self.add_node(node);
        let mut info = SymbolInfo::new(name, kind).with_declaration(node);
        info.parent = parent;
        self.add_symbol(info)
    }

    /// Add another declaration site to an existing symbol
    pub fn add_declaration(&mut self, symbol: SymbolId, node: NodeInfo) -> Option<NodeId> {
        let node = self.add_node(node);
        let record = self.symbols.get_mut(symbol.index())?;
        record.info.declarations.push(node);
        Some(node)
    }

    /// Mark `symbol` as exported from `container`
    pub fn export(&mut self, container: SymbolId, symbol: SymbolId) {
        if let Some(record) = self.symbols.get_mut(container.index()) {
            if !record.exports.contains(&symbol) {
                record.exports.push(symbol);
            }
        }
    }

    pub fn add_wildcard_export(&mut self, file_symbol: SymbolId, export: WildcardExport) {
        if let Some(record) = self.symbols.get_mut(file_symbol.index()) {
            record.wildcard_exports.push(export);
        }
    }

    pub fn set_declared_type(&mut self, symbol: SymbolId, ty: TypeId) {
        if let Some(record) = self.symbols.get_mut(symbol.index()) {
            record.declared_type = Some(ty);
        }
    }

    pub fn set_value_type(&mut self, symbol: SymbolId, ty: TypeId) {
        if let Some(record) = self.symbols.get_mut(symbol.index()) {
            record.value_type = Some(ty);
        }
    }

    /// Point an alias symbol at its target
    pub fn set_aliased(&mut self, alias: SymbolId, target: SymbolId) {
        if let Some(record) = self.symbols.get_mut(alias.index()) {
            record.aliased = Some(target);
        }
    }

    pub fn set_node_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    pub fn mark_default_library(&mut self, path: impl Into<PathBuf>) {
        self.default_library.insert(path.into());
    }

    /// Get the intrinsic type of `kind`, creating it on first use
    pub fn intrinsic_type(&mut self, kind: Intrinsic) -> TypeId {
        if let Some((_, id)) = self.intrinsics.iter().find(|(k, _)| *k == kind) {
            return *id;
        }
        let id = self.add_type(TypeInfo::new(TypeShape::Intrinsic(kind)));
        self.intrinsics.push((kind, id));
        id
    }

    /// Get a mutable type record for setting members, signatures and text
    pub fn type_mut(&mut self, ty: TypeId) -> Option<&mut TypeRecord> {
        self.types.get_mut(ty.index())
    }

    pub fn set_type_text(&mut self, ty: TypeId, text: impl Into<String>) {
        if let Some(record) = self.type_mut(ty) {
            record.text = Some(text.into());
        }
    }

    pub fn add_property(&mut self, ty: TypeId, property: SymbolId) {
        if let Some(record) = self.type_mut(ty) {
            record.properties.push(property);
        }
    }

    pub fn add_call_signature(&mut self, ty: TypeId, signature: SignatureInfo) {
        if let Some(record) = self.type_mut(ty) {
            record.call_signatures.push(signature);
        }
    }

    pub fn add_construct_signature(&mut self, ty: TypeId, signature: SignatureInfo) {
        if let Some(record) = self.type_mut(ty) {
            record.construct_signatures.push(signature);
        }
    }

    pub fn set_type_arguments(&mut self, ty: TypeId, arguments: Vec<TypeId>) {
        if let Some(record) = self.type_mut(ty) {
            record.type_arguments = arguments;
        }
    }

    pub fn set_index_type(&mut self, ty: TypeId, kind: IndexKind, value: TypeId) {
        if let Some(record) = self.type_mut(ty) {
            match kind {
                IndexKind::String => record.string_index = Some(value),
                IndexKind::Number => record.number_index = Some(value),
            }
        }
    }

    fn render(&self, ty: TypeId, depth: usize) -> String {
        let Some(record) = self.types.get(ty.index()) else {
            return "unknown".to_string();
        };
        if let Some(text) = &record.text {
            return text.clone();
        }
        if depth > 8 {
            return "...".to_string();
        }
        let join = |types: &[TypeId], sep: &str| {
            types
                .iter()
                .map(|t| self.render(*t, depth + 1))
                .collect::<Vec<_>>()
                .join(sep)
        };
        match &record.info.shape {
            TypeShape::Intrinsic(kind) => kind.keyword().to_string(),
            TypeShape::StringLiteral(value) => format!("{:?}", value),
            TypeShape::NumberLiteral(value) => value.to_string(),
            TypeShape::BigIntLiteral(value) => format!("{}n", value),
            TypeShape::Union(types) => join(types, " | "),
            TypeShape::Intersection(types) => join(types, " & "),
            TypeShape::Array(element) => format!("{}[]", self.render(*element, depth + 1)),
            TypeShape::Tuple(members) => {
                let elements: Vec<TypeId> = members.iter().map(|m| m.ty).collect();
                format!("[{}]", join(&elements, ", "))
            }
            TypeShape::Index(target) => format!("keyof {}", self.render(*target, depth + 1)),
            _ => record
                .info
                .symbol
                .and_then(|s| self.symbols.get(s.index()))
                .map(|s| s.info.name.clone())
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

impl TypeOracle for MemoryOracle {
    fn source_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    fn file_symbol(&self, file: &Path) -> Option<SymbolId> {
        self.files.get(file).copied()
    }

    fn is_default_library(&self, file: &Path) -> bool {
        self.default_library.contains(file)
    }

    fn symbol(&self, symbol: SymbolId) -> Option<SymbolInfo> {
        self.symbols.get(symbol.index()).map(|r| r.info.clone())
    }

    fn aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.symbols.get(symbol.index()).and_then(|r| r.aliased)
    }

    fn exports_of(&self, symbol: SymbolId) -> Vec<SymbolId> {
        self.symbols
            .get(symbol.index())
            .map(|r| r.exports.clone())
            .unwrap_or_default()
    }

    fn wildcard_exports(&self, file_symbol: SymbolId) -> Vec<WildcardExport> {
        self.symbols
            .get(file_symbol.index())
            .map(|r| r.wildcard_exports.clone())
            .unwrap_or_default()
    }

    fn declared_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.symbols.get(symbol.index()).and_then(|r| r.declared_type)
    }

    fn type_of_symbol(&self, symbol: SymbolId) -> Option<TypeId> {
        self.symbols.get(symbol.index()).and_then(|r| r.value_type)
    }

    fn node(&self, node: NodeId) -> Option<NodeInfo> {
        self.nodes.get(node.index()).cloned()
    }

    fn type_at(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    fn type_info(&self, ty: TypeId) -> Option<TypeInfo> {
        self.types.get(ty.index()).map(|r| r.info.clone())
    }

    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId> {
        self.types
            .get(ty.index())
            .map(|r| r.type_arguments.clone())
            .unwrap_or_default()
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<SignatureInfo> {
        self.types
            .get(ty.index())
            .map(|r| r.call_signatures.clone())
            .unwrap_or_default()
    }

    fn construct_signatures(&self, ty: TypeId) -> Vec<SignatureInfo> {
        self.types
            .get(ty.index())
            .map(|r| r.construct_signatures.clone())
            .unwrap_or_default()
    }

    fn properties(&self, ty: TypeId) -> Vec<SymbolId> {
        self.types
            .get(ty.index())
            .map(|r| r.properties.clone())
            .unwrap_or_default()
    }

    fn index_type(&self, ty: TypeId, kind: IndexKind) -> Option<TypeId> {
        let record = self.types.get(ty.index())?;
        match kind {
            IndexKind::String => record.string_index,
            IndexKind::Number => record.number_index,
        }
    }

    fn type_to_string(&self, ty: TypeId) -> String {
        self.render(ty, 0)
    }

    fn intrinsic(&self, kind: Intrinsic) -> Option<TypeId> {
        self.intrinsics
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
    }
}
