//! Declaration registrars
//!
//! [`ExtractionSession::reference`] is the single entry point: it turns a
//! program symbol into its [`TypeReference`], dispatching to the registrar
//! for the symbol's kind the first time the symbol is seen.
//!
//! Every registrar follows the same protocol:
//! 1. fetch the oracle type it needs, bailing out (uncached) if missing
//! 2. [`begin_declaration`](ExtractionSession::begin_declaration) mints and caches the reference
//! 3. build the declaration body, which may re-enter `reference`
//! 4. [`finish_declaration`](ExtractionSession::finish_declaration) fires hooks and attaches it

mod class;
mod enums;
mod function;
mod namespace;
mod type_alias;

use std::collections::HashSet;

use crate::comment::{self, JsDoc};
use crate::external::ExternalOrigin;
use crate::ids::SymbolId;
use crate::model::{Declaration, Loc, ReferenceKind, TypeReference};
use crate::oracle::{NodeInfo, SymbolInfo, SymbolKind};
use crate::session::{ExtractionSession, ModuleHandle};

/// Reference kind a symbol kind maps to
pub(crate) fn reference_kind(kind: SymbolKind) -> ReferenceKind {
    match kind {
        SymbolKind::Class => ReferenceKind::Class,
        SymbolKind::Interface => ReferenceKind::Interface,
        SymbolKind::Enum => ReferenceKind::Enum,
        SymbolKind::EnumMember => ReferenceKind::EnumMember,
        SymbolKind::Function => ReferenceKind::Function,
        SymbolKind::Variable => ReferenceKind::Constant,
        SymbolKind::TypeAlias => ReferenceKind::TypeAlias,
        SymbolKind::TypeParameter => ReferenceKind::TypeParameter,
        SymbolKind::Namespace | SymbolKind::SourceFile => ReferenceKind::Module,
        _ => ReferenceKind::Unknown,
    }
}

impl<'o> ExtractionSession<'o> {
    /// Get the reference for a program symbol, registering its declaration
    /// on first sight
    ///
    /// Returns the same reference for every call within a pass, including
    /// re-entrant calls made while the symbol's own declaration is being
    /// built. Symbols without a declaration site yield `None` and are not
    /// cached.
    pub fn reference(&mut self, symbol: SymbolId) -> Option<TypeReference> {
        if let Some(reference) = self.registry.get(symbol) {
            return Some(reference.clone());
        }

        let target = self.resolve_alias(symbol);
        if target != symbol {
            if let Some(reference) = self.registry.get(target).cloned() {
                self.registry.insert(symbol, reference.clone());
                return Some(reference);
            }
        }

        let info = self.oracle.symbol(target)?;
        let reference = self.resolve_symbol(target, &info)?;
        if target != symbol {
            self.registry.insert(symbol, reference.clone());
        }
        Some(reference)
    }

    /// Follow an alias chain to its final target
    pub(crate) fn resolve_alias(&self, symbol: SymbolId) -> SymbolId {
        let mut seen = HashSet::new();
        let mut current = symbol;
        while let Some(next) = self.oracle.aliased_symbol(current) {
            if !seen.insert(current) {
                tracing::warn!("Alias cycle through {:?}", current);
                break;
            }
            current = next;
        }
        current
    }

    fn resolve_symbol(&mut self, symbol: SymbolId, info: &SymbolInfo) -> Option<TypeReference> {
        if info.kind == SymbolKind::TypeParameter {
            let reference = self.registry.mint(&info.name, ReferenceKind::TypeParameter);
            self.registry.insert(symbol, reference.clone());
            return Some(reference);
        }

        let Some(declaration) = info.declaration() else {
            tracing::trace!("Skipping '{}': no declaration site", info.name);
            return None;
        };
        let node = self.oracle.node(declaration)?;

        if self.is_external_file(&node.file) {
            return Some(self.external_reference(symbol, info, &node));
        }

        // registering the enclosing namespace registers its exports,
        // which may include this symbol
        if let Some(parent) = info.parent {
            if !self.namespaces.contains_key(&parent) && self.is_namespace(parent) {
                self.reference(parent);
                if let Some(reference) = self.registry.get(symbol) {
                    return Some(reference.clone());
                }
            }
        }

        // nesting depth counts within one declaration, not across the chain
        // of declarations registered from inside it
        let depth = std::mem::take(&mut self.depth);
        let reference = match info.kind {
            SymbolKind::Class => self.register_class(symbol, info, &node),
            SymbolKind::Interface => self.register_interface(symbol, info, &node),
            SymbolKind::Enum => self.register_enum(symbol, info, &node),
            SymbolKind::EnumMember => {
                // members are registered together with their enum
                self.reference(info.parent?)?;
                self.registry.get(symbol).cloned()
            }
            SymbolKind::Function => self.register_function(symbol, info, &node),
            SymbolKind::Variable => self.register_variable(symbol, info, &node),
            SymbolKind::TypeAlias => self.register_type_alias(symbol, info, &node),
            SymbolKind::Namespace => self.register_namespace(symbol, info, &node),
            SymbolKind::SourceFile => self.file_module_reference(symbol, &node),
            kind => {
                tracing::trace!("Skipping '{}': {:?} is not a declaration", info.name, kind);
                None
            }
        };
        self.depth = depth;
        reference
    }

    fn external_reference(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> TypeReference {
        let kind = reference_kind(info.kind);
        let origin =
            ExternalOrigin::from_file(&node.file, self.oracle.is_default_library(&node.file));
        let link = self
            .resolvers
            .resolve(&info.name, kind, origin.library.as_deref(), &origin.path);
        if link.is_none() {
            tracing::trace!(
                "No link for external '{}' from {:?}",
                info.name,
                origin.library
            );
        }

        let mut reference = self.registry.mint(&info.name, kind).with_link(link);
        self.registry.insert(symbol, reference.clone());

        if info.kind == SymbolKind::EnumMember {
            if let Some(parent) = info.parent.and_then(|p| self.reference(p)) {
                reference = reference.with_parent(parent);
                self.registry.insert(symbol, reference.clone());
            }
        }
        reference
    }

    fn file_module_reference(&mut self, symbol: SymbolId, node: &NodeInfo) -> Option<TypeReference> {
        let handle = self.resolve_module(&node.file)?;
        let module = self.module(handle)?;
        let (name, path) = (module.name.clone(), module.path.clone());
        let reference = self
            .registry
            .mint(name, ReferenceKind::Module)
            .with_path(path);
        self.registry.insert(symbol, reference.clone());
        Some(reference)
    }

    /// Module a declaration belongs to: its enclosing namespace, else its file's module
    pub(crate) fn owning_module(&mut self, info: &SymbolInfo, node: &NodeInfo) -> Option<ModuleHandle> {
        if let Some(parent) = info.parent {
            if self.is_namespace(parent) {
                if !self.namespaces.contains_key(&parent) {
                    self.reference(parent);
                }
                if let Some(handle) = self.namespaces.get(&parent) {
                    return Some(*handle);
                }
            }
        }
        self.resolve_module(&node.file)
    }

    fn is_namespace(&self, symbol: SymbolId) -> bool {
        self.oracle
            .symbol(symbol)
            .map_or(false, |s| s.kind == SymbolKind::Namespace)
    }

    /// Mint and cache the reference before the declaration body is built
    pub(crate) fn begin_declaration(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
        kind: ReferenceKind,
    ) -> Option<(TypeReference, ModuleHandle)> {
        let handle = self.owning_module(info, node)?;
        let path = self.module(handle)?.children_path.clone();
        let reference = self.registry.mint(&info.name, kind).with_path(path);
        self.registry.insert(symbol, reference.clone());
        Some((reference, handle))
    }

    /// Fire hooks, then attach the declaration to its module
    pub(crate) fn finish_declaration(
        &mut self,
        handle: ModuleHandle,
        reference: &TypeReference,
        declaration: Declaration,
    ) {
        let Some(module) = self
            .projects
            .get_mut(handle.project)
            .and_then(|p| p.modules.get_mut(handle.module))
        else {
            return;
        };

        for hook in self.hooks.iter_mut() {
            hook(&declaration, reference, &*module);
        }

        tracing::debug!(
            "Registered {} '{}' in {:?}",
            declaration.kind_name(),
            declaration.name(),
            module.children_path
        );
        module.add_declaration(declaration);
    }

    /// Location of a declaration; top-level declarations carry their file
    pub(crate) fn declaration_loc(&self, info: &SymbolInfo, node: &NodeInfo) -> Loc {
        let loc = Loc::new(node.line, node.character);
        if info.parent.map_or(false, |p| self.is_namespace(p)) {
            return loc;
        }
        match self.relative_file(&node.file) {
            Some(file) => loc.with_file(file),
            None => loc,
        }
    }

    pub(crate) fn jsdoc(&self, node: &NodeInfo) -> Option<JsDoc> {
        node.doc_comment.as_deref().and_then(comment::parse)
    }
}
