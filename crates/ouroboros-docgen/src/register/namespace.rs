//! Namespace registration
//!
//! A namespace becomes a child module of its enclosing module. Nested
//! namespaces register their parent first (through `owning_module`) so the
//! path chain exists before the child is created.

use crate::ids::SymbolId;
use crate::model::{NamespaceInfo, ReferenceKind, TypeReference};
use crate::oracle::{NodeInfo, SymbolInfo};
use crate::session::{ExtractionSession, ModuleHandle};

impl<'o> ExtractionSession<'o> {
    pub(crate) fn register_namespace(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let parent = self.owning_module(info, node)?;
        let namespace = NamespaceInfo {
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
        };

        let modules = &mut self.projects.get_mut(parent.project)?.modules;
        let module = modules.namespace_module(parent.module, &info.name, namespace);
        let path = modules.get(parent.module)?.children_path.clone();

        let reference = self
            .registry
            .mint(&info.name, ReferenceKind::Module)
            .with_path(path);
        self.registry.insert(symbol, reference.clone());
        self.namespaces.insert(
            symbol,
            ModuleHandle {
                project: parent.project,
                module,
            },
        );

        let exports = self.oracle.exports_of(symbol);
        tracing::debug!(
            "Registering namespace '{}' with {} exports",
            info.name,
            exports.len()
        );
        for export in exports {
            if self.reference(export).is_none() {
                tracing::trace!("Namespace '{}': skipped export {:?}", info.name, export);
            }
        }
        Some(reference)
    }
}
