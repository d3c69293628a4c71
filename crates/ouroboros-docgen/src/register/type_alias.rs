//! Type alias registration

use crate::ids::SymbolId;
use crate::model::{Declaration, ReferenceKind, TypeAliasDecl, TypeReference};
use crate::oracle::{NodeInfo, NodeKind, SymbolInfo};
use crate::session::ExtractionSession;

impl<'o> ExtractionSession<'o> {
    pub(crate) fn register_type_alias(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let NodeKind::TypeAlias {
            type_parameters,
            value,
        } = &node.kind
        else {
            tracing::trace!("Skipping type alias '{}': unexpected declaration node", info.name);
            return None;
        };
        let Some(ty) = self.oracle.declared_type(symbol) else {
            tracing::debug!("Skipping type alias '{}': no declared type", info.name);
            return None;
        };

        let (reference, handle) =
            self.begin_declaration(symbol, info, node, ReferenceKind::TypeAlias)?;

        let type_parameters = self.type_parameters(type_parameters);
        // the alias's own name must not stand in for its definition
        let value = self.normalize_expanding(ty, *value, symbol);

        let declaration = TypeAliasDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            type_parameters,
            value,
        };
        self.finish_declaration(handle, &reference, Declaration::TypeAlias(declaration));
        Some(reference)
    }
}
