//! Enum registration

use crate::ids::SymbolId;
use crate::model::{Declaration, EnumDecl, EnumMember, Loc, ReferenceKind, TypeReference};
use crate::oracle::{NodeInfo, NodeKind, SymbolInfo, SymbolKind};
use crate::session::ExtractionSession;

impl<'o> ExtractionSession<'o> {
    pub(crate) fn register_enum(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let NodeKind::Enum { is_const } = node.kind else {
            tracing::trace!("Skipping enum '{}': unexpected declaration node", info.name);
            return None;
        };
        if self.oracle.declared_type(symbol).is_none() {
            tracing::debug!("Skipping enum '{}': no declared type", info.name);
            return None;
        }

        let (reference, handle) = self.begin_declaration(symbol, info, node, ReferenceKind::Enum)?;

        let mut members = Vec::new();
        for member in self.oracle.exports_of(symbol) {
            let Some(member_info) = self.oracle.symbol(member) else {
                continue;
            };
            if member_info.kind != SymbolKind::EnumMember {
                continue;
            }
            let member_node = member_info
                .declaration()
                .and_then(|d| self.oracle.node(d));

            let mut member_reference = self
                .registry
                .mint(&member_info.name, ReferenceKind::EnumMember)
                .with_parent(reference.clone());
            member_reference.path = reference.path.clone();
            self.registry.insert(member, member_reference);

            let initializer = match member_node.as_ref().map(|n| &n.kind) {
                Some(NodeKind::EnumMember {
                    initializer: Some(expression),
                }) => Some(self.normalize_node(*expression)),
                _ => self
                    .oracle
                    .declared_type(member)
                    .or_else(|| self.oracle.type_of_symbol(member))
                    .and_then(|ty| self.literal_type(ty)),
            };

            members.push(EnumMember {
                name: member_info.name.clone(),
                initializer,
                loc: member_node
                    .as_ref()
                    .map(|n| Loc::new(n.line, n.character))
                    .unwrap_or_else(|| Loc::new(node.line, node.character)),
                jsdoc: member_node.as_ref().and_then(|n| self.jsdoc(n)),
            });
        }

        let declaration = EnumDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            is_const,
            members,
        };
        self.finish_declaration(handle, &reference, Declaration::Enum(declaration));
        Some(reference)
    }
}
