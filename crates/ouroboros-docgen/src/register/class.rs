//! Class and interface registration

use crate::ids::SymbolId;
use crate::model::{ClassDecl, Declaration, InterfaceDecl, ReferenceKind, TypeReference};
use crate::oracle::{NodeInfo, NodeKind, SymbolInfo};
use crate::session::ExtractionSession;

impl<'o> ExtractionSession<'o> {
    pub(crate) fn register_class(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let NodeKind::Class {
            type_parameters,
            extends,
            implements,
        } = &node.kind
        else {
            tracing::trace!("Skipping class '{}': unexpected declaration node", info.name);
            return None;
        };
        let Some(instance) = self.oracle.declared_type(symbol) else {
            tracing::debug!("Skipping class '{}': no instance type", info.name);
            return None;
        };

        let (reference, handle) = self.begin_declaration(symbol, info, node, ReferenceKind::Class)?;

        let type_parameters = self.type_parameters(type_parameters);
        let extends = extends.iter().map(|n| self.normalize_node(*n)).collect();
        let implements = implements.iter().map(|n| self.normalize_node(*n)).collect();
        let mut members = self.object_literal(instance, true);

        // statics and constructors live on the constructor type
        if let Some(constructor) = self.oracle.type_of_symbol(symbol) {
            for property in self.oracle.properties(constructor) {
                let is_prototype = self
                    .oracle
                    .symbol(property)
                    .map_or(true, |p| p.name == "prototype");
                if !is_prototype {
                    self.add_member(&mut members, property, true, true);
                }
            }
            for signature in self.oracle.construct_signatures(constructor) {
                let signature = self.signature(&signature);
                members.construct_signatures.push(signature);
            }
        }

        let declaration = ClassDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            is_default: node.modifiers.is_default,
            is_abstract: node.modifiers.is_abstract,
            type_parameters,
            extends,
            implements,
            members,
        };
        self.finish_declaration(handle, &reference, Declaration::Class(declaration));
        Some(reference)
    }

    pub(crate) fn register_interface(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let NodeKind::Interface {
            type_parameters,
            extends,
        } = &node.kind
        else {
            tracing::trace!(
                "Skipping interface '{}': unexpected declaration node",
                info.name
            );
            return None;
        };
        let Some(ty) = self.oracle.declared_type(symbol) else {
            tracing::debug!("Skipping interface '{}': no declared type", info.name);
            return None;
        };

        let (reference, handle) =
            self.begin_declaration(symbol, info, node, ReferenceKind::Interface)?;

        let type_parameters = self.type_parameters(type_parameters);
        let extends = extends.iter().map(|n| self.normalize_node(*n)).collect();
        let members = self.object_literal(ty, true);

        let declaration = InterfaceDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            is_default: node.modifiers.is_default,
            type_parameters,
            extends,
            members,
        };
        self.finish_declaration(handle, &reference, Declaration::Interface(declaration));
        Some(reference)
    }
}
