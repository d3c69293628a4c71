//! Function and constant registration
//!
//! A variable whose value is callable (`const f = (a) => a`) is documented
//! as a function.

use crate::ids::{SymbolId, TypeId};
use crate::model::{ConstantDecl, Declaration, FunctionDecl, ReferenceKind, TypeReference};
use crate::oracle::{NodeInfo, NodeKind, SymbolInfo};
use crate::session::ExtractionSession;

/// Keep at most `max` characters of `text`
pub(crate) fn truncate_text(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl<'o> ExtractionSession<'o> {
    pub(crate) fn register_function(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        if !matches!(node.kind, NodeKind::Function) {
            tracing::trace!("Skipping function '{}': unexpected declaration node", info.name);
            return None;
        }
        let Some(ty) = self.oracle.type_of_symbol(symbol) else {
            tracing::debug!("Skipping function '{}': no type", info.name);
            return None;
        };
        self.register_callable(symbol, info, node, ty, node.modifiers.is_async)
    }

    pub(crate) fn register_variable(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
    ) -> Option<TypeReference> {
        let NodeKind::Variable {
            initializer,
            type_annotation,
        } = node.kind
        else {
            tracing::trace!("Skipping constant '{}': unexpected declaration node", info.name);
            return None;
        };
        let Some(ty) = self.oracle.type_of_symbol(symbol) else {
            tracing::debug!("Skipping constant '{}': no type", info.name);
            return None;
        };
        let initializer = initializer.and_then(|n| self.oracle.node(n));

        if !self.oracle.call_signatures(ty).is_empty() {
            tracing::debug!("Documenting callable constant '{}' as a function", info.name);
            let is_async = node.modifiers.is_async
                || initializer.as_ref().map_or(false, |n| n.modifiers.is_async);
            return self.register_callable(symbol, info, node, ty, is_async);
        }

        let (reference, handle) =
            self.begin_declaration(symbol, info, node, ReferenceKind::Constant)?;

        let max = self.config.docgen.max_constant_text_length;
        let content = initializer
            .and_then(|n| n.text)
            .map(|text| truncate_text(&text, max));
        let value = self.normalize(ty, type_annotation);

        let declaration = ConstantDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            ty: Some(value),
            content,
        };
        self.finish_declaration(handle, &reference, Declaration::Constant(declaration));
        Some(reference)
    }

    fn register_callable(
        &mut self,
        symbol: SymbolId,
        info: &SymbolInfo,
        node: &NodeInfo,
        ty: TypeId,
        is_async: bool,
    ) -> Option<TypeReference> {
        let call_signatures = self.oracle.call_signatures(ty);
        if call_signatures.is_empty() {
            tracing::debug!("Skipping function '{}': no call signatures", info.name);
            return None;
        }

        let (reference, handle) =
            self.begin_declaration(symbol, info, node, ReferenceKind::Function)?;

        let signatures = call_signatures.iter().map(|s| self.signature(s)).collect();

        let declaration = FunctionDecl {
            name: info.name.clone(),
            loc: self.declaration_loc(info, node),
            jsdoc: self.jsdoc(node),
            is_exported: node.modifiers.is_exported,
            is_default: node.modifiers.is_default,
            is_async,
            signatures,
        };
        self.finish_declaration(handle, &reference, Declaration::Function(declaration));
        Some(reference)
    }
}
