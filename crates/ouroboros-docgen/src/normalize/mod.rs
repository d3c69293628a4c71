//! Type normalizer
//!
//! Converts oracle types into the closed [`Type`] set. Decision order:
//! 1. alias symbol attached to the type (`Partial<User>` stays a reference)
//! 2. symbol-less type written as a named reference in the source
//! 3. arrays
//! 4. owning declaration symbol (class, interface, enum, ...)
//! 5. type parameters, string mappings, mapped types, object types
//! 6. the literal classifier (primitives, literals, unions, tuples, ...)
//! 7. an `unknown` reference named by the oracle's rendering
//!
//! Nesting deeper than `max_type_depth` degrades to [`Type::Stringified`].

mod literal;
mod object;

use crate::ids::{NodeId, SymbolId, TypeId};
use crate::model::{MappedType, ReferenceKind, Type, TypeReference};
use crate::oracle::{NodeKind, TypeInfo, TypeShape};
use crate::session::ExtractionSession;

impl<'o> ExtractionSession<'o> {
    /// Normalize an oracle type, optionally with the syntax node it was written as
    pub fn normalize(&mut self, ty: TypeId, node: Option<NodeId>) -> Type {
        self.normalize_guarded(ty, node, None)
    }

    /// Normalize the definition of type alias `alias` without collapsing it
    /// into a reference to itself
    pub(crate) fn normalize_expanding(
        &mut self,
        ty: TypeId,
        node: Option<NodeId>,
        alias: SymbolId,
    ) -> Type {
        self.normalize_guarded(ty, node, Some(alias))
    }

    /// Normalize the type written at a syntax node
    pub(crate) fn normalize_node(&mut self, node: NodeId) -> Type {
        match self.oracle.type_at(node) {
            Some(ty) => self.normalize(ty, Some(node)),
            None => {
                let text = self
                    .oracle
                    .node(node)
                    .and_then(|n| n.text)
                    .unwrap_or_else(|| "unknown".to_string());
                Type::stringified(text)
            }
        }
    }

    fn normalize_guarded(
        &mut self,
        ty: TypeId,
        node: Option<NodeId>,
        expanding: Option<SymbolId>,
    ) -> Type {
        if self.depth >= self.config.docgen.max_type_depth {
            tracing::debug!("Type nesting limit reached, stringifying {:?}", ty);
            return Type::stringified(self.oracle.type_to_string(ty));
        }
        self.depth += 1;
        let result = self.normalize_type(ty, node, expanding);
        self.depth -= 1;
        result
    }

    fn normalize_type(&mut self, ty: TypeId, node: Option<NodeId>, expanding: Option<SymbolId>) -> Type {
        let oracle = self.oracle;
        let Some(info) = oracle.type_info(ty) else {
            return self.unknown_reference(ty);
        };

        if let Some(alias) = &info.alias {
            if Some(alias.symbol) != expanding {
                if let Some(reference) = self.reference(alias.symbol) {
                    let type_arguments = self.normalize_all(&alias.type_arguments);
                    return Type::reference(reference, type_arguments);
                }
            }
        }

        if info.symbol.is_none() {
            if let Some(NodeKind::TypeReference {
                target: Some(target),
                type_arguments,
            }) = node.and_then(|n| oracle.node(n)).map(|n| n.kind)
            {
                if let Some(reference) = self.reference(target) {
                    let type_arguments = type_arguments
                        .iter()
                        .map(|a| self.normalize_node(*a))
                        .collect();
                    return self.reference_type(reference, type_arguments, target);
                }
            }
        }

        if let TypeShape::Array(element) = info.shape {
            return Type::array(self.normalize(element, None));
        }

        if let Some(symbol) = info.symbol {
            let is_declaration = oracle
                .symbol(symbol)
                .map_or(false, |s| s.kind.is_declaration());
            if is_declaration {
                if let Some(reference) = self.reference(symbol) {
                    let type_arguments = self.normalize_all(&oracle.type_arguments(ty));
                    return self.reference_type(reference, type_arguments, symbol);
                }
            }
        }

        self.normalize_structure(ty, &info)
    }

    fn normalize_structure(&mut self, ty: TypeId, info: &TypeInfo) -> Type {
        match &info.shape {
            TypeShape::TypeParameter => match info.symbol {
                Some(symbol) => match self.reference(symbol) {
                    Some(reference) => self.reference_type(reference, Vec::new(), symbol),
                    None => self.unknown_reference(ty),
                },
                None => self.unknown_reference(ty),
            },
            TypeShape::StringMapping { name, target } => {
                let reference = self.string_utility(name);
                let target = self.normalize(*target, None);
                Type::reference(reference, vec![target])
            }
            TypeShape::Mapped {
                type_parameter,
                constraint,
                template,
                name_type,
                readonly,
                optional,
            } => {
                let oracle = self.oracle;
                let parameter_name = oracle
                    .type_info(*type_parameter)
                    .and_then(|i| i.symbol)
                    .and_then(|s| oracle.symbol(s))
                    .map(|s| s.name)
                    .unwrap_or_else(|| oracle.type_to_string(*type_parameter));
                Type::Mapped(MappedType {
                    type_parameter: parameter_name,
                    constraint: constraint.map(|t| Box::new(self.normalize(t, None))),
                    ty: template.map(|t| Box::new(self.normalize(t, None))),
                    name_type: name_type.map(|t| Box::new(self.normalize(t, None))),
                    readonly: *readonly,
                    optional: *optional,
                })
            }
            TypeShape::Object => self.object_type(ty),
            _ => match self.classify_literal(ty, info) {
                Some(classified) => classified,
                None => self.unknown_reference(ty),
            },
        }
    }

    pub(crate) fn normalize_all(&mut self, types: &[TypeId]) -> Vec<Type> {
        types.iter().map(|t| self.normalize(*t, None)).collect()
    }

    fn reference_type(
        &self,
        reference: TypeReference,
        type_arguments: Vec<Type>,
        symbol: SymbolId,
    ) -> Type {
        let is_infer =
            reference.kind == ReferenceKind::TypeParameter && self.declared_in_infer(symbol);
        Type::Reference {
            reference,
            type_arguments,
            is_infer,
        }
    }

    fn declared_in_infer(&self, symbol: SymbolId) -> bool {
        self.oracle
            .symbol(symbol)
            .and_then(|s| s.declaration())
            .and_then(|d| self.oracle.node(d))
            .map_or(false, |n| {
                matches!(n.kind, NodeKind::TypeParameter { in_infer: true, .. })
            })
    }

    fn string_utility(&mut self, name: &str) -> TypeReference {
        if let Some(reference) = self.string_utilities.get(name) {
            return reference.clone();
        }
        let reference = self.registry.mint(name, ReferenceKind::StringUtility);
        self.string_utilities
            .insert(name.to_string(), reference.clone());
        reference
    }

    /// Escape hatch for types nothing else recognizes
    fn unknown_reference(&mut self, ty: TypeId) -> Type {
        let name = self.oracle.type_to_string(ty);
        tracing::trace!("Unclassified type {:?} rendered as '{}'", ty, name);
        Type::reference(self.registry.mint(name, ReferenceKind::Unknown), Vec::new())
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
