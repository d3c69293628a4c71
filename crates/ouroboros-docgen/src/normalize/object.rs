//! Object-literal builder, shared by class and interface bodies and by
//! anonymous object types

use crate::ids::{NodeId, SymbolId, TypeId};
use crate::model::{
    AccessorKind, FunctionParameter, IndexSignature, Loc, MemberFlags, Method, ObjectLiteral,
    PrimitiveKind, Property, Signature, Type, TypeParameter,
};
use crate::oracle::{IndexKind, NodeInfo, NodeKind, SignatureInfo, SymbolKind};
use crate::session::ExtractionSession;

/// Property name the oracle uses for construct signatures of a type
const CONSTRUCT_SIGNATURE_NAME: &str = "__new";

impl<'o> ExtractionSession<'o> {
    /// Anonymous object type: an arrow function when it is nothing but one
    /// call signature, an object literal otherwise
    pub(crate) fn object_type(&mut self, ty: TypeId) -> Type {
        let oracle = self.oracle;
        let call_signatures = oracle.call_signatures(ty);
        let is_plain_function = call_signatures.len() == 1
            && oracle.properties(ty).is_empty()
            && oracle.construct_signatures(ty).is_empty()
            && oracle.index_type(ty, IndexKind::String).is_none()
            && oracle.index_type(ty, IndexKind::Number).is_none();

        if is_plain_function {
            return Type::ArrowFunction(self.signature(&call_signatures[0]));
        }
        Type::ObjectLiteral(self.object_literal(ty, false))
    }

    /// Build the members of `ty`
    ///
    /// `with_flags` stamps class-member flags read from syntax modifiers.
    pub(crate) fn object_literal(&mut self, ty: TypeId, with_flags: bool) -> ObjectLiteral {
        let oracle = self.oracle;
        let mut object = ObjectLiteral::default();

        for property in oracle.properties(ty) {
            self.add_member(&mut object, property, with_flags, false);
        }

        for (kind, key) in [
            (IndexKind::String, PrimitiveKind::String),
            (IndexKind::Number, PrimitiveKind::Number),
        ] {
            if let Some(value) = oracle.index_type(ty, kind) {
                let value = self.normalize(value, None);
                object.index_signatures.push(IndexSignature {
                    key: Type::primitive(key),
                    ty: value,
                });
            }
        }

        for signature in oracle.call_signatures(ty) {
            let signature = self.signature(&signature);
            object.call_signatures.push(signature);
        }
        for signature in oracle.construct_signatures(ty) {
            let signature = self.signature(&signature);
            object.construct_signatures.push(signature);
        }
        object
    }

    /// Classify one property symbol as a field, a method or construct signatures
    pub(crate) fn add_member(
        &mut self,
        object: &mut ObjectLiteral,
        property: SymbolId,
        with_flags: bool,
        is_static: bool,
    ) {
        let oracle = self.oracle;
        let Some(info) = oracle.symbol(property) else {
            return;
        };
        let Some(ty) = oracle.type_of_symbol(property) else {
            tracing::trace!("Skipping member '{}': no type", info.name);
            return;
        };

        if info.name == CONSTRUCT_SIGNATURE_NAME {
            for signature in oracle
                .construct_signatures(ty)
                .into_iter()
                .chain(oracle.call_signatures(ty))
            {
                let signature = self.signature(&signature);
                object.construct_signatures.push(signature);
            }
            return;
        }

        let nodes: Vec<NodeInfo> = info
            .declarations
            .iter()
            .filter_map(|d| oracle.node(*d))
            .collect();
        let primary = nodes.first();
        let modifiers = primary.map(|n| n.modifiers).unwrap_or_default();
        let flags = MemberFlags {
            is_private: with_flags && modifiers.is_private,
            is_protected: with_flags && modifiers.is_protected,
            is_static: is_static || (with_flags && modifiers.is_static),
            is_abstract: with_flags && modifiers.is_abstract,
        };
        let loc = primary.map(|n| Loc::new(n.line, n.character));
        let jsdoc = primary.and_then(|n| self.jsdoc(n));

        let is_method = info.kind == SymbolKind::Method
            || nodes.iter().any(|n| matches!(n.kind, NodeKind::Method));
        if is_method {
            let signatures = oracle
                .call_signatures(ty)
                .iter()
                .map(|s| self.signature(s))
                .collect();
            object.methods.push(Method {
                name: info.name,
                signatures,
                is_optional: modifiers.is_optional,
                flags,
                loc,
                jsdoc,
            });
            return;
        }

        let has_getter = nodes.iter().any(|n| matches!(n.kind, NodeKind::GetAccessor));
        let has_setter = nodes.iter().any(|n| matches!(n.kind, NodeKind::SetAccessor));
        let accessor = match (has_getter, has_setter) {
            (true, _) => Some(AccessorKind::Getter),
            (false, true) => Some(AccessorKind::Setter),
            _ => None,
        };
        let annotation = primary.and_then(|n| match n.kind {
            NodeKind::Property { type_annotation } => type_annotation,
            _ => None,
        });

        let value = self.normalize(ty, annotation);
        object.properties.push(Property {
            name: info.name,
            ty: Some(value),
            is_optional: modifiers.is_optional,
            is_readonly: modifiers.is_readonly || (has_getter && !has_setter),
            accessor,
            flags,
            loc,
            jsdoc,
        });
    }

    pub(crate) fn signature(&mut self, signature: &SignatureInfo) -> Signature {
        let oracle = self.oracle;
        let type_parameters = signature
            .type_parameters
            .iter()
            .filter_map(|t| self.type_parameter_of_type(*t))
            .collect();
        let parameters = signature
            .parameters
            .iter()
            .filter_map(|p| self.parameter(*p))
            .collect();
        let return_type = Box::new(self.normalize(signature.return_type, None));
        let jsdoc = signature
            .declaration
            .and_then(|d| oracle.node(d))
            .and_then(|n| self.jsdoc(&n));

        Signature {
            type_parameters,
            parameters,
            return_type,
            jsdoc,
        }
    }

    /// Type parameters declared by the given nodes
    pub(crate) fn type_parameters(&mut self, nodes: &[NodeId]) -> Vec<TypeParameter> {
        nodes
            .iter()
            .filter_map(|n| self.type_parameter(*n))
            .collect()
    }

    fn type_parameter(&mut self, node: NodeId) -> Option<TypeParameter> {
        let info = self.oracle.node(node)?;
        let NodeKind::TypeParameter {
            constraint,
            default,
            ..
        } = info.kind
        else {
            return None;
        };
        Some(TypeParameter {
            name: info.name?,
            constraint: constraint.map(|c| self.normalize_node(c)),
            default: default.map(|d| self.normalize_node(d)),
        })
    }

    fn type_parameter_of_type(&mut self, ty: TypeId) -> Option<TypeParameter> {
        let oracle = self.oracle;
        let symbol = oracle.type_info(ty)?.symbol?;
        let info = oracle.symbol(symbol)?;
        match info.declaration() {
            Some(node) => self.type_parameter(node),
            None => Some(TypeParameter {
                name: info.name,
                constraint: None,
                default: None,
            }),
        }
    }

    fn parameter(&mut self, symbol: SymbolId) -> Option<FunctionParameter> {
        let oracle = self.oracle;
        let info = oracle.symbol(symbol)?;
        let node = info.declaration().and_then(|d| oracle.node(d));

        let (is_rest, initializer, annotation) = match node.as_ref().map(|n| &n.kind) {
            Some(NodeKind::Parameter {
                is_rest,
                initializer,
                type_annotation,
            }) => (*is_rest, *initializer, *type_annotation),
            _ => (false, None, None),
        };
        let default_value = initializer
            .and_then(|i| oracle.node(i))
            .and_then(|n| n.text);
        let is_optional =
            node.as_ref().map_or(false, |n| n.modifiers.is_optional) || default_value.is_some();
        let ty = oracle
            .type_of_symbol(symbol)
            .map(|t| self.normalize(t, annotation));

        Some(FunctionParameter {
            name: info.name,
            ty,
            is_rest,
            is_optional,
            default_value,
        })
    }
}
