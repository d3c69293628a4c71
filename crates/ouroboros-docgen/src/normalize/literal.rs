//! Literal classifier: primitives, literal values and the composite
//! structural types that carry no declaration of their own

use crate::ids::TypeId;
use crate::model::{PrimitiveKind, TemplateSpan, TupleElement, Type, TypeOperator};
use crate::oracle::{Intrinsic, TypeInfo, TypeShape};
use crate::session::ExtractionSession;

fn intrinsic_type(kind: Intrinsic) -> Type {
    match kind {
        Intrinsic::Any => Type::primitive(PrimitiveKind::Any),
        Intrinsic::Unknown => Type::primitive(PrimitiveKind::Unknown),
        Intrinsic::String => Type::primitive(PrimitiveKind::String),
        Intrinsic::Number => Type::primitive(PrimitiveKind::Number),
        Intrinsic::Boolean => Type::primitive(PrimitiveKind::Boolean),
        Intrinsic::True => Type::literal(PrimitiveKind::Boolean, "true"),
        Intrinsic::False => Type::literal(PrimitiveKind::Boolean, "false"),
        Intrinsic::BigInt => Type::primitive(PrimitiveKind::BigInt),
        Intrinsic::Symbol => Type::primitive(PrimitiveKind::Symbol),
        Intrinsic::Void => Type::primitive(PrimitiveKind::Void),
        Intrinsic::Undefined => Type::primitive(PrimitiveKind::Undefined),
        Intrinsic::Null => Type::primitive(PrimitiveKind::Null),
        Intrinsic::Never => Type::primitive(PrimitiveKind::Never),
        Intrinsic::Object => Type::primitive(PrimitiveKind::Object),
    }
}

/// Render a string literal the way it is written in source
pub(crate) fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `1` rather than `1.0`, exponent form for very large magnitudes
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{:.0}", value)
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

fn literal_of_shape(shape: &TypeShape) -> Option<Type> {
    match shape {
        TypeShape::Intrinsic(kind) => Some(intrinsic_type(*kind)),
        TypeShape::StringLiteral(value) => {
            Some(Type::literal(PrimitiveKind::String, quote_string(value)))
        }
        TypeShape::NumberLiteral(value) => {
            Some(Type::literal(PrimitiveKind::Number, format_number(*value)))
        }
        TypeShape::BigIntLiteral(value) => {
            let value = value.trim_end_matches('n');
            Some(Type::literal(PrimitiveKind::BigInt, format!("{}n", value)))
        }
        _ => None,
    }
}

impl<'o> ExtractionSession<'o> {
    fn identity_primitive(&self, ty: TypeId) -> Option<Type> {
        let oracle = self.oracle;
        [
            Intrinsic::String,
            Intrinsic::Number,
            Intrinsic::Boolean,
            Intrinsic::True,
            Intrinsic::False,
        ]
        .into_iter()
        .find(|kind| oracle.intrinsic(*kind) == Some(ty))
        .map(intrinsic_type)
    }

    /// Literal type of an enum member without initializer
    pub(crate) fn literal_type(&self, ty: TypeId) -> Option<Type> {
        if let Some(primitive) = self.identity_primitive(ty) {
            return Some(primitive);
        }
        literal_of_shape(&self.oracle.type_info(ty)?.shape)
    }

    /// Classify primitives, literals and composite structural types
    ///
    /// Returns `None` for shapes handled elsewhere (objects, type parameters,
    /// mapped types, string mappings).
    pub(crate) fn classify_literal(&mut self, ty: TypeId, info: &TypeInfo) -> Option<Type> {
        if let Some(primitive) = self.identity_primitive(ty) {
            return Some(primitive);
        }
        if let Some(literal) = literal_of_shape(&info.shape) {
            return Some(literal);
        }

        let classified = match &info.shape {
            TypeShape::Union(types) => Type::union(self.normalize_all(types)),
            TypeShape::Intersection(types) => Type::Intersection {
                types: self.normalize_all(types),
            },
            TypeShape::Array(element) => Type::array(self.normalize(*element, None)),
            TypeShape::Tuple(members) => Type::Tuple {
                elements: members
                    .iter()
                    .map(|m| TupleElement {
                        ty: self.normalize(m.ty, None),
                        name: m.name.clone(),
                        optional: m.optional,
                        spread: m.rest,
                    })
                    .collect(),
            },
            TypeShape::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => Type::Conditional {
                check: Box::new(self.normalize(*check, None)),
                extends: Box::new(self.normalize(*extends, None)),
                true_type: Box::new(self.normalize(*true_type, None)),
                false_type: Box::new(self.normalize(*false_type, None)),
            },
            TypeShape::IndexedAccess { object, index } => Type::IndexAccess {
                object: Box::new(self.normalize(*object, None)),
                index: Box::new(self.normalize(*index, None)),
            },
            TypeShape::Index(target) => Type::Operator {
                operator: TypeOperator::KeyOf,
                target: Box::new(self.normalize(*target, None)),
            },
            TypeShape::Operator { operator, target } => Type::Operator {
                operator: *operator,
                target: Box::new(self.normalize(*target, None)),
            },
            TypeShape::TemplateLiteral { texts, types } => {
                let head = texts.first().cloned().unwrap_or_default();
                let spans = types
                    .iter()
                    .enumerate()
                    .map(|(i, t)| TemplateSpan {
                        ty: self.normalize(*t, None),
                        text: texts.get(i + 1).cloned().unwrap_or_default(),
                    })
                    .collect();
                Type::TemplateLiteral { head, spans }
            }
            TypeShape::Unrecognized => {
                tracing::debug!("Unrecognized type shape for {:?}, stringifying", ty);
                Type::stringified(self.oracle.type_to_string(ty))
            }
            TypeShape::Intrinsic(_)
            | TypeShape::StringLiteral(_)
            | TypeShape::NumberLiteral(_)
            | TypeShape::BigIntLiteral(_)
            | TypeShape::Object
            | TypeShape::TypeParameter
            | TypeShape::Mapped { .. }
            | TypeShape::StringMapping { .. } => return None,
        };
        Some(classified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("abc"), "\"abc\"");
        assert_eq!(quote_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
