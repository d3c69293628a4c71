//! Core type definitions for the documentation model
//!
//! [`Type`] is a closed set: whatever the oracle reports, the normalizer maps
//! it onto one of these variants (falling back to [`Type::Stringified`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::members::{ObjectLiteral, Signature};
use super::reference::TypeReference;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Built-in primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
    Any,
    Unknown,
    Never,
}

impl PrimitiveKind {
    /// The TypeScript keyword for this primitive
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::Object => "object",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Never => "never",
        }
    }
}

/// Named type operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOperator {
    KeyOf,
    TypeOf,
    Readonly,
    Unique,
    Infer,
}

impl TypeOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeOperator::KeyOf => "keyof",
            TypeOperator::TypeOf => "typeof",
            TypeOperator::Readonly => "readonly",
            TypeOperator::Unique => "unique",
            TypeOperator::Infer => "infer",
        }
    }
}

/// `readonly` / `?` modifier on a mapped type (`+readonly`, `-?`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappedModifier {
    Add,
    Remove,
    Preserve,
}

impl MappedModifier {
    fn prefix(&self) -> &'static str {
        match self {
            MappedModifier::Add => "+",
            MappedModifier::Remove => "-",
            MappedModifier::Preserve => "",
        }
    }
}

/// Tuple element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleElement {
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub spread: bool,
}

/// `${T}text` segment of a template literal type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpan {
    pub ty: Type,
    pub text: String,
}

/// `{ readonly [K in C as N]?: V }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedType {
    pub type_parameter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Box<Type>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Box<Type>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_type: Option<Box<Type>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<MappedModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<MappedModifier>,
}

/// The closed set of type variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Named declaration, type parameter or unresolved name
    Reference {
        reference: TypeReference,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<Type>,
        /// Type parameter introduced by `infer`
        #[serde(default, skip_serializing_if = "is_false")]
        is_infer: bool,
    },
    /// Built-in primitive, optionally a literal of it (`"a"`, `42`, `true`)
    Primitive {
        primitive: PrimitiveKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        literal: Option<String>,
    },
    Union {
        types: Vec<Type>,
    },
    Intersection {
        types: Vec<Type>,
    },
    Tuple {
        elements: Vec<TupleElement>,
    },
    Array {
        element: Box<Type>,
    },
    ObjectLiteral(ObjectLiteral),
    ArrowFunction(Signature),
    Mapped(MappedType),
    Conditional {
        check: Box<Type>,
        extends: Box<Type>,
        true_type: Box<Type>,
        false_type: Box<Type>,
    },
    IndexAccess {
        object: Box<Type>,
        index: Box<Type>,
    },
    Operator {
        operator: TypeOperator,
        target: Box<Type>,
    },
    TemplateLiteral {
        head: String,
        spans: Vec<TemplateSpan>,
    },
    /// Opaque text used when no structural form is attempted
    Stringified {
        text: String,
    },
}

impl Type {
    /// Create a Reference type
    pub fn reference(reference: TypeReference, type_arguments: Vec<Type>) -> Self {
        Type::Reference {
            reference,
            type_arguments,
            is_infer: false,
        }
    }

    /// Create a primitive type without a literal value
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        Type::Primitive {
            primitive,
            literal: None,
        }
    }

    /// Create a literal of a primitive type
    pub fn literal(primitive: PrimitiveKind, literal: impl Into<String>) -> Self {
        Type::Primitive {
            primitive,
            literal: Some(literal.into()),
        }
    }

    /// Create an Array type
    pub fn array(element: Type) -> Self {
        Type::Array {
            element: Box::new(element),
        }
    }

    /// Create a Stringified type
    pub fn stringified(text: impl Into<String>) -> Self {
        Type::Stringified { text: text.into() }
    }

    /// Create a Union type, flattening nested unions and folding `true | false`
    pub fn union(types: Vec<Type>) -> Self {
        let mut flattened: Vec<Type> = Vec::new();
        for ty in types {
            match ty {
                Type::Union { types: inner } => {
                    for t in inner {
                        if !flattened.contains(&t) {
                            flattened.push(t);
                        }
                    }
                }
                other => {
                    if !flattened.contains(&other) {
                        flattened.push(other);
                    }
                }
            }
        }

        let bool_true = Type::literal(PrimitiveKind::Boolean, "true");
        let bool_false = Type::literal(PrimitiveKind::Boolean, "false");
        if let (Some(t), Some(f)) = (
            flattened.iter().position(|ty| *ty == bool_true),
            flattened.iter().position(|ty| *ty == bool_false),
        ) {
            let first = t.min(f);
            flattened.retain(|ty| *ty != bool_true && *ty != bool_false);
            let boolean = Type::primitive(PrimitiveKind::Boolean);
            if !flattened.contains(&boolean) {
                flattened.insert(first.min(flattened.len()), boolean);
            }
        }

        match flattened.len() {
            0 => Type::primitive(PrimitiveKind::Never),
            1 => flattened.remove(0),
            _ => Type::Union { types: flattened },
        }
    }

    /// Short variant tag, matching the serialized `kind`
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Reference { .. } => "reference",
            Type::Primitive { .. } => "primitive",
            Type::Union { .. } => "union",
            Type::Intersection { .. } => "intersection",
            Type::Tuple { .. } => "tuple",
            Type::Array { .. } => "array",
            Type::ObjectLiteral(_) => "object_literal",
            Type::ArrowFunction(_) => "arrow_function",
            Type::Mapped(_) => "mapped",
            Type::Conditional { .. } => "conditional",
            Type::IndexAccess { .. } => "index_access",
            Type::Operator { .. } => "operator",
            Type::TemplateLiteral { .. } => "template_literal",
            Type::Stringified { .. } => "stringified",
        }
    }

    /// Get the referenced handle if this is a Reference
    pub fn as_reference(&self) -> Option<&TypeReference> {
        match self {
            Type::Reference { reference, .. } => Some(reference),
            _ => None,
        }
    }

    pub fn is_primitive(&self, kind: PrimitiveKind) -> bool {
        matches!(self, Type::Primitive { primitive, literal: None } if *primitive == kind)
    }

    /// Visit every reference mentioned by this type, depth first
    pub fn references(&self) -> Vec<&TypeReference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a TypeReference>) {
        match self {
            Type::Reference {
                reference,
                type_arguments,
                ..
            } => {
                out.push(reference);
                for arg in type_arguments {
                    arg.collect_references(out);
                }
            }
            Type::Union { types } | Type::Intersection { types } => {
                for ty in types {
                    ty.collect_references(out);
                }
            }
            Type::Tuple { elements } => {
                for element in elements {
                    element.ty.collect_references(out);
                }
            }
            Type::Array { element } => element.collect_references(out),
            Type::ObjectLiteral(object) => {
                for property in &object.properties {
                    if let Some(ty) = &property.ty {
                        ty.collect_references(out);
                    }
                }
                for method in &object.methods {
                    for signature in &method.signatures {
                        collect_signature_references(signature, out);
                    }
                }
                for index in &object.index_signatures {
                    index.ty.collect_references(out);
                }
                for signature in object
                    .call_signatures
                    .iter()
                    .chain(object.construct_signatures.iter())
                {
                    collect_signature_references(signature, out);
                }
            }
            Type::ArrowFunction(signature) => collect_signature_references(signature, out),
            Type::Mapped(mapped) => {
                for ty in [&mapped.constraint, &mapped.ty, &mapped.name_type]
                    .into_iter()
                    .flatten()
                {
                    ty.collect_references(out);
                }
            }
            Type::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => {
                check.collect_references(out);
                extends.collect_references(out);
                true_type.collect_references(out);
                false_type.collect_references(out);
            }
            Type::IndexAccess { object, index } => {
                object.collect_references(out);
                index.collect_references(out);
            }
            Type::Operator { target, .. } => target.collect_references(out),
            Type::TemplateLiteral { spans, .. } => {
                for span in spans {
                    span.ty.collect_references(out);
                }
            }
            Type::Primitive { .. } | Type::Stringified { .. } => {}
        }
    }
}

fn collect_signature_references<'a>(signature: &'a Signature, out: &mut Vec<&'a TypeReference>) {
    for param in &signature.parameters {
        if let Some(ty) = &param.ty {
            ty.collect_references(out);
        }
    }
    signature.return_type.collect_references(out);
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[Type], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

fn write_signature(f: &mut fmt::Formatter<'_>, signature: &Signature, arrow: &str) -> fmt::Result {
    if !signature.type_parameters.is_empty() {
        write!(f, "<")?;
        for (i, param) in signature.type_parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
            if let Some(constraint) = &param.constraint {
                write!(f, " extends {}", constraint)?;
            }
        }
        write!(f, ">")?;
    }
    write!(f, "(")?;
    for (i, param) in signature.parameters.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if param.is_rest {
            write!(f, "...")?;
        }
        write!(f, "{}", param.name)?;
        if param.is_optional {
            write!(f, "?")?;
        }
        if let Some(ty) = &param.ty {
            write!(f, ": {}", ty)?;
        }
    }
    write!(f, "){}{}", arrow, signature.return_type)
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Reference {
                reference,
                type_arguments,
                is_infer,
            } => {
                if *is_infer {
                    write!(f, "infer ")?;
                }
                write!(f, "{}", reference)?;
                if !type_arguments.is_empty() {
                    write!(f, "<")?;
                    write_joined(f, type_arguments, ", ")?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Primitive { primitive, literal } => match literal {
                Some(lit) => write!(f, "{}", lit),
                None => write!(f, "{}", primitive.keyword()),
            },
            Type::Union { types } => write_joined(f, types, " | "),
            Type::Intersection { types } => write_joined(f, types, " & "),
            Type::Tuple { elements } => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if element.spread {
                        write!(f, "...")?;
                    }
                    match &element.name {
                        Some(name) => {
                            write!(f, "{}", name)?;
                            if element.optional {
                                write!(f, "?")?;
                            }
                            write!(f, ": {}", element.ty)?;
                        }
                        None => {
                            write!(f, "{}", element.ty)?;
                            if element.optional {
                                write!(f, "?")?;
                            }
                        }
                    }
                }
                write!(f, "]")
            }
            Type::Array { element } => match element.as_ref() {
                Type::Union { .. } | Type::Intersection { .. } | Type::ArrowFunction(_) => {
                    write!(f, "({})[]", element)
                }
                _ => write!(f, "{}[]", element),
            },
            Type::ObjectLiteral(object) => {
                if object.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                let mut first = true;
                let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
                    if !first {
                        write!(f, "; ")?;
                    }
                    first = false;
                    Ok(())
                };
                for property in &object.properties {
                    sep(f)?;
                    if property.is_readonly {
                        write!(f, "readonly ")?;
                    }
                    write!(f, "{}", property.name)?;
                    if property.is_optional {
                        write!(f, "?")?;
                    }
                    if let Some(ty) = &property.ty {
                        write!(f, ": {}", ty)?;
                    }
                }
                for method in &object.methods {
                    for signature in &method.signatures {
                        sep(f)?;
                        write!(f, "{}", method.name)?;
                        write_signature(f, signature, ": ")?;
                    }
                }
                for index in &object.index_signatures {
                    sep(f)?;
                    write!(f, "[key: {}]: {}", index.key, index.ty)?;
                }
                for signature in &object.call_signatures {
                    sep(f)?;
                    write_signature(f, signature, ": ")?;
                }
                for signature in &object.construct_signatures {
                    sep(f)?;
                    write!(f, "new ")?;
                    write_signature(f, signature, ": ")?;
                }
                write!(f, " }}")
            }
            Type::ArrowFunction(signature) => write_signature(f, signature, " => "),
            Type::Mapped(mapped) => {
                write!(f, "{{ ")?;
                if let Some(readonly) = mapped.readonly {
                    write!(f, "{}readonly ", readonly.prefix())?;
                }
                write!(f, "[{} in ", mapped.type_parameter)?;
                match &mapped.constraint {
                    Some(constraint) => write!(f, "{}", constraint)?,
                    None => write!(f, "unknown")?,
                }
                if let Some(name_type) = &mapped.name_type {
                    write!(f, " as {}", name_type)?;
                }
                write!(f, "]")?;
                if let Some(optional) = mapped.optional {
                    write!(f, "{}?", optional.prefix())?;
                }
                match &mapped.ty {
                    Some(ty) => write!(f, ": {} }}", ty),
                    None => write!(f, ": unknown }}"),
                }
            }
            Type::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => write!(
                f,
                "{} extends {} ? {} : {}",
                check, extends, true_type, false_type
            ),
            Type::IndexAccess { object, index } => write!(f, "{}[{}]", object, index),
            Type::Operator { operator, target } => write!(f, "{} {}", operator.keyword(), target),
            Type::TemplateLiteral { head, spans } => {
                write!(f, "`{}", head)?;
                for span in spans {
                    write!(f, "${{{}}}{}", span.ty, span.text)?;
                }
                write!(f, "`")
            }
            Type::Stringified { text } => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
#[path = "ty_tests.rs"]
mod tests;
