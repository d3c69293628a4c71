//! External reference resolution
//!
//! Symbols declared outside the analyzed sources (the built-in library or a
//! dependency under `node_modules`) never get a declaration of their own.
//! Instead an ordered chain of resolvers is asked for a documentation link;
//! the first resolver returning one wins.

use std::path::{Component, Path};

use crate::config::ExternalLinkConfig;
use crate::model::ReferenceKind;

/// `(name, kind, library, path) -> link`
///
/// `library` is `None` for built-in library symbols.
pub type ExternalResolver =
    Box<dyn Fn(&str, ReferenceKind, Option<&str>, &[String]) -> Option<String>>;

/// Ordered, first-match-wins resolver chain
#[derive(Default)]
pub struct ExternalResolvers {
    resolvers: Vec<ExternalResolver>,
}

impl ExternalResolvers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resolver: ExternalResolver) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Ask each resolver in registration order
    pub fn resolve(
        &self,
        name: &str,
        kind: ReferenceKind,
        library: Option<&str>,
        path: &[String],
    ) -> Option<String> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver(name, kind, library, path))
    }
}

impl std::fmt::Debug for ExternalResolvers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalResolvers")
            .field("len", &self.resolvers.len())
            .finish()
    }
}

/// Where an external declaration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalOrigin {
    /// Package name, `None` for the built-in library
    pub library: Option<String>,
    /// Path segments inside the package, without extension
    pub path: Vec<String>,
}

impl ExternalOrigin {
    pub fn builtin() -> Self {
        Self {
            library: None,
            path: Vec::new(),
        }
    }

    /// Derive the origin of a declaration from its file
    ///
    /// The package is whatever follows the last `node_modules` segment; scoped
    /// packages take two segments. `@types/x` declarations are attributed to `x`.
    pub fn from_file(file: &Path, is_default_library: bool) -> Self {
        if is_default_library {
            return Self::builtin();
        }

        let segments: Vec<String> = file
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let Some(start) = segments.iter().rposition(|s| s == "node_modules") else {
            return Self::builtin();
        };
        let rest = &segments[start + 1..];
        if rest.is_empty() {
            return Self::builtin();
        }

        let (package, remaining) = if rest[0].starts_with('@') && rest.len() > 1 {
            (format!("{}/{}", rest[0], rest[1]), &rest[2..])
        } else {
            (rest[0].clone(), &rest[1..])
        };

        let mut path: Vec<String> = remaining.to_vec();
        if let Some(last) = path.pop() {
            let stem = strip_source_extension(&last);
            if stem != "index" {
                path.push(stem.to_string());
            }
        }

        Self {
            library: Some(types_package_target(&package)),
            path,
        }
    }
}

fn strip_source_extension(file_name: &str) -> &str {
    for ext in [".d.ts", ".d.mts", ".d.cts", ".tsx", ".ts", ".mjs", ".cjs", ".js"] {
        if let Some(stem) = file_name.strip_suffix(ext) {
            return stem;
        }
    }
    file_name
}

/// `@types/node` -> `node`, `@types/babel__core` -> `@babel/core`
fn types_package_target(package: &str) -> String {
    match package.strip_prefix("@types/") {
        Some(name) => match name.split_once("__") {
            Some((scope, pkg)) => format!("@{}/{}", scope, pkg),
            None => name.to_string(),
        },
        None => package.to_string(),
    }
}

const MDN_GLOBALS: &[&str] = &[
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "AsyncGenerator",
    "AsyncIterator",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "Generator",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "Iterator",
    "JSON",
    "Map",
    "Math",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
];

const MDN_WEB_APIS: &[&str] = &[
    "AbortController",
    "AbortSignal",
    "Blob",
    "Document",
    "Element",
    "Event",
    "EventTarget",
    "File",
    "FormData",
    "Headers",
    "HTMLElement",
    "Node",
    "ReadableStream",
    "Request",
    "Response",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "WebSocket",
    "Window",
    "WritableStream",
];

const TS_UTILITY_TYPES: &[&str] = &[
    "Awaited",
    "ConstructorParameters",
    "Exclude",
    "Extract",
    "InstanceType",
    "NoInfer",
    "NonNullable",
    "Omit",
    "OmitThisParameter",
    "Parameters",
    "Partial",
    "Pick",
    "Readonly",
    "Record",
    "Required",
    "ReturnType",
    "ThisParameterType",
    "ThisType",
];

/// Link built-in library symbols to MDN and the TypeScript handbook
pub fn builtin_global_resolver() -> ExternalResolver {
    Box::new(|name: &str, _kind: ReferenceKind, library: Option<&str>, _path: &[String]| {
        if library.is_some() {
            return None;
        }
        if MDN_GLOBALS.iter().any(|g| *g == name) {
            return Some(format!(
                "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/{}",
                name
            ));
        }
        if name == "ReadonlyArray" {
            return Some(
                "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array"
                    .to_string(),
            );
        }
        if MDN_WEB_APIS.iter().any(|g| *g == name) {
            return Some(format!(
                "https://developer.mozilla.org/en-US/docs/Web/API/{}",
                name
            ));
        }
        if TS_UTILITY_TYPES.iter().any(|g| *g == name) {
            return Some(format!(
                "https://www.typescriptlang.org/docs/handbook/utility-types.html#{}",
                name.to_lowercase()
            ));
        }
        None
    })
}

/// Link dependency symbols through a configured URL template
///
/// Placeholders: `{name}`, `{kind}` and `{path}` (segments joined by `/`).
pub fn link_template_resolver(config: ExternalLinkConfig) -> ExternalResolver {
    Box::new(move |name: &str, kind: ReferenceKind, library: Option<&str>, path: &[String]| {
        if library != Some(config.library.as_str()) {
            return None;
        }
        Some(
            config
                .url
                .replace("{name}", name)
                .replace("{kind}", kind.as_str())
                .replace("{path}", &path.join("/")),
        )
    })
}
