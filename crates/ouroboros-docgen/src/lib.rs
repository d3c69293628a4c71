//! Ouroboros Docgen: TypeScript documentation extraction
//!
//! Walks a type-checked program through a [`TypeOracle`] and produces a
//! renderer-agnostic [`Documentation`] model: one module tree per project,
//! declarations with fully normalized types, cross-linked by
//! [`TypeReference`] handles.
//!
//! ```ignore
//! let oracle = MemoryOracle::from_json(&snapshot)?;
//! let config = DocgenConfig::from_directory(root)?;
//! let docs = ouroboros_docgen::extract_project(&oracle, root, config)?;
//! println!("{}", docs.to_json()?);
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod external;
pub mod ids;
pub mod model;
pub mod modules;
pub mod oracle;
pub mod project;
pub mod registry;
pub mod session;

mod exports;
mod normalize;
mod register;

pub use config::{ConfigError, DocgenConfig, DocgenSettings, ExternalLinkConfig};
pub use error::{DocgenError, Result};
pub use external::{builtin_global_resolver, link_template_resolver, ExternalOrigin, ExternalResolver};
pub use ids::{ModuleId, NodeId, ReferenceId, SymbolId, TypeId};
pub use model::{Declaration, Module, ReferenceKind, Type, TypeReference};
pub use modules::ModuleTree;
pub use oracle::{MemoryOracle, TypeOracle};
pub use project::{PackageMetadata, ProjectSpec};
pub use session::{DeclarationHook, Documentation, ExtractionSession, ModuleHandle, Project};

use std::path::Path;

/// Discover the project at `root` and extract its documentation
pub fn extract_project(
    oracle: &dyn TypeOracle,
    root: &Path,
    config: DocgenConfig,
) -> Result<Documentation> {
    extract_projects(oracle, &[root], config)
}

/// Extract a project group sharing one oracle and one symbol registry
pub fn extract_projects(
    oracle: &dyn TypeOracle,
    roots: &[&Path],
    config: DocgenConfig,
) -> Result<Documentation> {
    let mut session = ExtractionSession::new(oracle, config);
    for root in roots {
        let spec = ProjectSpec::discover(root)?;
        session.add_project(spec)?;
    }
    session.extract();
    Ok(session.finish())
}
