//! Extraction session
//!
//! Owns every piece of mutable state of one extraction pass: the module
//! trees of all projects in the group, the symbol registry, the namespace
//! table and the hook chains. Registrars and the normalizer are implemented
//! as methods on [`ExtractionSession`] so that state is threaded by `&mut self`.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::DocgenConfig;
use crate::error::{DocgenError, Result};
use crate::external::{
    builtin_global_resolver, link_template_resolver, ExternalResolver, ExternalResolvers,
};
use crate::ids::{ModuleId, SymbolId};
use crate::model::{Declaration, Module, TypeReference};
use crate::modules::ModuleTree;
use crate::oracle::TypeOracle;
use crate::project::{PackageMetadata, ProjectSpec};
use crate::registry::SymbolRegistry;

/// Called once per registered declaration, before it is attached to its module
pub type DeclarationHook = Box<dyn FnMut(&Declaration, &TypeReference, &Module)>;

/// One analyzed project and its module tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub base_dir: PathBuf,
    /// Entry file relative to `base_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default)]
    pub metadata: PackageMetadata,
    pub modules: ModuleTree,
}

impl Project {
    pub fn root(&self) -> &Module {
        self.modules.root()
    }
}

/// Result of an extraction pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Documentation {
    pub projects: Vec<Project>,
}

impl Documentation {
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Location of a module across the project group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleHandle {
    pub project: usize,
    pub module: ModuleId,
}

/// State of one extraction pass over a project group
pub struct ExtractionSession<'o> {
    pub(crate) oracle: &'o dyn TypeOracle,
    pub(crate) config: DocgenConfig,
    pub(crate) projects: Vec<Project>,
    pub(crate) registry: SymbolRegistry,
    /// Namespace symbol -> module standing for it
    pub(crate) namespaces: HashMap<SymbolId, ModuleHandle>,
    pub(crate) string_utilities: HashMap<String, TypeReference>,
    pub(crate) resolvers: ExternalResolvers,
    pub(crate) hooks: Vec<DeclarationHook>,
    /// Current type nesting depth
    pub(crate) depth: usize,
}

impl<'o> ExtractionSession<'o> {
    /// Create a session
    ///
    /// Link templates from the configuration are registered first, followed
    /// by the built-in library resolver when `builtin_links` is enabled.
    pub fn new(oracle: &'o dyn TypeOracle, config: DocgenConfig) -> Self {
        let mut resolvers = ExternalResolvers::new();
        for external in &config.docgen.externals {
            resolvers.push(link_template_resolver(external.clone()));
        }
        if config.docgen.builtin_links {
            resolvers.push(builtin_global_resolver());
        }

        Self {
            oracle,
            config,
            projects: Vec::new(),
            registry: SymbolRegistry::new(),
            namespaces: HashMap::new(),
            string_utilities: HashMap::new(),
            resolvers,
            hooks: Vec::new(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &DocgenConfig {
        &self.config
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// Add a project to the group, returning its index
    ///
    /// Fails when the project's entry file is not part of the program.
    pub fn add_project(&mut self, spec: ProjectSpec) -> Result<usize> {
        if let Some(entry) = &spec.entry {
            if self.oracle.file_symbol(entry).is_none() {
                return Err(DocgenError::entry_not_in_program(entry));
            }
        }
        if self.projects.iter().any(|p| p.name == spec.name) {
            return Err(DocgenError::other(format!(
                "Duplicate project name '{}'",
                spec.name
            )));
        }

        let modules = ModuleTree::new(
            &spec.name,
            spec.root.clone(),
            self.config.docgen.passthrough_modules.as_slice(),
        );
        let entry = spec
            .entry
            .as_deref()
            .and_then(|entry| modules.relative_path(entry));

        tracing::debug!("Adding project '{}' at {:?}", spec.name, spec.root);
        self.projects.push(Project {
            name: spec.name,
            base_dir: spec.root,
            entry,
            metadata: spec.metadata,
            modules,
        });
        Ok(self.projects.len() - 1)
    }

    /// Append a resolver to the external resolver chain
    pub fn add_external_resolver(&mut self, resolver: ExternalResolver) {
        self.resolvers.push(resolver);
    }

    /// Register a declaration hook
    pub fn on_declaration(&mut self, hook: DeclarationHook) {
        self.hooks.push(hook);
    }

    /// Walk every project source file of the program
    pub fn extract(&mut self) {
        let mut files = self.oracle.source_files();
        files.sort();
        for file in files {
            if self.is_external_file(&file) || self.is_excluded(&file) {
                tracing::trace!("Skipping {:?}", file);
                continue;
            }
            self.extract_file(&file);
        }
    }

    /// Resolve the module of one file and record its exports
    pub fn extract_file(&mut self, file: &Path) {
        let Some(project) = self.project_for_file(file) else {
            tracing::debug!("{:?} is not part of any project", file);
            return;
        };
        let module = self.projects[project].modules.resolve_module(file);
        tracing::trace!("Extracting {:?}", file);

        let exports = self.track_exports(project, module, file);
        if exports.is_empty() {
            return;
        }
        let project = &mut self.projects[project];
        if let Some(relative) = project.modules.relative_path(file) {
            if let Some(module) = project.modules.get_mut(module) {
                module.exports.insert(relative, exports);
            }
        }
    }

    /// Module owning `file`
    pub fn resolve_module(&mut self, file: &Path) -> Option<ModuleHandle> {
        let project = self.project_for_file(file)?;
        let module = self.projects[project].modules.resolve_module(file);
        Some(ModuleHandle { project, module })
    }

    pub fn module(&self, handle: ModuleHandle) -> Option<&Module> {
        self.projects.get(handle.project)?.modules.get(handle.module)
    }

    /// Project whose root is the longest prefix of `file`
    pub fn project_for_file(&self, file: &Path) -> Option<usize> {
        self.projects
            .iter()
            .enumerate()
            .filter(|(_, p)| file.starts_with(&p.base_dir))
            .max_by_key(|(_, p)| p.base_dir.components().count())
            .map(|(i, _)| i)
    }

    /// Declared outside the analyzed sources
    pub fn is_external_file(&self, file: &Path) -> bool {
        self.oracle.is_default_library(file)
            || file
                .components()
                .any(|c| c == Component::Normal("node_modules".as_ref()))
            || self.project_for_file(file).is_none()
    }

    fn is_excluded(&self, file: &Path) -> bool {
        let relative = self
            .project_for_file(file)
            .and_then(|p| file.strip_prefix(&self.projects[p].base_dir).ok())
            .unwrap_or(file);
        self.config.is_excluded(relative)
    }

    /// File path relative to its project root
    pub(crate) fn relative_file(&self, file: &Path) -> Option<String> {
        let project = self.project_for_file(file)?;
        self.projects[project].modules.relative_path(file)
    }

    /// End the pass and hand over the model
    pub fn finish(self) -> Documentation {
        tracing::debug!(
            "Extraction finished: {} projects, {} symbols",
            self.projects.len(),
            self.registry.len()
        );
        Documentation {
            projects: self.projects,
        }
    }
}

impl std::fmt::Debug for ExtractionSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionSession")
            .field("projects", &self.projects.len())
            .field("symbols", &self.registry.len())
            .field("resolvers", &self.resolvers)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
