//! Module tree for one project
//!
//! Maps source files to a hierarchy of modules:
//! - one module per directory below the project root
//! - passthrough directories (`src`, `lib`) folded into their parent
//! - namespace declarations as extra child modules
//!
//! Modules live in an arena addressed by [`ModuleId`]; the root is always
//! [`ModuleTree::ROOT`].

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ids::ModuleId;
use crate::model::{Module, NamespaceInfo};

/// Arena of modules rooted at a project directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleTree {
    modules: Vec<Module>,
    /// Directory -> owning module
    #[serde(skip)]
    dir_cache: HashMap<PathBuf, ModuleId>,
    #[serde(skip)]
    passthrough: HashSet<String>,
}

impl ModuleTree {
    pub const ROOT: ModuleId = ModuleId(0);

    /// Create a tree whose root module is named after the project
    pub fn new<S: AsRef<str>>(name: &str, base_dir: impl Into<PathBuf>, passthrough: &[S]) -> Self {
        let root = Module::new(name, Vec::new(), base_dir.into());
        Self {
            modules: vec![root],
            dir_cache: HashMap::new(),
            passthrough: passthrough.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn root(&self) -> &Module {
        &self.modules[Self::ROOT.index()]
    }

    pub fn base_dir(&self) -> &Path {
        &self.root().base_dir
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index())
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate over all modules with their ids, in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i as u32), m))
    }

    /// Find a module by its children path (`[root, a, b]`)
    pub fn find(&self, children_path: &[String]) -> Option<ModuleId> {
        let (first, rest) = children_path.split_first()?;
        if *first != self.root().name {
            return None;
        }
        let mut current = Self::ROOT;
        for name in rest {
            current = *self.get(current)?.modules.get(name)?;
        }
        Some(current)
    }

    /// Path of `file` relative to the project root, with `/` separators
    pub fn relative_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(self.base_dir()).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }

    /// Resolve the module owning `file`, creating intermediate modules
    ///
    /// Files outside the project root resolve to the root module.
    pub fn resolve_module(&mut self, file: &Path) -> ModuleId {
        let Some(dir) = file.parent() else {
            return Self::ROOT;
        };
        if let Some(id) = self.dir_cache.get(dir) {
            return *id;
        }

        let Ok(relative) = dir.strip_prefix(self.base_dir()) else {
            tracing::trace!("{:?} is outside the project root, using root module", file);
            return Self::ROOT;
        };
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let mut current = Self::ROOT;
        for segment in segments {
            if self.passthrough.contains(&segment) {
                continue;
            }
            current = self.child_or_create(current, &segment);
        }

        self.dir_cache.insert(dir.to_path_buf(), current);
        current
    }

    /// Get the child module `name` of `parent`, creating it if needed
    pub fn child_or_create(&mut self, parent: ModuleId, name: &str) -> ModuleId {
        let parent_module = &self.modules[parent.index()];
        if let Some(id) = parent_module.modules.get(name) {
            return *id;
        }

        let path = parent_module.children_path.clone();
        let base_dir = parent_module.base_dir.join(name);
        let id = ModuleId(self.modules.len() as u32);
        tracing::trace!("Creating module '{}' under {:?}", name, path);
        self.modules.push(Module::new(name, path, base_dir));
        self.modules[parent.index()]
            .modules
            .insert(name.to_string(), id);
        id
    }

    /// Get or create the module standing for namespace `name` inside `parent`
    ///
    /// A namespace sharing its name with a directory merges into the
    /// directory module, which stays a plain module.
    pub fn namespace_module(
        &mut self,
        parent: ModuleId,
        name: &str,
        info: NamespaceInfo,
    ) -> ModuleId {
        let existed = self.modules[parent.index()].modules.contains_key(name);
        let id = self.child_or_create(parent, name);
        if !existed {
            self.modules[id.index()].namespace = Some(info);
        }
        id
    }
}
