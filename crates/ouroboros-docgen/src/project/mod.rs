//! Project discovery
//!
//! A project is a directory with a `tsconfig.json`, optional `package.json`
//! metadata and one entry file.

mod package;

pub use package::{read_package_metadata, PackageMetadata};

use std::path::{Path, PathBuf};

use crate::error::{DocgenError, Result};

/// TypeScript project configuration file required at the project root
pub const PROJECT_CONFIG_FILE: &str = "tsconfig.json";

const ENTRY_NAMES: &[&str] = &["index.ts", "index.tsx", "index.d.ts"];
const ENTRY_DIRS: &[&str] = &["src", "lib"];

/// Input description of one project to extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    /// Root module name
    pub name: String,
    pub root: PathBuf,
    pub entry: Option<PathBuf>,
    pub metadata: PackageMetadata,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            entry: None,
            metadata: PackageMetadata::default(),
        }
    }

    pub fn with_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    pub fn with_metadata(mut self, metadata: PackageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Discover a project from its root directory
    ///
    /// Fails when the root has no `tsconfig.json` or no entry file can be
    /// located. A missing or unreadable `package.json` only loses metadata.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.join(PROJECT_CONFIG_FILE).is_file() {
            return Err(DocgenError::project_config_not_found(root));
        }

        let package_path = root.join("package.json");
        let metadata = if package_path.is_file() {
            match read_package_metadata(&package_path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable {:?}: {}", package_path, e);
                    PackageMetadata::default()
                }
            }
        } else {
            PackageMetadata::default()
        };

        let entry =
            locate_entry(root, &metadata.entry_hints).ok_or_else(|| DocgenError::entry_not_found(root))?;

        let name = metadata
            .name
            .clone()
            .or_else(|| {
                root.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());

        tracing::debug!("Discovered project '{}' with entry {:?}", name, entry);

        Ok(Self {
            name,
            root: root.to_path_buf(),
            entry: Some(entry),
            metadata,
        })
    }
}

/// Locate the entry file of a project
///
/// Package hints come first (a `.js` hint is mapped to its TypeScript
/// source or declaration file), then `index.{ts,tsx,d.ts}` in the root,
/// `src/` and `lib/`, in that order.
pub fn locate_entry(root: &Path, hints: &[String]) -> Option<PathBuf> {
    for hint in hints {
        if let Some(found) = entry_from_hint(root, hint) {
            return Some(found);
        }
    }

    if let Some(found) = find_index(root) {
        return Some(found);
    }
    for dir in ENTRY_DIRS {
        if let Some(found) = find_index(&root.join(dir)) {
            return Some(found);
        }
    }
    None
}

fn find_index(dir: &Path) -> Option<PathBuf> {
    ENTRY_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn entry_from_hint(root: &Path, hint: &str) -> Option<PathBuf> {
    let path = root.join(hint.trim_start_matches("./"));
    let file_name = path.file_name()?.to_string_lossy().into_owned();

    if is_typescript_file(&file_name) {
        return path.is_file().then_some(path);
    }

    let stem = file_name
        .strip_suffix(".mjs")
        .or_else(|| file_name.strip_suffix(".cjs"))
        .or_else(|| file_name.strip_suffix(".js"))?;
    ["ts", "tsx", "d.ts"]
        .iter()
        .map(|ext| path.with_file_name(format!("{}.{}", stem, ext)))
        .find(|candidate| candidate.is_file())
}

fn is_typescript_file(file_name: &str) -> bool {
    file_name.ends_with(".ts") || file_name.ends_with(".tsx")
}
