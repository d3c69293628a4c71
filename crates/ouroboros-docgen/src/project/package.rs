//! package.json metadata

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `repository` is either a URL string or `{ "type": ..., "url": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repository {
    Url(String),
    Object { url: Option<String> },
}

/// Subset of package.json read for documentation
#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    homepage: Option<String>,
    repository: Option<Repository>,
    main: Option<String>,
    types: Option<String>,
    typings: Option<String>,
}

/// Project metadata carried into the documentation model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Entry hints in lookup order: `types`, `typings`, `main`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_hints: Vec<String>,
}

/// Read package.json metadata from path
pub fn read_package_metadata(path: &Path) -> Result<PackageMetadata> {
    let content = fs::read_to_string(path)?;
    let package: PackageJson = serde_json::from_str(&content)?;

    let repository = package.repository.and_then(|r| match r {
        Repository::Url(url) => Some(url),
        Repository::Object { url } => url,
    });
    let entry_hints = [package.types, package.typings, package.main]
        .into_iter()
        .flatten()
        .collect();

    Ok(PackageMetadata {
        name: package.name,
        version: package.version,
        description: package.description,
        homepage: package.homepage,
        repository,
        entry_hints,
    })
}
