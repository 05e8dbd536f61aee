//! Schema catalog loading.
//!
//! # Responsibility
//! - Group the section, sidebar card and workflow registries.
//! - Decode the builtin defaults compiled into the crate.
//! - Load caller-supplied catalogs from JSON strings or a directory.
//!
//! # Invariants
//! - A catalog is never partially decoded: any malformed registry fails the load.
//! - A missing registry file in a catalog directory yields an empty registry.

use crate::registry::{SectionSchemaRegistry, SidebarCardRegistry, WorkflowRegistry};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the section schema registry inside a catalog directory.
pub const SECTIONS_FILE_NAME: &str = "sections.json";
/// File name of the sidebar card registry inside a catalog directory.
pub const SIDEBAR_CARDS_FILE_NAME: &str = "sidebar_cards.json";
/// File name of the workflow registry inside a catalog directory.
pub const WORKFLOWS_FILE_NAME: &str = "workflows.json";

const BUILTIN_SECTIONS_JSON: &str = include_str!("../assets/sections.json");
const BUILTIN_SIDEBAR_CARDS_JSON: &str = include_str!("../assets/sidebar_cards.json");
const BUILTIN_WORKFLOWS_JSON: &str = include_str!("../assets/workflows.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog load errors.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        registry: &'static str,
        source: serde_json::Error,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog file `{}`: {source}", path.display())
            }
            Self::Json { registry, source } => {
                write!(f, "failed to decode {registry} registry: {source}")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// The three registries a rendering host reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub sections: SectionSchemaRegistry,
    pub sidebar_cards: SidebarCardRegistry,
    pub workflows: WorkflowRegistry,
}

impl Catalog {
    /// Decodes the builtin catalog shipped with the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json_strs(
            BUILTIN_SECTIONS_JSON,
            BUILTIN_SIDEBAR_CARDS_JSON,
            BUILTIN_WORKFLOWS_JSON,
        )
    }

    /// Decodes a catalog from three JSON object documents.
    pub fn from_json_strs(
        sections: &str,
        sidebar_cards: &str,
        workflows: &str,
    ) -> CatalogResult<Self> {
        Ok(Self {
            sections: decode_registry("section", sections)?,
            sidebar_cards: decode_registry("sidebar card", sidebar_cards)?,
            workflows: decode_registry("workflow", workflows)?,
        })
    }

    /// Loads a catalog from `dir`.
    ///
    /// Reads `sections.json`, `sidebar_cards.json` and `workflows.json`.
    ///
    /// # Errors
    /// - Returns `CatalogError::Io` when a present file cannot be read.
    /// - Returns `CatalogError::Json` when a file is not a valid registry.
    pub fn load_dir(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        let dir = dir.as_ref();
        let catalog = Self {
            sections: load_registry_file(dir, SECTIONS_FILE_NAME, "section")?,
            sidebar_cards: load_registry_file(dir, SIDEBAR_CARDS_FILE_NAME, "sidebar card")?,
            workflows: load_registry_file(dir, WORKFLOWS_FILE_NAME, "workflow")?,
        };
        info!(
            "event=catalog_load module=catalog status=ok dir={} sections={} cards={} workflows={}",
            dir.display(),
            catalog.sections.len(),
            catalog.sidebar_cards.len(),
            catalog.workflows.len()
        );
        Ok(catalog)
    }
}

fn decode_registry<T: DeserializeOwned>(registry: &'static str, raw: &str) -> CatalogResult<T> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Json { registry, source })
}

fn load_registry_file<T: DeserializeOwned + Default>(
    dir: &Path,
    file_name: &str,
    registry: &'static str,
) -> CatalogResult<T> {
    let path = dir.join(file_name);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "event=catalog_load module=catalog status=missing_file path={}",
                path.display()
            );
            return Ok(T::default());
        }
        Err(source) => return Err(CatalogError::Io { path, source }),
    };
    decode_registry(registry, &raw)
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError};

    #[test]
    fn builtin_catalog_decodes() {
        let catalog = Catalog::builtin().expect("builtin catalog must decode");
        assert!(catalog.sections.contains_key("hero_title"));
        assert!(catalog.sidebar_cards.contains_key("quick_actions"));
        assert!(catalog.workflows.contains_key("default_content_flow"));
    }

    #[test]
    fn from_json_strs_names_failing_registry() {
        let err = Catalog::from_json_strs("{}", "[]", "{}").expect_err("array is not a registry");
        assert!(matches!(
            err,
            CatalogError::Json {
                registry: "sidebar card",
                ..
            }
        ));
        assert!(err.to_string().contains("sidebar card"));
    }
}
