//! Flavour and component assets on disk
//!
//! Layout under each assets root:
//!
//! ```text
//! flavours/<flavour>.yml           docker-compose file, one service per component
//! images/<component>/<tag>/Dockerfile
//! ```
//!
//! `extra_flavours` and `extra_components` point directly at additional
//! flavour and component directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::config::Config;
use crate::core::error::SandboxError;
use crate::core::image::ImageRef;
use crate::logic::FlavourCatalog;

const FLAVOUR_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Asset directories, searched in order
#[derive(Debug, Clone)]
pub struct Assets {
    flavour_dirs: Vec<PathBuf>,
    component_dirs: Vec<PathBuf>,
}

impl Assets {
    pub fn new(flavour_dirs: Vec<PathBuf>, component_dirs: Vec<PathBuf>) -> Self {
        Self {
            flavour_dirs,
            component_dirs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let base = config.assets_path();

        let mut flavour_dirs = vec![base.join("flavours")];
        flavour_dirs.extend(config.extra_flavours().map(Path::to_path_buf));

        let mut component_dirs = vec![base.join("images")];
        component_dirs.extend(config.extra_components().map(Path::to_path_buf));

        Self::new(flavour_dirs, component_dirs)
    }

    /// Path of the compose file defining `flavour`
    pub fn flavour_file(&self, flavour: &str) -> Result<PathBuf, SandboxError> {
        if flavour.is_empty() || flavour.contains(['/', '\\']) {
            return Err(SandboxError::FlavourNotFound(flavour.to_string()));
        }

        for dir in &self.flavour_dirs {
            for ext in FLAVOUR_EXTENSIONS {
                let candidate = dir.join(format!("{}.{}", flavour, ext));
                if candidate.is_file() {
                    tracing::debug!("Flavour {} -> {}", flavour, candidate.display());
                    return Ok(candidate);
                }
            }
        }

        Err(SandboxError::FlavourNotFound(flavour.to_string()))
    }

    /// Build context directory for `image`
    pub fn component_dir(&self, image: &ImageRef) -> Result<PathBuf, SandboxError> {
        for dir in &self.component_dirs {
            let candidate = dir.join(image.component()).join(image.tag());
            if candidate.join("Dockerfile").is_file() {
                tracing::debug!("Image {} -> {}", image, candidate.display());
                return Ok(candidate);
            }
        }

        Err(SandboxError::ComponentNotFound {
            image: image.to_string(),
            searched: self
                .component_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl FlavourCatalog for Assets {
    fn list_flavours(&self) -> Result<Vec<String>, SandboxError> {
        let mut flavours = BTreeSet::new();

        for dir in self.flavour_dirs.iter().filter(|d| d.is_dir()) {
            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                let is_flavour = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| FLAVOUR_EXTENSIONS.contains(&e));
                if !is_flavour {
                    continue;
                }

                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    flavours.insert(stem.to_string());
                }
            }
        }

        Ok(flavours.into_iter().collect())
    }

    fn get_components_by_flavour(&self, flavour: &str) -> Result<Vec<String>, SandboxError> {
        let path = self.flavour_file(flavour)?;
        let content = std::fs::read_to_string(&path)?;
        compose_services(&content, &path)
    }
}

/// Service names of a compose file, in file order.
///
/// Files without a `services` key are treated as v1 compose files whose
/// top-level keys are the services.
pub fn compose_services(content: &str, path: &Path) -> Result<Vec<String>, SandboxError> {
    let asset_error = |message: String| SandboxError::Asset {
        path: path.to_path_buf(),
        message,
    };

    let doc: serde_yml::Value =
        serde_yml::from_str(content).map_err(|e| asset_error(e.to_string()))?;

    let services = doc.get("services").unwrap_or(&doc);
    let mapping = services
        .as_mapping()
        .ok_or_else(|| asset_error("expected a mapping of services".to_string()))?;

    mapping
        .iter()
        .map(|(key, _)| {
            key.as_str()
                .map(str::to_string)
                .ok_or_else(|| asset_error(format!("non-string service name: {:?}", key)))
        })
        .collect()
}
