//! Sandbox composer
//!
//! A sandbox named `dev` is the docker compose project `<prefix>dev`, started
//! from a flavour compose file plus an optional override file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::error::SandboxError;
use crate::docker::Docker;
use crate::logic::{Assets, SandboxComposer};

/// One container of a running sandbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetail {
    pub sandbox: String,
    pub name: String,
    pub image: String,
    pub ports: String,
    pub ip: String,
}

impl ContainerDetail {
    /// Display row: sandbox, name, image, ports, ip
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.sandbox.clone(),
            self.name.clone(),
            self.image.clone(),
            self.ports.clone(),
            self.ip.clone(),
        ]
    }
}

pub struct Composer<'a> {
    docker: &'a Docker,
    assets: &'a Assets,
    prefix: String,
}

impl<'a> Composer<'a> {
    pub fn new(docker: &'a Docker, assets: &'a Assets, prefix: &str) -> Self {
        Self {
            docker,
            assets,
            prefix: prefix.to_string(),
        }
    }

    /// Compose project backing sandbox `name`
    pub fn project(&self, name: &str) -> Result<String, SandboxError> {
        validate_sandbox_name(name)?;
        Ok(format!("{}{}", self.prefix, name))
    }
}

impl SandboxComposer for Composer<'_> {
    fn run(
        &self,
        flavour: &str,
        name: &str,
        override_path: Option<&str>,
    ) -> Result<(), SandboxError> {
        let project = self.project(name)?;
        let flavour_file = self.assets.flavour_file(flavour)?;
        let override_file = override_path
            .map(|p| resolve_override(Path::new(p), flavour))
            .transpose()?;

        if !self.docker.project_containers(&project, false)?.is_empty() {
            return Err(SandboxError::SandboxAlreadyRunning(name.to_string()));
        }

        let mut files = vec![flavour_file.as_path()];
        files.extend(override_file.as_deref());

        tracing::info!("Starting sandbox {} with flavour {}", name, flavour);
        self.docker.compose(&project, &files, &["up", "-d"])?;
        tracing::info!("Sandbox {} started", name);
        Ok(())
    }

    fn stop(&self, name: &str, remove: bool) -> Result<(), SandboxError> {
        let project = self.project(name)?;

        if self.docker.project_containers(&project, true)?.is_empty() {
            return Err(SandboxError::SandboxNotFound(name.to_string()));
        }

        tracing::info!("Stopping sandbox {}", name);
        self.docker.compose(&project, &[], &["stop"])?;

        if remove {
            self.docker
                .compose(&project, &[], &["down", "--volumes", "--remove-orphans"])?;
            tracing::info!("Sandbox {} removed", name);
        }
        Ok(())
    }

    fn list_running_sandbox(&self) -> Result<Vec<String>, SandboxError> {
        let projects = self.docker.running_projects()?;
        Ok(sandboxes_from_projects(&projects, &self.prefix))
    }

    fn get_sandbox_detail(&self, name: &str) -> Result<Vec<ContainerDetail>, SandboxError> {
        let project = self.project(name)?;
        let mut containers = self.docker.project_containers(&project, false)?;
        containers.sort_by(|a, b| a.name.cmp(&b.name));

        containers
            .into_iter()
            .map(|container| {
                let ip = self.docker.container_ips(&container.name)?;
                Ok(ContainerDetail {
                    sandbox: name.to_string(),
                    name: container.name,
                    image: container.image,
                    ports: container.ports,
                    ip,
                })
            })
            .collect()
    }
}

/// Sandbox names must be valid compose project suffixes
pub fn validate_sandbox_name(name: &str) -> Result<(), SandboxError> {
    let mut chars = name.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let valid_rest =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid_first && valid_rest {
        Ok(())
    } else {
        Err(SandboxError::InvalidSandboxName(name.to_string()))
    }
}

/// Sandbox names of the projects carrying `prefix`, sorted and de-duplicated
pub fn sandboxes_from_projects(projects: &[String], prefix: &str) -> Vec<String> {
    projects
        .iter()
        .filter_map(|project| project.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// An override is either a compose file or a directory with `<flavour>.yml`
pub fn resolve_override(path: &Path, flavour: &str) -> Result<PathBuf, SandboxError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.is_dir() {
        for ext in ["yml", "yaml"] {
            let candidate = path.join(format!("{}.{}", flavour, ext));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(SandboxError::OverrideNotFound(path.to_path_buf()))
}
