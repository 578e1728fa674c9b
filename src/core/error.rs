//! Errors surfaced by the sandbox collaborators

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::config::ConfigError;

/// Failures from the builder, composer, assets and docker client
#[derive(Debug, Error, Diagnostic)]
pub enum SandboxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid image reference: '{0}'")]
    #[diagnostic(
        code(sandbox::image::invalid),
        help("Use <name> or <name>:<tag>, e.g. midolman:master")
    )]
    InvalidImage(String),

    #[error("Invalid sandbox name: '{0}'")]
    #[diagnostic(
        code(sandbox::name::invalid),
        help("Sandbox names use lowercase letters, digits, '-' and '_', starting with a letter or digit")
    )]
    InvalidSandboxName(String),

    #[error("Flavour not found: {0}")]
    #[diagnostic(
        code(sandbox::flavour::not_found),
        help("List the available flavours with `sandbox-manage flavours-list`")
    )]
    FlavourNotFound(String),

    #[error("No build definition for {image} (searched {searched})")]
    #[diagnostic(code(sandbox::component::not_found))]
    ComponentNotFound { image: String, searched: String },

    #[error("Override not found: {}", .0.display())]
    #[diagnostic(code(sandbox::overrides::not_found))]
    OverrideNotFound(PathBuf),

    #[error("Sandbox not found: {0}")]
    #[diagnostic(
        code(sandbox::not_found),
        help("List running sandboxes with `sandbox-manage sandbox-list`")
    )]
    SandboxNotFound(String),

    #[error("Sandbox already running: {0}")]
    #[diagnostic(
        code(sandbox::already_running),
        help("Stop it first with `sandbox-manage stop <name>`")
    )]
    SandboxAlreadyRunning(String),

    #[error("Failed to parse {}: {message}", .path.display())]
    #[diagnostic(code(sandbox::assets::parse))]
    Asset { path: PathBuf, message: String },

    #[error("Could not run docker")]
    #[diagnostic(
        code(sandbox::docker::unavailable),
        help("Make sure the docker CLI is installed and on PATH")
    )]
    DockerUnavailable(#[source] std::io::Error),

    #[error("`docker {command}` failed ({status}){}", stderr_suffix(.stderr))]
    #[diagnostic(code(sandbox::docker::failed))]
    Docker {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected docker output: {0}")]
    #[diagnostic(code(sandbox::docker::output))]
    DockerOutput(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(sandbox::io))]
    Io(#[from] std::io::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
