//! Collaborators the command handlers delegate to
//!
//! Each handler talks to exactly one of these traits. The concrete
//! implementations drive docker; tests substitute in-memory fakes.

pub mod assets;
pub mod builder;
pub mod composer;

use crate::core::error::SandboxError;
use crate::docker::ImageSummary;

pub use assets::Assets;
pub use builder::Builder;
pub use composer::{Composer, ContainerDetail};

/// Builds sandbox images
pub trait ImageBuilder {
    /// Build `image` (`name:tag`, or any identifier containing `:`), pushing it
    /// afterwards when `publish` is set
    fn build(&self, image: &str, publish: bool) -> Result<(), SandboxError>;
}

/// Starts, stops and inspects sandboxes
pub trait SandboxComposer {
    fn run(&self, flavour: &str, name: &str, override_path: Option<&str>)
        -> Result<(), SandboxError>;

    fn stop(&self, name: &str, remove: bool) -> Result<(), SandboxError>;

    /// Names of running sandboxes
    fn list_running_sandbox(&self) -> Result<Vec<String>, SandboxError>;

    /// Per-container details of one sandbox
    fn get_sandbox_detail(&self, name: &str) -> Result<Vec<ContainerDetail>, SandboxError>;
}

/// Known flavours and their components
pub trait FlavourCatalog {
    fn list_flavours(&self) -> Result<Vec<String>, SandboxError>;

    fn get_components_by_flavour(&self, flavour: &str) -> Result<Vec<String>, SandboxError>;
}

/// Image queries against the container runtime
pub trait RuntimeClient {
    fn list_images(&self, prefix: &str) -> Result<Vec<ImageSummary>, SandboxError>;
}

/// Collaborators available to command handlers
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub builder: &'a dyn ImageBuilder,
    pub composer: &'a dyn SandboxComposer,
    pub assets: &'a dyn FlavourCatalog,
    pub runtime: &'a dyn RuntimeClient,
}
