//! Core module - configuration, errors and shared types

pub mod config;
pub mod error;
pub mod image;
pub mod logging;

pub use config::{Config, ConfigError};
pub use error::SandboxError;
pub use image::{qualify, ImageRef};
pub use logging::configure_logging;
