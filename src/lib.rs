//! Midonet Sandbox Manager
//!
//! Builds sandbox images and runs ephemeral multi-container sandboxes on top
//! of docker and docker compose.

pub mod cli;
pub mod core;
pub mod docker;
pub mod logic;
