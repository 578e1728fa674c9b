//! CLI module - argument parsing, command dispatch and table output

pub mod args;
pub mod commands;
pub mod helpers;
pub mod table;

pub use args::{
    BuildArgs, Cli, Commands, FlavoursListArgs, GlobalOpts, ImagesListArgs, RunArgs,
    SandboxListArgs, StopArgs,
};
pub use commands::dispatch;
pub use table::Listing;
