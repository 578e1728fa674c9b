//! Command-line grammar

use clap::{Args, Parser, Subcommand};
use tracing::Level;

/// Midonet Sandbox Manager
///
/// Build sandbox images and run ephemeral multi-container sandboxes from
/// flavour definitions.
#[derive(Parser, Debug)]
#[command(name = "sandbox-manage")]
#[command(about = "Midonet Sandbox Manager - build images and run multi-container sandboxes")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log", global = true, default_value = "INFO")]
    pub log: Level,

    /// Configuration file [default: ~/.midonet-sandboxrc]
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one or more sandbox images
    Build(BuildArgs),

    /// Start a sandbox from a flavour
    Run(RunArgs),

    /// Stop a running sandbox
    Stop(StopArgs),

    /// List the available flavours
    FlavoursList(FlavoursListArgs),

    /// List the sandbox images built locally
    ImagesList(ImagesListArgs),

    /// List the running sandboxes
    SandboxList(SandboxListArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    /// Images to build (<name> or <name>:<tag>, tag defaults to master)
    #[arg(required = true, value_name = "IMAGE")]
    pub images: Vec<String>,

    /// Push the images after building them
    #[arg(long)]
    pub publish: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Flavour to start
    pub flavour: String,

    /// Name of the new sandbox
    #[arg(long)]
    pub name: String,

    /// Compose file (or directory of per-flavour files) overriding the flavour
    #[arg(long, value_name = "OVERRIDE")]
    pub r#override: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StopArgs {
    /// Sandbox to stop
    pub name: String,

    /// Also remove the sandbox's containers and volumes
    #[arg(long)]
    pub remove: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlavoursListArgs {
    /// Show the components of each flavour
    #[arg(long)]
    pub details: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagesListArgs {}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxListArgs {
    /// Show every container of each sandbox
    #[arg(long)]
    pub details: bool,
}
