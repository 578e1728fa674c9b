//! CLI command implementations

pub mod build;
pub mod flavours;
pub mod images;
pub mod run;
pub mod sandbox;
pub mod stop;

use miette::Result;
use std::io::Write;

use crate::cli::Commands;
use crate::logic::Services;

/// Run exactly one command against the given collaborators
pub fn dispatch(command: Commands, services: &Services<'_>, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Build(args) => build::run(args, services),
        Commands::Run(args) => run::run(args, services, out),
        Commands::Stop(args) => stop::run(args, services),
        Commands::FlavoursList(args) => flavours::run(args, services, out),
        Commands::ImagesList(args) => images::run(args, services, out),
        Commands::SandboxList(args) => sandbox::run(args, services, out),
    }
}
