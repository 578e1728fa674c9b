//! `sandbox-manage run` command - Start a sandbox from a flavour

use miette::Result;
use std::io::Write;

use crate::cli::{RunArgs, SandboxListArgs};
use crate::logic::Services;

/// Start the sandbox, then show its containers
pub fn run(args: RunArgs, services: &Services<'_>, out: &mut dyn Write) -> Result<()> {
    services
        .composer
        .run(&args.flavour, &args.name, args.r#override.as_deref())?;

    super::sandbox::run(SandboxListArgs { details: true }, services, out)
}
