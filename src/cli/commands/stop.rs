//! `sandbox-manage stop` command - Stop (and optionally remove) a sandbox

use console::style;
use miette::Result;

use crate::cli::StopArgs;
use crate::logic::Services;

pub fn run(args: StopArgs, services: &Services<'_>) -> Result<()> {
    services.composer.stop(&args.name, args.remove)?;

    let action = if args.remove { "Removed" } else { "Stopped" };
    eprintln!(
        "{} {} sandbox {}",
        style("✓").green(),
        action,
        style(&args.name).cyan()
    );
    Ok(())
}
