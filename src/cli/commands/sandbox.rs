//! `sandbox-manage sandbox-list` command - List running sandboxes

use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::cli::table::Listing;
use crate::cli::SandboxListArgs;
use crate::logic::Services;

pub fn run(args: SandboxListArgs, services: &Services<'_>, out: &mut dyn Write) -> Result<()> {
    let listing = listing(&args, services)?;
    writeln!(out, "{}", listing).into_diagnostic()
}

/// One row per sandbox; with details, one row per container across all sandboxes
pub fn listing(args: &SandboxListArgs, services: &Services<'_>) -> Result<Listing> {
    let mut listing = if args.details {
        Listing::new(&["Sandbox", "Name", "Image", "Ports", "Ip"])
    } else {
        Listing::new(&["Sandbox"])
    };

    for sandbox in services.composer.list_running_sandbox()? {
        if args.details {
            for container in services.composer.get_sandbox_detail(&sandbox)? {
                listing.push(container.to_row());
            }
        } else {
            listing.push(vec![sandbox]);
        }
    }

    Ok(listing)
}
