//! `sandbox-manage flavours-list` command - List available flavours

use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::cli::table::Listing;
use crate::cli::FlavoursListArgs;
use crate::logic::Services;

pub fn run(args: FlavoursListArgs, services: &Services<'_>, out: &mut dyn Write) -> Result<()> {
    let listing = listing(&args, services)?;
    writeln!(out, "{}", listing).into_diagnostic()
}

/// One row per flavour; with details, its components as a second column
pub fn listing(args: &FlavoursListArgs, services: &Services<'_>) -> Result<Listing> {
    let mut listing = if args.details {
        Listing::new(&["Flavours", "Components"])
    } else {
        Listing::new(&["Flavours"])
    };

    for flavour in services.assets.list_flavours()? {
        if args.details {
            let components = services.assets.get_components_by_flavour(&flavour)?;
            listing.push(vec![flavour, components.join(", ")]);
        } else {
            listing.push(vec![flavour]);
        }
    }

    Ok(listing)
}
