//! `sandbox-manage build` command - Build sandbox images

use miette::Result;

use crate::cli::BuildArgs;
use crate::core::image::qualify;
use crate::logic::Services;

/// Build each image in order, stopping at the first failure
pub fn run(args: BuildArgs, services: &Services<'_>) -> Result<()> {
    for image in &args.images {
        services.builder.build(&qualify(image), args.publish)?;
    }

    Ok(())
}
