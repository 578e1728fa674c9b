//! `sandbox-manage images-list` command - List locally built sandbox images

use chrono::{DateTime, Utc};
use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::cli::helpers::natural_time;
use crate::cli::table::Listing;
use crate::cli::ImagesListArgs;
use crate::core::image::IMAGE_NAMESPACE;
use crate::docker::ImageSummary;
use crate::logic::Services;

pub fn run(_args: ImagesListArgs, services: &Services<'_>, out: &mut dyn Write) -> Result<()> {
    let images = services.runtime.list_images(IMAGE_NAMESPACE)?;
    let listing = listing(&images, Utc::now());
    writeln!(out, "{}", listing).into_diagnostic()
}

/// Tags and age of each image relative to `now`
pub fn listing(images: &[ImageSummary], now: DateTime<Utc>) -> Listing {
    let mut listing = Listing::new(&["Image", "Created"]);
    for image in images {
        listing.push(vec![image.tags.join(","), natural_time(now, image.created)]);
    }
    listing
}
