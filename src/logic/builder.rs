//! Image builder

use crate::core::error::SandboxError;
use crate::core::image::ImageRef;
use crate::docker::Docker;
use crate::logic::{Assets, ImageBuilder};

/// Builds component images from their asset Dockerfiles
pub struct Builder<'a> {
    docker: &'a Docker,
    assets: &'a Assets,
    registry: Option<String>,
}

impl<'a> Builder<'a> {
    pub fn new(docker: &'a Docker, assets: &'a Assets, registry: Option<&str>) -> Self {
        Self {
            docker,
            assets,
            registry: registry.map(str::to_string),
        }
    }

    fn publish(&self, image: &ImageRef) -> Result<(), SandboxError> {
        let local = image.local_tag();

        let target = match &self.registry {
            Some(registry) => {
                let remote = image.remote_tag(registry);
                self.docker.tag_image(&local, &remote)?;
                remote
            }
            None => local,
        };

        self.docker.push_image(&target)?;
        tracing::info!("Published {}", target);
        Ok(())
    }
}

impl ImageBuilder for Builder<'_> {
    fn build(&self, image: &str, publish: bool) -> Result<(), SandboxError> {
        let image = ImageRef::parse(image)?;
        let context = self.assets.component_dir(&image)?;
        let tag = image.local_tag();

        tracing::info!("Building {} from {}", tag, context.display());
        self.docker.build_image(&tag, &context)?;
        tracing::info!("Built {}", tag);

        if publish {
            self.publish(&image)?;
        }
        Ok(())
    }
}
