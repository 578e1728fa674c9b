//! Image references (`name:tag`)

use std::fmt;

use crate::core::error::SandboxError;

/// Tag applied to image identifiers given without one
pub const DEFAULT_TAG: &str = "master";

/// Repository namespace under which sandbox images are built
pub const IMAGE_NAMESPACE: &str = "sandbox/";

/// A fully-qualified `name:tag` image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    name: String,
    tag: String,
}

impl ImageRef {
    /// Parse an image identifier, defaulting the tag to [`DEFAULT_TAG`].
    ///
    /// Identifiers that already contain a tag keep it untouched. A `:` before
    /// the last `/` belongs to a registry port (`host:5000/name`), not a tag.
    pub fn parse(image: &str) -> Result<Self, SandboxError> {
        let invalid = || SandboxError::InvalidImage(image.to_string());

        let (name, tag) = match image.rsplit_once(':') {
            Some((_, rest)) if rest.contains('/') => (image, DEFAULT_TAG),
            Some((name, tag)) => (name, tag),
            None => (image, DEFAULT_TAG),
        };

        if name.is_empty() || tag.is_empty() || name.ends_with('/') {
            return Err(invalid());
        }
        if name.chars().any(char::is_whitespace) || tag.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Component name with any registry host and `sandbox/` namespace removed
    pub fn component(&self) -> &str {
        let path = match self.name.split_once('/') {
            Some((host, rest)) if host.contains(['.', ':']) || host == "localhost" => rest,
            _ => self.name.as_str(),
        };
        path.strip_prefix(IMAGE_NAMESPACE).unwrap_or(path)
    }

    /// Repository name this image is built as (`sandbox/<component>:<tag>`)
    pub fn local_tag(&self) -> String {
        format!("{}{}:{}", IMAGE_NAMESPACE, self.component(), self.tag)
    }

    /// Repository name in `registry`
    pub fn remote_tag(&self, registry: &str) -> String {
        format!("{}/{}", registry.trim_end_matches('/'), self.local_tag())
    }
}

/// Identifier handed to the builder: `:master` is appended when `image` has
/// no `:` at all, anything else passes through unchanged
pub fn qualify(image: &str) -> String {
    if image.contains(':') {
        image.to_string()
    } else {
        format!("{}:{}", image, DEFAULT_TAG)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
