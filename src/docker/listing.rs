//! Parsers for `docker ... --format '{{json .}}'` output

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::error::SandboxError;

/// One local image with every `repository:tag` pointing at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub id: String,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
}

/// One container as reported by `docker ps`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Names")]
    pub name: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Ports", default)]
    pub ports: String,
}

#[derive(Debug, Deserialize)]
struct ImageLine {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Repository")]
    repository: String,
    #[serde(rename = "Tag")]
    tag: String,
    #[serde(rename = "CreatedAt")]
    created_at: String,
}

/// Group `docker image ls` lines into images whose repository starts with `prefix`.
///
/// Images keep the order in which their first tag appears.
pub fn parse_image_listing(output: &str, prefix: &str) -> Result<Vec<ImageSummary>, SandboxError> {
    let mut images: Vec<ImageSummary> = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let entry: ImageLine = serde_json::from_str(line)
            .map_err(|e| SandboxError::DockerOutput(format!("{}: {}", e, line)))?;

        if !entry.repository.starts_with(prefix) || entry.tag == "<none>" {
            continue;
        }

        let label = format!("{}:{}", entry.repository, entry.tag);
        match images.iter_mut().find(|image| image.id == entry.id) {
            Some(image) => image.tags.push(label),
            None => images.push(ImageSummary {
                id: entry.id,
                tags: vec![label],
                created: parse_created_at(&entry.created_at)?,
            }),
        }
    }

    Ok(images)
}

/// Parse `docker ps` lines
pub fn parse_container_listing(output: &str) -> Result<Vec<ContainerSummary>, SandboxError> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| SandboxError::DockerOutput(format!("{}: {}", e, line)))
        })
        .collect()
}

/// Parse docker's `CreatedAt` format, e.g. `2024-03-01 10:15:00 +0100 CET`.
///
/// The trailing zone abbreviation is ignored; the numeric offset is authoritative.
pub fn parse_created_at(value: &str) -> Result<DateTime<Utc>, SandboxError> {
    let stamp: Vec<&str> = value.split_whitespace().take(3).collect();

    DateTime::parse_from_str(&stamp.join(" "), "%Y-%m-%d %H:%M:%S %z")
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SandboxError::DockerOutput(format!("bad timestamp '{}': {}", value, e)))
}
