//! Docker runtime client
//!
//! Thin wrapper over the `docker` executable. Queries capture stdout and parse
//! the JSON-lines output; long-running operations (build, push, compose)
//! stream to the terminal on stderr, keeping stdout for command output.

pub mod listing;

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::core::error::SandboxError;
use crate::logic::RuntimeClient;

pub use listing::{ContainerSummary, ImageSummary};

/// Label docker compose puts on every container of a project
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";

/// Client for one docker daemon
#[derive(Debug, Clone)]
pub struct Docker {
    host: String,
    binary: String,
}

impl Docker {
    /// Client talking to the daemon at `host` (e.g. `unix:///var/run/docker.sock`)
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_binary(host, "docker")
    }

    /// Client running `binary` instead of the `docker` found on PATH
    pub fn with_binary(host: impl Into<String>, binary: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            binary: binary.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn command<I, S>(&self, args: I) -> (Command, String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.binary);
        if !self.host.is_empty() {
            cmd.arg("-H").arg(&self.host);
        }

        let mut rendered = Vec::new();
        for arg in args {
            rendered.push(arg.as_ref().to_string_lossy().into_owned());
            cmd.arg(arg);
        }
        let rendered = rendered.join(" ");
        tracing::debug!("docker {}", rendered);

        (cmd, rendered)
    }

    /// Run a query and return its stdout
    pub fn capture<I, S>(&self, args: I) -> Result<String, SandboxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (mut cmd, rendered) = self.command(args);
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(SandboxError::DockerUnavailable)?;

        if !output.status.success() {
            return Err(SandboxError::Docker {
                command: rendered,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command with both of its output streams sent to our stderr
    pub fn stream<I, S>(&self, args: I) -> Result<(), SandboxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (mut cmd, rendered) = self.command(args);
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::from(std::io::stderr()))
            .status()
            .map_err(SandboxError::DockerUnavailable)?;

        if !status.success() {
            return Err(SandboxError::Docker {
                command: rendered,
                status: status.to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// Build `context` as `tag`
    pub fn build_image(&self, tag: &str, context: &Path) -> Result<(), SandboxError> {
        self.stream([
            OsStr::new("build"),
            OsStr::new("-t"),
            OsStr::new(tag),
            context.as_os_str(),
        ])
    }

    pub fn tag_image(&self, source: &str, target: &str) -> Result<(), SandboxError> {
        self.capture(["tag", source, target]).map(|_| ())
    }

    pub fn push_image(&self, reference: &str) -> Result<(), SandboxError> {
        self.stream(["push", reference])
    }

    /// Local images whose repository starts with `prefix`
    pub fn list_images(&self, prefix: &str) -> Result<Vec<ImageSummary>, SandboxError> {
        let output = self.capture(["image", "ls", "--no-trunc", "--format", "{{json .}}"])?;
        listing::parse_image_listing(&output, prefix)
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// Compose project names of all running containers
    pub fn running_projects(&self) -> Result<Vec<String>, SandboxError> {
        let label_filter = format!("label={}", COMPOSE_PROJECT_LABEL);
        let format = format!("{{{{.Label \"{}\"}}}}", COMPOSE_PROJECT_LABEL);
        let output = self.capture([
            "ps",
            "--filter",
            label_filter.as_str(),
            "--format",
            format.as_str(),
        ])?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Containers belonging to a compose project; stopped ones too when `all`
    pub fn project_containers(
        &self,
        project: &str,
        all: bool,
    ) -> Result<Vec<ContainerSummary>, SandboxError> {
        let label_filter = format!("label={}={}", COMPOSE_PROJECT_LABEL, project);
        let mut args = vec!["ps", "--no-trunc", "--filter", label_filter.as_str()];
        if all {
            args.push("-a");
        }
        args.extend(["--format", "{{json .}}"]);

        let output = self.capture(args)?;
        listing::parse_container_listing(&output)
    }

    /// IP addresses of a container across all its networks, space separated
    pub fn container_ips(&self, container: &str) -> Result<String, SandboxError> {
        let output = self.capture([
            "inspect",
            "--format",
            "{{range .NetworkSettings.Networks}}{{.IPAddress}} {{end}}",
            container,
        ])?;
        Ok(output.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    // ========================================================================
    // Compose
    // ========================================================================

    /// Run `docker compose -p <project> [-f <file>]... <args>`
    pub fn compose(&self, project: &str, files: &[&Path], args: &[&str]) -> Result<(), SandboxError> {
        let mut argv: Vec<&OsStr> = vec![OsStr::new("compose"), OsStr::new("-p"), OsStr::new(project)];
        for file in files {
            argv.push(OsStr::new("-f"));
            argv.push(file.as_os_str());
        }
        argv.extend(args.iter().map(OsStr::new));

        self.stream(argv)
    }
}

impl RuntimeClient for Docker {
    fn list_images(&self, prefix: &str) -> Result<Vec<ImageSummary>, SandboxError> {
        Docker::list_images(self, prefix)
    }
}
