//! Shared test helpers for integration tests
//!
//! Binary helpers for `assert_cmd` tests and in-memory collaborators for
//! driving the command handlers directly.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use sandbox::core::SandboxError;
use sandbox::docker::ImageSummary;
use sandbox::logic::{
    ContainerDetail, FlavourCatalog, ImageBuilder, RuntimeClient, SandboxComposer, Services,
};

/// Helper to get a sandbox-manage command
pub fn sandbox_manage() -> Command {
    Command::new(cargo::cargo_bin!("sandbox-manage"))
}

/// Helper to write a file, creating parent directories
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Helper to create an assets tree with two flavours and a config pointing at it.
///
/// Returns the temp dir and the config file path.
pub fn setup_assets() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let assets = tmp.path().join("assets");

    write_file(
        &assets.join("flavours/default.yml"),
        "services:\n  zookeeper:\n    image: sandbox/zookeeper:3.4\n  midolman:\n    image: sandbox/midolman:master\n",
    );
    write_file(
        &assets.join("flavours/mem-1.9.yml"),
        "services:\n  cassandra:\n    image: sandbox/cassandra:2.2\n",
    );
    write_file(&assets.join("images/midolman/master/Dockerfile"), "FROM ubuntu\n");

    let config = tmp.path().join("sandboxrc");
    write_file(
        &config,
        &format!(
            "assets_path: {}\ndocker_socket: unix:///nonexistent/docker.sock\n",
            assets.display()
        ),
    );

    let config = config.to_string_lossy().into_owned();
    (tmp, config)
}

// ============================================================================
// In-memory collaborators
// ============================================================================

/// Every collaborator call, in order
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: RefCell<Vec<String>>,
}

impl CallLog {
    pub fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[derive(Default)]
pub struct FakeBuilder {
    pub log: CallLog,
    /// Image whose build fails
    pub fail_on: Option<String>,
}

impl ImageBuilder for FakeBuilder {
    fn build(&self, image: &str, publish: bool) -> Result<(), SandboxError> {
        self.log.record(format!("build {} {}", image, publish));
        if self.fail_on.as_deref() == Some(image) {
            return Err(SandboxError::ComponentNotFound {
                image: image.to_string(),
                searched: "fake".into(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeComposer {
    pub log: CallLog,
    /// Running sandboxes and their containers
    pub sandboxes: Vec<(String, Vec<ContainerDetail>)>,
    pub fail_run: bool,
}

impl FakeComposer {
    pub fn with_sandboxes(sandboxes: &[(&str, usize)]) -> Self {
        let sandboxes = sandboxes
            .iter()
            .map(|(name, count)| {
                let containers = (0..*count)
                    .map(|i| ContainerDetail {
                        sandbox: name.to_string(),
                        name: format!("mnsandbox{}-c{}", name, i),
                        image: "sandbox/midolman:master".into(),
                        ports: String::new(),
                        ip: format!("172.17.0.{}", i + 2),
                    })
                    .collect();
                (name.to_string(), containers)
            })
            .collect();

        Self {
            sandboxes,
            ..Self::default()
        }
    }
}

impl SandboxComposer for FakeComposer {
    fn run(
        &self,
        flavour: &str,
        name: &str,
        override_path: Option<&str>,
    ) -> Result<(), SandboxError> {
        self.log
            .record(format!("run {} {} {:?}", flavour, name, override_path));
        if self.fail_run {
            return Err(SandboxError::FlavourNotFound(flavour.to_string()));
        }
        Ok(())
    }

    fn stop(&self, name: &str, remove: bool) -> Result<(), SandboxError> {
        self.log.record(format!("stop {} {}", name, remove));
        if self.sandboxes.iter().any(|(n, _)| n == name) {
            Ok(())
        } else {
            Err(SandboxError::SandboxNotFound(name.to_string()))
        }
    }

    fn list_running_sandbox(&self) -> Result<Vec<String>, SandboxError> {
        self.log.record("list_running_sandbox".into());
        Ok(self.sandboxes.iter().map(|(n, _)| n.clone()).collect())
    }

    fn get_sandbox_detail(&self, name: &str) -> Result<Vec<ContainerDetail>, SandboxError> {
        self.log.record(format!("get_sandbox_detail {}", name));
        self.sandboxes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, containers)| containers.clone())
            .ok_or_else(|| SandboxError::SandboxNotFound(name.to_string()))
    }
}

#[derive(Default)]
pub struct FakeAssets {
    pub flavours: Vec<(String, Vec<String>)>,
}

impl FakeAssets {
    pub fn new(flavours: &[(&str, &[&str])]) -> Self {
        Self {
            flavours: flavours
                .iter()
                .map(|(f, c)| (f.to_string(), c.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

impl FlavourCatalog for FakeAssets {
    fn list_flavours(&self) -> Result<Vec<String>, SandboxError> {
        Ok(self.flavours.iter().map(|(f, _)| f.clone()).collect())
    }

    fn get_components_by_flavour(&self, flavour: &str) -> Result<Vec<String>, SandboxError> {
        self.flavours
            .iter()
            .find(|(f, _)| f == flavour)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| SandboxError::FlavourNotFound(flavour.to_string()))
    }
}

#[derive(Default)]
pub struct FakeRuntime {
    pub images: Vec<ImageSummary>,
    pub prefixes: CallLog,
}

impl RuntimeClient for FakeRuntime {
    fn list_images(&self, prefix: &str) -> Result<Vec<ImageSummary>, SandboxError> {
        self.prefixes.record(prefix.to_string());
        Ok(self.images.clone())
    }
}

/// All fakes bundled together
#[derive(Default)]
pub struct Fakes {
    pub builder: FakeBuilder,
    pub composer: FakeComposer,
    pub assets: FakeAssets,
    pub runtime: FakeRuntime,
}

impl Fakes {
    pub fn services(&self) -> Services<'_> {
        Services {
            builder: &self.builder,
            composer: &self.composer,
            assets: &self.assets,
            runtime: &self.runtime,
        }
    }
}

// ============================================================================
// Scripted docker executable
// ============================================================================

/// A `docker` shell script that logs its arguments and answers queries from
/// files in its directory.
///
/// - `-H <host>` is recorded in `host` and left out of the argument log
/// - `ps` prints nothing until the `up` marker exists, then `ps.json` for
///   JSON queries and the project names in `projects` otherwise
/// - `compose ... up` creates the `up` marker
/// - any command `<cmd>` exits 1 with "<cmd> failed" on stderr while a
///   `fail-<cmd>` marker exists
#[cfg(unix)]
pub struct FakeDocker {
    pub dir: TempDir,
}

#[cfg(unix)]
impl FakeDocker {
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path().display().to_string();
        let script = format!(
            r#"#!/bin/sh
root='{root}'
if [ "$1" = "-H" ]; then echo "$2" > "$root/host"; shift 2; fi
echo "$*" >> "$root/argv.log"
if [ -f "$root/fail-$1" ]; then echo "$1 failed" >&2; exit 1; fi
case "$1" in
  ps)
    [ -f "$root/up" ] || exit 0
    case "$*" in
      *json*) cat "$root/ps.json" ;;
      *) cat "$root/projects" ;;
    esac ;;
  inspect) echo "172.18.0.2 " ;;
  compose)
    echo "compose output"
    case "$*" in *" up "*|*" up") touch "$root/up" ;; esac ;;
  build|push) echo "$1 output" ;;
esac
exit 0
"#
        );

        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let docker = bin.join("docker");
        fs::write(&docker, script).unwrap();
        fs::set_permissions(&docker, fs::Permissions::from_mode(0o755)).unwrap();

        write_file(
            &dir.path().join("ps.json"),
            "{\"ID\":\"c1\",\"Names\":\"mnsandboxqa-midolman-1\",\"Image\":\"sandbox/midolman:master\",\"Ports\":\"\"}\n",
        );
        write_file(&dir.path().join("projects"), "mnsandboxqa\n");

        Self { dir }
    }

    /// Directory holding the `docker` script, for prepending to PATH
    pub fn bin_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("bin")
    }

    /// Path of the `docker` script
    pub fn binary(&self) -> String {
        self.bin_dir().join("docker").display().to_string()
    }

    /// Create a marker file (`up`, `fail-<cmd>`)
    pub fn touch(&self, marker: &str) {
        write_file(&self.dir.path().join(marker), "");
    }

    /// Every invocation so far, one space-joined argv per entry
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("argv.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Invocations that change state (everything but `ps` and `inspect`)
    pub fn actions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("ps ") && !c.starts_with("inspect "))
            .collect()
    }

    /// Daemon address passed with `-H`, if any
    pub fn host(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join("host"))
            .ok()
            .map(|h| h.trim().to_string())
    }

    /// PATH with the script directory first
    pub fn path_env(&self) -> String {
        let current = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.bin_dir().display(), current)
    }
}
