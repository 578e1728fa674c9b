//! Sandbox manager configuration
//!
//! Settings are read from a YAML file (by default `~/.midonet-sandboxrc`).
//! Every key is optional and falls back to a documented default.
//!
//! ```yaml
//! docker_socket: unix:///var/run/docker.sock
//! docker_registry: registry.example.com:5000
//! assets_path: ~/midonet-sandbox/assets
//! extra_flavours: ~/sandbox/flavours
//! extra_components: ~/sandbox/components
//! sandbox_prefix: mnsandbox
//! ```

use directories::{BaseDirs, ProjectDirs};
use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "~/.midonet-sandboxrc";

pub const DEFAULT_DOCKER_SOCKET: &str = "unix:///var/run/docker.sock";
pub const DEFAULT_SANDBOX_PREFIX: &str = "mnsandbox";

/// Keys accepted by [`Config::get_default_value`]
pub const KNOWN_KEYS: &[&str] = &[
    "docker_socket",
    "docker_registry",
    "assets_path",
    "extra_flavours",
    "extra_components",
    "sandbox_prefix",
];

static INSTANCE: OnceLock<Config> = OnceLock::new();

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    #[diagnostic(
        code(sandbox::config::not_found),
        help("Create the file or omit --config to use the defaults")
    )]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}", .path.display())]
    #[diagnostic(code(sandbox::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration file {}: {message}", .path.display())]
    #[diagnostic(code(sandbox::config::parse))]
    Parse { path: PathBuf, message: String },

    #[error("Unknown configuration key: {0}")]
    #[diagnostic(
        code(sandbox::config::unknown_key),
        help("Known keys: docker_socket, docker_registry, assets_path, extra_flavours, extra_components, sandbox_prefix")
    )]
    UnknownKey(String),

    #[error("Configuration has not been initialized")]
    #[diagnostic(code(sandbox::config::uninitialized))]
    NotInitialized,
}

/// Raw file contents; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    docker_socket: Option<String>,
    docker_registry: Option<String>,
    assets_path: Option<String>,
    extra_flavours: Option<String>,
    extra_components: Option<String>,
    sandbox_prefix: Option<String>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    source: Option<PathBuf>,
    docker_socket: String,
    docker_registry: Option<String>,
    assets_path: PathBuf,
    extra_flavours: Option<PathBuf>,
    extra_components: Option<PathBuf>,
    sandbox_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(None, ConfigFile::default())
    }
}

impl Config {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = expand_home(path.unwrap_or(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            tracing::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse YAML configuration content; `path` is recorded as the source
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty file is a valid (all-defaults) configuration
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };
        Ok(Self::from_file(Some(path.to_path_buf()), file))
    }

    fn from_file(source: Option<PathBuf>, file: ConfigFile) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            source,
            docker_socket: non_empty(file.docker_socket)
                .unwrap_or_else(|| DEFAULT_DOCKER_SOCKET.to_string()),
            docker_registry: non_empty(file.docker_registry),
            assets_path: non_empty(file.assets_path)
                .map(|p| expand_home(&p))
                .unwrap_or_else(default_assets_path),
            extra_flavours: non_empty(file.extra_flavours).map(|p| expand_home(&p)),
            extra_components: non_empty(file.extra_components).map(|p| expand_home(&p)),
            sandbox_prefix: non_empty(file.sandbox_prefix)
                .unwrap_or_else(|| DEFAULT_SANDBOX_PREFIX.to_string()),
        }
    }

    /// Initialize the process-wide configuration on first call.
    ///
    /// Subsequent calls return the cached instance and ignore `path`.
    pub fn instance(path: Option<&str>) -> Result<&'static Config, ConfigError> {
        if let Some(config) = INSTANCE.get() {
            if path.map(expand_home) != config.source {
                tracing::debug!("Configuration already initialized, ignoring {:?}", path);
            }
            return Ok(config);
        }

        let config = Self::load(path)?;
        Ok(INSTANCE.get_or_init(|| config))
    }

    /// The process-wide configuration, if [`Config::instance`] has run.
    ///
    /// For library callers that need the configuration after `main` has
    /// initialized it, without threading a reference through.
    pub fn instance_or_die() -> Result<&'static Config, ConfigError> {
        INSTANCE.get().ok_or(ConfigError::NotInitialized)
    }

    /// Look up a setting by key, returning its default when unset.
    ///
    /// Unset optional settings render as an empty string.
    pub fn get_default_value(&self, key: &str) -> Result<String, ConfigError> {
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        match key {
            "docker_socket" => Ok(self.docker_socket.clone()),
            "docker_registry" => Ok(self.docker_registry.clone().unwrap_or_default()),
            "assets_path" => Ok(self.assets_path.display().to_string()),
            "extra_flavours" => Ok(path_str(&self.extra_flavours)),
            "extra_components" => Ok(path_str(&self.extra_components)),
            "sandbox_prefix" => Ok(self.sandbox_prefix.clone()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// File this configuration was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn docker_socket(&self) -> &str {
        &self.docker_socket
    }

    pub fn docker_registry(&self) -> Option<&str> {
        self.docker_registry.as_deref()
    }

    pub fn assets_path(&self) -> &Path {
        &self.assets_path
    }

    pub fn extra_flavours(&self) -> Option<&Path> {
        self.extra_flavours.as_deref()
    }

    pub fn extra_components(&self) -> Option<&Path> {
        self.extra_components.as_deref()
    }

    pub fn sandbox_prefix(&self) -> &str {
        &self.sandbox_prefix
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let home = || BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    if path == "~" {
        if let Some(home) = home() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_assets_path() -> PathBuf {
    ProjectDirs::from("org", "midonet", "midonet-sandbox")
        .map(|dirs| dirs.data_dir().join("assets"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}
