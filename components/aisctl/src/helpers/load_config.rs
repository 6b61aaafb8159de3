// Local crates
use crate::dispatch::{error::DispatchError, resolver::TargetApp};

// External crates
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File looked up next to the aisctl executable when `--config` is not given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "aisctl.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub apps: AppsConfig,
    pub environment: EnvironmentConfig,
}

/// Where the native apps live and what they are called.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppsConfig {
    /// Defaults to the directory of the aisctl executable.
    pub app_dir: Option<PathBuf>,
    pub manager_app: String,
    pub ingester_app: String,
    pub playback_app: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            app_dir: None,
            manager_app: TargetApp::Manager.default_file_name().to_string(),
            ingester_app: TargetApp::Ingester.default_file_name().to_string(),
            playback_app: TargetApp::Playback.default_file_name().to_string(),
        }
    }
}

/// Variables injected into the app's environment.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// GStreamer plugin search path. Defaults to `<app_dir>/gst-plugins`.
    pub gst_plugin_path: Option<PathBuf>,
    pub glog_alsologtostderr: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gst_plugin_path: None,
            glog_alsologtostderr: true,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line.
    Explicit(PathBuf),
    /// `aisctl.toml` next to the executable.
    InstallDir(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "config file {}", path.display()),
            ConfigSource::InstallDir(path) => write!(f, "install-dir config {}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl Config {
    /// Read and parse one TOML file.
    #[instrument(
        name = "aisctl_config::load",
        target = "helpers::load_config",
        level = "trace",
        skip_all
    )]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let text = fs::read_to_string(path)
            .inspect_err(|e| tracing::error!(error = %e, path = %path.display(), "Cannot read config"))
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&text)
            .inspect_err(|e| tracing::error!(error = %e, path = %path.display(), "Config is not valid TOML"))
            .with_context(|| format!("Failed to parse TOML in {}", path.display()))
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Otherwise `aisctl.toml` in the install directory is
    /// used when present, and built-in defaults when it is not. `install_dir` is only
    /// called in the second case.
    pub fn discover<F>(explicit: Option<&Path>, install_dir: F) -> Result<(Self, ConfigSource)>
    where
        F: FnOnce() -> Result<PathBuf, DispatchError>,
    {
        let source = match explicit {
            Some(path) => ConfigSource::Explicit(path.to_path_buf()),
            None => {
                let candidate = install_dir()?.join(DEFAULT_CONFIG_FILE_NAME);
                if candidate.is_file() {
                    ConfigSource::InstallDir(candidate)
                } else {
                    ConfigSource::Defaults
                }
            }
        };

        let config = match &source {
            ConfigSource::Explicit(path) | ConfigSource::InstallDir(path) => Self::load(path)?,
            ConfigSource::Defaults => Self::default(),
        };
        tracing::debug!("Using {source}");

        Ok((config, source))
    }
}
