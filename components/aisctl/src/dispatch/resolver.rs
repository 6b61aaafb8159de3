//! Locates the native apps next to the aisctl executable.

use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{dispatch::error::DispatchError, helpers::load_config::AppsConfig};

/// The external executables aisctl can hand over to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetApp {
    Manager,
    Ingester,
    Playback,
}

impl TargetApp {
    /// File name the app ships under.
    pub fn default_file_name(self) -> &'static str {
        match self {
            TargetApp::Manager => "manager_app",
            TargetApp::Ingester => "ingester_app",
            TargetApp::Playback => "playback_app",
        }
    }
}

impl fmt::Display for TargetApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_file_name())
    }
}

/// Directory holding the running aisctl binary.
pub fn install_dir() -> Result<PathBuf, DispatchError> {
    let exe = env::current_exe().map_err(DispatchError::InstallDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        DispatchError::InstallDir(io::Error::other(format!(
            "{} has no parent directory",
            exe.display()
        )))
    })
}

#[derive(Debug, Clone)]
pub struct AppLocator {
    app_dir: PathBuf,
    manager_app: String,
    ingester_app: String,
    playback_app: String,
}

impl AppLocator {
    /// Build a locator rooted at the configured app directory.
    ///
    /// `install_dir` is only consulted when the configuration leaves `app_dir` unset.
    pub fn new<F>(config: &AppsConfig, install_dir: F) -> Result<Self, DispatchError>
    where
        F: FnOnce() -> Result<PathBuf, DispatchError>,
    {
        let app_dir = match &config.app_dir {
            Some(dir) => dir.clone(),
            None => install_dir()?,
        };
        Ok(Self {
            app_dir,
            manager_app: config.manager_app.clone(),
            ingester_app: config.ingester_app.clone(),
            playback_app: config.playback_app.clone(),
        })
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn path_for(&self, app: TargetApp) -> PathBuf {
        let name = match app {
            TargetApp::Manager => &self.manager_app,
            TargetApp::Ingester => &self.ingester_app,
            TargetApp::Playback => &self.playback_app,
        };
        self.app_dir.join(name)
    }

    /// Resolve `app` to an existing executable file.
    #[instrument(
        name = "aisctl_resolver::locate",
        target = "dispatch::resolver",
        level = "trace",
        skip(self)
    )]
    pub fn locate(&self, app: TargetApp) -> Result<PathBuf, DispatchError> {
        let path = self.path_for(app);
        tracing::trace!(path = %path.display(), "Resolving app executable");

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "App executable missing");
                return Err(DispatchError::ExecutableNotFound { app, path });
            }
            Err(source) => {
                tracing::debug!(error = %source, path = %path.display(), "App executable unreadable");
                return Err(DispatchError::Inaccessible { app, path, source });
            }
        };

        if !metadata.is_file() || !is_executable(&metadata) {
            return Err(DispatchError::NotExecutable { app, path });
        }

        Ok(path)
    }
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}
