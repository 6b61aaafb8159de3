use std::{io, path::PathBuf};

use crate::dispatch::resolver::TargetApp;

/// Dispatch error handling
/// - Everything that can go wrong between a valid command line and the exec call.
///   Nothing can fail after a successful exec, since this process no longer exists.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("could not determine the aisctl install directory: {0}")]
    InstallDir(#[source] io::Error),
    #[error("{app} executable not found at {}", path.display())]
    ExecutableNotFound { app: TargetApp, path: PathBuf },
    #[error("cannot access {app} at {}: {source}", path.display())]
    Inaccessible {
        app: TargetApp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{app} at {} is not an executable file", path.display())]
    NotExecutable { app: TargetApp, path: PathBuf },
    #[error("failed to launch {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
