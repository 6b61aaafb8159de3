//! Launch plan assembly and process replacement.

use std::{borrow::Cow, ffi::OsString, fmt, path::PathBuf, process::Command};

use tracing::instrument;

use crate::{
    dispatch::{
        error::DispatchError,
        flags,
        request::InvocationRequest,
        resolver::{AppLocator, TargetApp},
    },
    helpers::{environment, load_config::EnvironmentConfig},
};

/// Everything needed to hand the process over to a native app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub app: TargetApp,
    pub program: PathBuf,
    /// Arguments after argv[0].
    pub args: Vec<String>,
    pub env: Vec<(OsString, OsString)>,
}

impl LaunchPlan {
    /// Translate, resolve and seed the environment for `request`.
    ///
    /// Fails only when the target executable cannot be resolved.
    #[instrument(
        name = "aisctl_launcher::prepare",
        target = "dispatch::launcher",
        level = "trace",
        skip_all
    )]
    pub fn prepare(
        request: &InvocationRequest,
        locator: &AppLocator,
        env_config: &EnvironmentConfig,
    ) -> Result<Self, DispatchError> {
        let (app, args) = flags::translate(request);
        tracing::trace!(verb = request.verb.name(), %app, "Selected target app");

        let program = locator.locate(app)?;
        let env = environment::child_environment(env_config, locator.app_dir());

        Ok(Self {
            app,
            program,
            args,
            env,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

/// Program followed by its arguments, quoted for a POSIX shell where needed.
impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quote `word` unless every character is shell-inert.
pub fn shell_quote(word: &str) -> Cow<'_, str> {
    let inert = |c: char| c.is_ascii_alphanumeric() || "-_./=:,@+%".contains(c);
    if !word.is_empty() && word.chars().all(inert) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
}

/// Replace this process with the planned app.
///
/// Only ever returns on failure.
#[cfg(unix)]
pub fn launch(plan: &LaunchPlan) -> DispatchError {
    use std::os::unix::process::CommandExt;

    tracing::debug!("Executing command {plan}.");
    let source = plan.command().exec();
    DispatchError::Launch {
        path: plan.program.clone(),
        source,
    }
}

/// Run the planned app to completion and exit with its status.
///
/// Without `exec` the parent stays alive while the app runs; it only forwards the
/// exit code.
#[cfg(not(unix))]
pub fn launch(plan: &LaunchPlan) -> DispatchError {
    tracing::debug!("Executing command {plan}.");
    match plan.command().status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => DispatchError::Launch {
            path: plan.program.clone(),
            source,
        },
    }
}
