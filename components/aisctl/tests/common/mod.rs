//! Common test utilities for aisctl tests
//!
//! Builds a throwaway install directory holding fake native apps. Each fake app is a
//! shell script that prints its name, one `arg=` line per argument, and the
//! environment aisctl is expected to inject.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANAGER_APP: &str = "manager_app";
pub const INGESTER_APP: &str = "ingester_app";
pub const PLAYBACK_APP: &str = "playback_app";

const FAKE_APP: &str = r#"#!/bin/sh
echo "app=$(basename "$0")"
for arg in "$@"; do
  printf 'arg=%s\n' "$arg"
done
echo "GST_PLUGIN_PATH=$GST_PLUGIN_PATH"
echo "GLOG_alsologtostderr=$GLOG_alsologtostderr"
"#;

pub struct FakeInstall {
    dir: TempDir,
}

impl FakeInstall {
    /// An install directory containing all three apps.
    pub fn new() -> Self {
        let install = Self::empty();
        for app in [MANAGER_APP, INGESTER_APP, PLAYBACK_APP] {
            install.add_app(app);
        }
        install
    }

    /// An install directory with a config file but no apps.
    pub fn empty() -> Self {
        let install = Self {
            dir: TempDir::new().unwrap(),
        };
        install.write_config("");
        install
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("aisctl.toml")
    }

    pub fn add_app(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, FAKE_APP).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Point aisctl at this directory, followed by `extra` TOML.
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            "[apps]\napp_dir = '{}'\n{extra}",
            self.dir.path().display()
        );
        fs::write(self.config_path(), config).unwrap();
    }

    /// aisctl wired to this install directory.
    pub fn aisctl(&self) -> Command {
        let mut cmd = Command::cargo_bin("aisctl").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}
