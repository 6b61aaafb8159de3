//! Environment handed to the native apps.
//!
//! The apps load GStreamer plugins from `GST_PLUGIN_PATH` and log through glog, which
//! only mirrors to stderr when `GLOG_alsologtostderr` is set.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::helpers::load_config::EnvironmentConfig;

pub const GST_PLUGIN_PATH: &str = "GST_PLUGIN_PATH";
pub const GLOG_ALSOLOGTOSTDERR: &str = "GLOG_alsologtostderr";

/// Plugin directory used when the configuration names none.
pub const DEFAULT_PLUGIN_DIR_NAME: &str = "gst-plugins";

pub fn plugin_path(config: &EnvironmentConfig, app_dir: &Path) -> PathBuf {
    config
        .gst_plugin_path
        .clone()
        .unwrap_or_else(|| app_dir.join(DEFAULT_PLUGIN_DIR_NAME))
}

/// Variables to set on the app, in the order they are applied.
///
/// Values stay OS strings: the plugin path is handed over byte for byte, even when the
/// install directory is not valid UTF-8.
pub fn child_environment(
    config: &EnvironmentConfig,
    app_dir: &Path,
) -> Vec<(OsString, OsString)> {
    let gst_plugin_path = plugin_path(config, app_dir);
    tracing::debug!("Setting {GST_PLUGIN_PATH} to \"{}\"", gst_plugin_path.display());

    let mut vars = vec![(OsString::from(GST_PLUGIN_PATH), gst_plugin_path.into_os_string())];
    if config.glog_alsologtostderr {
        vars.push((OsString::from(GLOG_ALSOLOGTOSTDERR), OsString::from("1")));
    }
    vars
}
