//! Translation of an [`InvocationRequest`] into the flag vector the native apps parse.
//!
//! The apps use gflags-style parsers, so every flag is one `--name=value` token and
//! booleans are the literal words `true` and `false`. Flag names and ordering are
//! part of the contract with those binaries.

use std::fmt::Display;

use crate::dispatch::{
    request::{InvocationRequest, TlsOptions, Verb},
    resolver::TargetApp,
};

/// Rendered in place of a missing root certificate path for the manager app.
/// Existing manager deployments receive this literal today.
const UNSET_CERT_PATH: &str = "None";

/// Lifecycle action selector understood by the manager app (`--op_id`).
///
/// List sits between create and delete; the numbering is fixed by the manager app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerOp {
    Create,
    List,
    Delete,
}

impl ManagerOp {
    pub fn op_id(self) -> u8 {
        match self {
            ManagerOp::Create => 0,
            ManagerOp::List => 1,
            ManagerOp::Delete => 2,
        }
    }
}

pub fn render_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn flag(name: &str, value: impl Display) -> String {
    format!("--{name}={value}")
}

/// Pick the target app for the request and build its argument vector.
pub fn translate(request: &InvocationRequest) -> (TargetApp, Vec<String>) {
    match &request.verb {
        Verb::Create { stream_name } => (
            TargetApp::Manager,
            manager_flags(ManagerOp::Create, Some(stream_name), request),
        ),
        Verb::ListStreams => (
            TargetApp::Manager,
            manager_flags(ManagerOp::List, None, request),
        ),
        Verb::Delete { stream_name } => (
            TargetApp::Manager,
            manager_flags(ManagerOp::Delete, Some(stream_name), request),
        ),
        Verb::Ingest {
            stream_name,
            source_uri,
            loop_playback,
        } => (
            TargetApp::Ingester,
            ingester_flags(
                &request.target_address,
                stream_name,
                source_uri,
                *loop_playback,
            ),
        ),
        Verb::Playback { stream_name } => (
            TargetApp::Playback,
            playback_flags(&request.target_address, stream_name, &request.tls),
        ),
    }
}

pub fn manager_flags(
    op: ManagerOp,
    stream_name: Option<&str>,
    request: &InvocationRequest,
) -> Vec<String> {
    let tls = &request.tls;
    let mut flags = vec![
        flag("op_id", op.op_id()),
        flag(
            "ssl_root_cert_path",
            tls.ssl_root_cert_path.as_deref().unwrap_or(UNSET_CERT_PATH),
        ),
    ];
    if let Some(name) = stream_name {
        flags.push(flag("stream_name", name));
    }
    flags.extend([
        flag("target_address", &request.target_address),
        flag(
            "use_google_managed_service",
            render_bool(tls.use_google_managed_service),
        ),
        flag("use_insecure_channel", render_bool(tls.use_insecure_channel)),
    ]);
    flags
}

pub fn ingester_flags(
    target_address: &str,
    stream_name: &str,
    source_uri: &str,
    loop_playback: bool,
) -> Vec<String> {
    vec![
        flag("target_address", target_address),
        flag("stream_name", stream_name),
        flag("loop_playback", render_bool(loop_playback)),
        flag("source_uri", source_uri),
    ]
}

pub fn playback_flags(target_address: &str, stream_name: &str, tls: &TlsOptions) -> Vec<String> {
    let mut flags = vec![
        flag("target_address", target_address),
        flag("stream_name", stream_name),
        flag("use_insecure_channel", render_bool(tls.use_insecure_channel)),
        flag("ssl_domain_name", &tls.ssl_domain_name),
    ];
    // playback_app defaults to an empty path; leave it to that default.
    if let Some(path) = &tls.ssl_root_cert_path {
        flags.push(flag("ssl_root_cert_path", path));
    }
    flags
}
