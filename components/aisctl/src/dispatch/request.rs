/// Default TLS domain name expected from the AI Streams service.
pub const DEFAULT_SSL_DOMAIN_NAME: &str = "aistreams.io";

/// The parsed command line. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub verb: Verb,
    pub target_address: String,
    pub tls: TlsOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsOptions {
    pub use_google_managed_service: bool,
    pub use_insecure_channel: bool,
    pub ssl_root_cert_path: Option<String>,
    pub ssl_domain_name: String,
}

impl Default for TlsOptions {
    fn default() -> Self {
        Self {
            use_google_managed_service: false,
            use_insecure_channel: false,
            ssl_root_cert_path: None,
            ssl_domain_name: DEFAULT_SSL_DOMAIN_NAME.to_string(),
        }
    }
}

/// What the user asked for, with the fields only that verb carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Create {
        stream_name: String,
    },
    Delete {
        stream_name: String,
    },
    ListStreams,
    Ingest {
        stream_name: String,
        source_uri: String,
        loop_playback: bool,
    },
    Playback {
        stream_name: String,
    },
}

impl Verb {
    /// Name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Verb::Create { .. } => "create",
            Verb::Delete { .. } => "delete",
            Verb::ListStreams => "list_streams",
            Verb::Ingest { .. } => "ingest",
            Verb::Playback { .. } => "playback",
        }
    }

    pub fn stream_name(&self) -> Option<&str> {
        match self {
            Verb::Create { stream_name }
            | Verb::Delete { stream_name }
            | Verb::Ingest { stream_name, .. }
            | Verb::Playback { stream_name } => Some(stream_name),
            Verb::ListStreams => None,
        }
    }
}
