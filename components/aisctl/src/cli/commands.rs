use crate::{
    dispatch::{
        launcher::{self, LaunchPlan},
        request::{DEFAULT_SSL_DOMAIN_NAME, InvocationRequest, TlsOptions, Verb},
        resolver::{self, AppLocator, TargetApp},
    },
    helpers::load_config::Config,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "aisctl",
    about = "AI Streams CLI.",
    long_about = "AI Streams CLI. Manages streams and feeds media into them by handing over to \
                  the manager, ingester and playback apps installed next to aisctl.",
    version,
    term_width = 100,
    after_help = "\
    EXAMPLES:
        aisctl -t 127.0.0.1:50051 create -s my-stream
        aisctl -t 127.0.0.1:50051 list_streams
        aisctl -t 127.0.0.1:50051 ingest -s my-stream -u rtsp://camera/1 -l"
)]
pub struct Cli {
    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Address (ip:port) to the service endpoint.
    #[arg(short, long, value_name = "IP:PORT")]
    pub target_address: String,

    /// Use the Google managed service.
    #[arg(long)]
    pub use_google_managed_service: bool,

    /// Use an insecure connection.
    #[arg(long)]
    pub use_insecure_channel: bool,

    /// The expected ssl domain name of the server.
    #[arg(long, default_value = DEFAULT_SSL_DOMAIN_NAME)]
    pub ssl_domain_name: String,

    /// The path to the SSL root certificate.
    #[arg(long)]
    pub ssl_root_cert_path: Option<String>,

    /// Configuration file; defaults to aisctl.toml next to the executable, if present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved command and environment instead of running it.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a stream on the server.
    Create {
        /// The name of the stream to create.
        #[arg(short, long)]
        stream_name: String,
    },

    /// Delete a stream on the server.
    Delete {
        /// The name of the stream to delete.
        #[arg(short, long)]
        stream_name: String,
    },

    /// List all created streams.
    #[command(name = "list_streams")]
    ListStreams,

    /// Send jpeg packets to a stream.
    Ingest {
        /// The name of the stream to ingest packets to.
        #[arg(short, long)]
        stream_name: String,

        /// The input source's uri; e.g. something.mp4, rtsp://some.thing
        #[arg(short = 'u', long)]
        source_uri: String,

        /// Replay the source if it ends.
        #[arg(short, long)]
        loop_playback: bool,
    },

    /// Play a stream through a local video sink.
    Playback {
        /// The name of the stream to play from.
        #[arg(short, long)]
        stream_name: String,
    },
}

impl From<Commands> for Verb {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Create { stream_name } => Verb::Create { stream_name },
            Commands::Delete { stream_name } => Verb::Delete { stream_name },
            Commands::ListStreams => Verb::ListStreams,
            Commands::Ingest {
                stream_name,
                source_uri,
                loop_playback,
            } => Verb::Ingest {
                stream_name,
                source_uri,
                loop_playback,
            },
            Commands::Playback { stream_name } => Verb::Playback { stream_name },
        }
    }
}

impl Cli {
    /// Split the command line into the request and the flags that only steer aisctl.
    fn into_parts(self) -> (InvocationRequest, RunOptions) {
        let request = InvocationRequest {
            verb: self.command.into(),
            target_address: self.target_address,
            tls: TlsOptions {
                use_google_managed_service: self.use_google_managed_service,
                use_insecure_channel: self.use_insecure_channel,
                ssl_root_cert_path: self.ssl_root_cert_path,
                ssl_domain_name: self.ssl_domain_name,
            },
        };
        let options = RunOptions {
            config: self.config,
            dry_run: self.dry_run,
        };
        (request, options)
    }
}

#[derive(Debug)]
struct RunOptions {
    config: Option<PathBuf>,
    dry_run: bool,
}

/// Entry function for CLI
pub fn run(cli: Cli) -> Result<()> {
    let (request, options) = cli.into_parts();
    debug!(
        verb = request.verb.name(),
        target_address = %request.target_address,
        stream_name = request.verb.stream_name().unwrap_or(""),
        "Parsed invocation"
    );

    // The install directory is looked up only when neither --config nor [apps] app_dir
    // make it unnecessary.
    let (cfg, _source) = Config::discover(options.config.as_deref(), resolver::install_dir)?;
    let locator = AppLocator::new(&cfg.apps, resolver::install_dir)?;
    let plan = LaunchPlan::prepare(&request, &locator, &cfg.environment)?;

    if plan.app != TargetApp::Playback
        && request.tls.ssl_domain_name != DEFAULT_SSL_DOMAIN_NAME
    {
        debug!(
            ssl_domain_name = %request.tls.ssl_domain_name,
            "{} does not take an ssl domain name; ignoring it", plan.app
        );
    }

    if options.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    Err(launcher::launch(&plan).into())
}

//
// ------------------------ Command Implementations ------------------------------
//

/// Show what would be executed
fn print_plan(plan: &LaunchPlan) {
    for (name, value) in &plan.env {
        println!("{}={}", name.to_string_lossy(), Path::new(value).display());
    }
    println!("{plan}");
}
