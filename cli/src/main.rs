//! Pingdom Exporter CLI
//!
//! Entry point that polls the Pingdom API and serves check state as
//! Prometheus gauges.
//!
//! # Usage
//!
//! ```bash
//! pingdom-exporter --help
//! pingdom-exporter server --api-token "$TOKEN" --wait 30 --detailed-tags detailed,eu
//! pingdom-exporter version
//! ```

#![deny(unsafe_code)]

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use exporter::{Config, DEFAULT_BASE_URL};
use shared::config::SyncConfig;

/// Pingdom exporter - Prometheus metrics for Pingdom checks
#[derive(Parser)]
#[command(name = "pingdom-exporter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the exporter server
    Server(ServerArgs),
    /// Print version information
    Version,
}

#[derive(clap::Args, Debug)]
struct ServerArgs {
    /// Seconds between two Pingdom API polls
    #[arg(short, long, env = "PINGDOM_EXPORTER_WAIT", default_value_t = 10)]
    wait: u64,

    /// Port to listen on
    #[arg(short, long, env = "PINGDOM_EXPORTER_PORT", default_value_t = 8000)]
    port: u16,

    /// Address to bind to
    #[arg(long, env = "PINGDOM_EXPORTER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Pingdom API token
    #[arg(short = 't', long, env = "PINGDOM_EXPORTER_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Pingdom API base URL
    #[arg(long, env = "PINGDOM_EXPORTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Pingdom request timeout in seconds
    #[arg(long, env = "PINGDOM_EXPORTER_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Comma separated tags of checks to enrich with probe location
    #[arg(long, env = "PINGDOM_EXPORTER_DETAILED_TAGS", default_value = "")]
    detailed_tags: String,

    /// Log output format
    #[arg(long, env = "PINGDOM_EXPORTER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl ServerArgs {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.api_token);
        config.host = self.host;
        config.port = self.port;
        config.pingdom.base_url = self.base_url;
        config.pingdom.timeout_secs = self.timeout;
        config.sync = SyncConfig::new(self.wait).with_detailed_tags(&self.detailed_tags);
        config
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

fn version_string() -> String {
    format!(
        "pingdom-exporter {} (commit: {}, {}/{})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_COMMIT").unwrap_or("unknown"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            init_tracing(args.log_format);
            exporter::run_server_with_config(args.into_config()).await
        }
        Commands::Version => {
            println!("{}", version_string());
            Ok(())
        }
    }
}
