//! mirror-failover CLI.
//!
//! Loads a content-addressed blob, falling back to mirror servers when the
//! original host fails.
//!
//! ```text
//! mirror-failover id <url>
//! mirror-failover fetch <url> [--hint <hint>] [--mirror <url>]...
//!                       [--endpoint <template>] [-o <file>]
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use url::Url;

use mirror_failover::config::{load_config, validate_config, FailoverConfig};
use mirror_failover::fetch::BlobFetcher;
use mirror_failover::mirrors::provider_from_config;
use mirror_failover::observability::logging::init_logging;
use mirror_failover::{FailoverController, IdentifierExtractor, Resource};

#[derive(Parser)]
#[command(name = "mirror-failover")]
#[command(about = "Resolve content-addressed blobs across mirror servers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the content identifier found in a URL
    Id { url: Url },
    /// Fetch a blob, falling back to mirrors on failure
    Fetch {
        url: Url,

        /// Identity hint passed to the mirror list provider (e.g. owner pubkey)
        #[arg(long)]
        hint: Option<String>,

        /// Mirror server, highest priority first (replaces configured servers)
        #[arg(short, long = "mirror")]
        mirrors: Vec<String>,

        /// Mirror list endpoint template, `{hint}` is substituted
        #[arg(long)]
        endpoint: Option<String>,

        /// Write the blob here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FailoverConfig::default(),
    };

    if let Commands::Fetch { mirrors, endpoint, .. } = &cli.command {
        if !mirrors.is_empty() {
            config.mirrors.servers = mirrors.clone();
        }
        if endpoint.is_some() {
            config.mirrors.endpoint = endpoint.clone();
        }
    }
    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            eprintln!("Invalid configuration: {}", e);
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    init_logging(&config.observability);

    let extractor = IdentifierExtractor::new(&config.identifier.pattern)?;

    match cli.command {
        Commands::Id { url } => match extractor.extract(&url) {
            Some(id) => println!("{}", id),
            None => return Err(format!("no content identifier in {}", url).into()),
        },
        Commands::Fetch { url, hint, output, .. } => {
            let provider = provider_from_config(&config.mirrors)?;
            let fetcher = BlobFetcher::new(&config.fetch)?;
            let resource = Arc::new(Resource::new(url));

            let controller = FailoverController::new(extractor);
            if controller.attach(&resource, provider, hint.as_deref()).is_none() {
                tracing::info!(
                    url = %resource.source(),
                    "Source is not content-addressed, loading without failover"
                );
            }

            let blob = fetcher.fetch(&resource).await?;
            tracing::info!(url = %blob.url, attempts = blob.attempts, "Fetch complete");

            match output {
                Some(path) => tokio::fs::write(&path, &blob.body).await?,
                None => std::io::stdout().write_all(&blob.body)?,
            }
        }
    }

    Ok(())
}
