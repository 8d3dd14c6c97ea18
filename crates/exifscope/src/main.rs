//! exifscope CLI - inspect the metadata an image carries.
//!
//! Reads an image, interprets its EXIF block (camera, lens, GPS, timestamps),
//! resolves an address for GPS-tagged photos, hashes the file and checks the
//! pixels for hidden text.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a photo
//! exifscope analyze photo.jpg
//!
//! # Print the JSON document and also export it
//! exifscope analyze photo.jpg --format json -o metadata.json
//!
//! # View configuration
//! exifscope config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// exifscope - image metadata inspection.
#[derive(Parser, Debug)]
#[command(name = "exifscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image and print its metadata record
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match exifscope_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `exifscope config path`."
            );
            exifscope_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("exifscope v{}", exifscope_core::VERSION);

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
