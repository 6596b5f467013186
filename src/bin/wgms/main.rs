mod decode;
mod info;
mod ingest;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wgms::archive::Archive;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode datalogger payloads from a feed export into per-vehicle logs.
    ///
    /// The feed is the CSV export of the vehicle message feed. The first line is a
    /// header. Column 2 holds the vehicle name, column 4 the payload label, and
    /// column 7 the hex encoded payload. Only rows with a matching label are decoded.
    ///
    /// For every vehicle and packet type a text log <vehicle>_<TAG>.log and a JSON
    /// export <vehicle>_<TAG>.json are written to the output directory, merging with
    /// any log already there.
    Ingest {
        /// Directory to write logs to. It must already exist.
        #[arg(short, long, value_name = "dir")]
        output_dir: PathBuf,

        /// Only decode rows for these vehicles. May be given more than once. If not
        /// given all vehicles are decoded.
        #[arg(short, long, value_name = "name")]
        vehicle: Vec<String>,

        /// Payload label of datalogger rows.
        #[arg(short, long, default_value = "SCRIPPS")]
        label: String,

        /// Do not write the JSON exports.
        #[arg(long, action)]
        no_json: bool,

        /// Feed CSV export.
        input: PathBuf,
    },
    /// Decode a single hex encoded payload and print its records as JSON.
    Decode {
        /// Hex encoded raw payload.
        hex: String,
    },
    /// Show information about a text log.
    ///
    /// The packet type and vehicle are taken from the file name, which must be of the
    /// form <vehicle>_<TAG>.log.
    Info {
        /// Input log file
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: info::Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("WGMS_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Ingest {
            output_dir,
            vehicle,
            label,
            no_json,
            input,
        } => {
            if !output_dir.is_dir() {
                bail!("{output_dir:?} is not a directory");
            }
            let archive = Archive::builder()
                .dir(output_dir.clone())
                .json(!no_json)
                .build();
            ingest::ingest(input, &archive, vehicle, label)
        }
        Commands::Decode { hex } => decode::decode(hex),
        Commands::Info { input, format } => info::info(input, format),
    }
}
