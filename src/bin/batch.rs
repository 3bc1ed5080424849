//! ovpn-ccd batch driver
//!
//! Creates CCD records for `client<start>` through `client<end>`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ovpn_ccd::batch::create_range;
use ovpn_ccd::config::DEFAULT_CONFIG_PATH;
use ovpn_ccd::{CcdStore, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Batch generate OpenVPN CCD files
#[derive(Parser, Debug)]
#[command(name = "ovpn-ccd-batch")]
#[command(about = "Batch generate OpenVPN CCD files")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Starting client number
    #[arg(long, default_value = "31")]
    start: u32,

    /// Ending client number
    #[arg(long, default_value = "254")]
    end: u32,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ovpn_ccd=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = CcdStore::open(config);

    let report = match create_range(&store, args.start, args.end) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Batch aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for (client, address) in &report.created {
        println!("CCD created: {} -> {}", client, address);
    }
    for (client, e) in &report.failed {
        println!("Failed to create {}: {}", client, e);
    }
    println!(
        "{} created, {} failed",
        report.created.len(),
        report.failed.len()
    );

    ExitCode::SUCCESS
}
