//! ovpn-ccd CLI
//!
//! Create, list, delete and check OpenVPN CCD records.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ovpn_ccd::config::DEFAULT_CONFIG_PATH;
use ovpn_ccd::{CcdStore, Config, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status of `check --strict` when conflicts exist
const EXIT_CONFLICTS: u8 = 2;

/// OpenVPN CCD manager
#[derive(Parser, Debug)]
#[command(name = "ovpn-ccd")]
#[command(about = "OpenVPN CCD manager with subcommands")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create CCD for a client
    Create {
        /// OpenVPN client common name
        client_name: String,

        /// Optional fixed IP address
        fixed_ip: Option<Ipv4Addr>,
    },

    /// List all CCD and IPs
    List,

    /// Delete CCD for a client
    Delete {
        /// Client name to delete CCD
        client_name: String,
    },

    /// Check CCD for IP conflicts
    Check {
        /// Exit with status 2 when conflicts are found
        #[arg(long)]
        strict: bool,
    },
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

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = Config::load(&args.config)?;
    let store = CcdStore::open(config);

    match args.command {
        Commands::Create { client_name, fixed_ip } => {
            let address = store.create(&client_name, fixed_ip)?;
            println!("CCD created: {} -> {}", client_name, address);
        }
        Commands::List => {
            let entries = store.list()?;
            println!("{:20} {:15}", "Client Name", "IP Address");
            println!("{}", "-".repeat(36));
            for entry in entries {
                println!("{:20} {:15}", entry.client, entry.assignment.to_string());
            }
        }
        Commands::Delete { client_name } => {
            store.delete(&client_name)?;
            println!("CCD deleted: {}", client_name);
        }
        Commands::Check { strict } => {
            let conflicts = store.check()?;
            for conflict in &conflicts {
                println!("Conflict: {}", conflict);
            }
            println!("Check completed.");
            if strict && !conflicts.is_empty() {
                return Ok(ExitCode::from(EXIT_CONFLICTS));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
