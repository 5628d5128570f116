//! kvpn - server selection tooling for the kvpn client
//!
//! Manages the local store of known VPN servers and reports whether a
//! stored server can be connected to.

use clap::{Parser, Subcommand};
use kvpn_core::{error::KvpnError, init_logging};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "kvpn")]
#[command(about = "Manage known VPN servers and check connection readiness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local server store
    Servers {
        #[command(subcommand)]
        action: ServerCommands,
    },
    /// Show whether a stored server can be connected to
    Check {
        /// Store id of the server
        id: u32,
    },
}

#[derive(Subcommand)]
enum ServerCommands {
    /// List servers, best score first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Include expired servers
        #[arg(long)]
        all: bool,
    },
    /// Add servers from a TOML file of [[servers]] tables
    Import { file: PathBuf },
    /// Remove expired servers
    Prune,
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Servers { action } => match action {
            ServerCommands::List { json, all } => cli::servers::run_list(json, all),
            ServerCommands::Import { file } => cli::servers::run_import(&file),
            ServerCommands::Prune => cli::servers::run_prune(),
        },
        Commands::Check { id } => cli::check::run_check(id),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let exit_code = match e.downcast_ref::<KvpnError>() {
                // Configuration and store problems (exit code 2)
                Some(KvpnError::Config(_))
                | Some(KvpnError::Store(_))
                | Some(KvpnError::Toml(_))
                | Some(KvpnError::TomlSerialize(_)) => 2,
                // Runtime failures (exit code 1)
                Some(KvpnError::Engine(_)) | Some(KvpnError::Io(_)) | None => 1,
            };

            eprintln!("{:#}", e);
            std::process::exit(exit_code);
        }
    }
}
