//! Server store commands

use super::{now, open_store};
use anyhow::Context;
use colored::Colorize;
use kvpn_core::error::KvpnError;
use kvpn_core::server::{ListingPolicy, RecordStore, TomlStore, VpnConfiguration};
use std::path::Path;
use tracing::info;

/// Print the stored servers, filtered and ranked by the configured policy
pub fn run_list(json: bool, all: bool) -> anyhow::Result<()> {
    let (config, store) = open_store()?;

    let policy = ListingPolicy {
        hide_expired: config.listing.hide_expired && !all,
        ..config.listing
    };
    let servers = store.listing(&policy, now()).map_err(KvpnError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&servers)?);
        return Ok(());
    }

    if servers.is_empty() {
        println!("No servers stored in {}", store.path().display());
        return Ok(());
    }

    println!(
        "{:>4}  {:<16} {:<16} {:>6}  {:<10} {}",
        "ID", "COUNTRY", "IP", "SCORE", "SPEED", "FLAGS"
    );
    for server in &servers {
        println!("{}", format_row(server));
    }
    Ok(())
}

fn format_row(server: &VpnConfiguration) -> String {
    let mut flags = Vec::new();
    if server.premium {
        flags.push("premium".yellow().to_string());
    }
    if server.is_expired(now()) {
        flags.push("expired".red().to_string());
    }
    if !server.is_usable() {
        flags.push("incomplete".dimmed().to_string());
    }

    format!(
        "{:>4}  {:<16} {:<16} {:>6}  {:<10} {}",
        server.id,
        server.country,
        server.ip,
        server.score,
        server.speed,
        flags.join(",")
    )
}

/// Add every server from `file` to the store
pub fn run_import(file: &Path) -> anyhow::Result<()> {
    let (_, mut store) = open_store()?;

    let incoming = TomlStore::new(file)
        .list()
        .map_err(KvpnError::from)
        .with_context(|| format!("Reading servers from {}", file.display()))?;

    let stored = store.insert_all(incoming).map_err(KvpnError::from)?;
    for server in &stored {
        println!("{} {} ({}) as id {}", "✓".green(), server.country, server.ip, server.id);
    }

    info!("Imported servers from {}", file.display());
    println!("Imported {} server(s)", stored.len());
    Ok(())
}

/// Delete expired servers from the store
pub fn run_prune() -> anyhow::Result<()> {
    let (_, mut store) = open_store()?;
    let removed = store.delete_expired(now()).map_err(KvpnError::from)?;
    println!("Removed {} expired server(s)", removed);
    Ok(())
}
