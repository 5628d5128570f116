//! Connection readiness for a stored server

use super::{now, open_store};
use colored::Colorize;
use kvpn_core::error::KvpnError;
use kvpn_core::server::RecordStore;
use kvpn_core::view::MainView;
use kvpn_core::vpn::{ConnectivityStatus, Snapshot};

/// Report usability, expiry, and whether a fresh session could connect
pub fn run_check(id: u32) -> anyhow::Result<()> {
    let (_, store) = open_store()?;

    let Some(record) = store.get(id).map_err(KvpnError::from)? else {
        anyhow::bail!("No server with id {} in {}", id, store.path().display());
    };

    let expired = record.is_expired(now());
    let view = MainView::from_snapshot(&Snapshot {
        status: ConnectivityStatus::None,
        selection: record,
        public_ip: None,
    });

    println!("Server:  {} ({})", view.country, view.ip);
    println!("Usable:  {}", yes_no(view.primary_enabled));
    println!("Expired: {}", if expired { "yes".red() } else { "no".green() });

    if view.primary_enabled {
        println!("{} {} is available", "✓".green(), view.primary_label);
    } else {
        println!(
            "{} {} is unavailable: missing country, flag, ip or config",
            "✗".red(),
            view.primary_label
        );
    }
    Ok(())
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}
