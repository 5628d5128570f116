//! Status change notifications
//!
//! Passed into the controller at construction instead of being initialised
//! as process-wide state.

use crate::server::record::VpnConfiguration;
use crate::vpn::status::ConnectivityStatus;
use tracing::info;

/// Receives every status change the controller publishes
pub trait Notifier {
    fn status_changed(
        &self,
        from: ConnectivityStatus,
        to: ConnectivityStatus,
        server: &VpnConfiguration,
    );
}

/// Notifier that writes status changes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn status_changed(
        &self,
        from: ConnectivityStatus,
        to: ConnectivityStatus,
        server: &VpnConfiguration,
    ) {
        match to {
            ConnectivityStatus::Connected => {
                info!("Connected to {} ({})", server.country, server.ip)
            }
            ConnectivityStatus::Connecting => {
                info!("Connecting to {} ({})", server.country, server.ip)
            }
            ConnectivityStatus::None => info!("VPN {} -> {}", from, to),
        }
    }
}
