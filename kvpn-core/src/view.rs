//! Main screen state
//!
//! Derives what the main screen shows and which actions it enables from a
//! controller [`Snapshot`]. No layout lives here.

use crate::vpn::controller::Snapshot;
use crate::vpn::status::ConnectivityStatus;

/// Public IP line under the status indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicIpLabel {
    Visible(String),
    Unknown,
    /// Connected; the address outside the tunnel is not shown
    Hidden,
}

impl std::fmt::Display for PublicIpLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicIpLabel::Visible(ip) => write!(f, "Public IP: {}", ip),
            PublicIpLabel::Unknown => write!(f, "Public IP: unknown"),
            PublicIpLabel::Hidden => write!(f, "Hidden"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryLabel {
    Connect,
    Disconnect,
}

impl std::fmt::Display for PrimaryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimaryLabel::Connect => write!(f, "Connect"),
            PrimaryLabel::Disconnect => write!(f, "Disconnect"),
        }
    }
}

/// Everything the main screen needs, computed from one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainView {
    pub status: ConnectivityStatus,
    pub public_ip_label: PublicIpLabel,
    pub country: String,
    pub ip: String,
    /// Flag image URL when one should be shown
    pub flag_url: Option<String>,
    pub change_server_enabled: bool,
    pub primary_label: PrimaryLabel,
    pub primary_enabled: bool,
    pub show_stop: bool,
}

impl MainView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let status = snapshot.status;
        let selection = &snapshot.selection;

        let public_ip_label = match (status, &snapshot.public_ip) {
            (ConnectivityStatus::Connected, _) => PublicIpLabel::Hidden,
            (_, Some(ip)) => PublicIpLabel::Visible(ip.clone()),
            (_, None) => PublicIpLabel::Unknown,
        };

        let primary_label = if status.primary_action_is_disconnect() {
            PrimaryLabel::Disconnect
        } else {
            PrimaryLabel::Connect
        };

        Self {
            status,
            public_ip_label,
            country: selection.country.clone(),
            ip: selection.ip.clone(),
            flag_url: selection
                .has_flag()
                .then(|| selection.country_flag_url.clone()),
            change_server_enabled: status.can_change_server(),
            primary_label,
            primary_enabled: status.can_connect(selection),
            show_stop: status.show_stop_action(),
        }
    }
}

impl From<&Snapshot> for MainView {
    fn from(snapshot: &Snapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
