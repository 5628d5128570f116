//! Connectivity status state machine
//!
//! The status is produced by the external VPN engine; this module only
//! records the transitions it reports and derives the UI predicates from the
//! current state.

use crate::server::record::VpnConfiguration;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Live state of a tunnel attempt
///
/// A disconnect after use returns to `None`; "never connected" and
/// "disconnected" are not distinguished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    /// No attempt in progress
    #[default]
    None,
    /// Attempt in progress
    Connecting,
    /// Tunnel active
    Connected,
}

/// Events that move the status between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// User asked to connect to a usable configuration
    ConnectRequested,
    /// Engine reported the tunnel is up
    EngineConnected,
    /// Engine gave up on the attempt
    EngineFailed,
    /// Attempt cancelled before it completed
    Stopped,
    /// Tunnel torn down, by the user or by the engine
    Disconnected,
}

impl ConnectivityStatus {
    /// All states, in lifecycle order
    pub const ALL: [ConnectivityStatus; 3] = [
        ConnectivityStatus::None,
        ConnectivityStatus::Connecting,
        ConnectivityStatus::Connected,
    ];

    /// Next state after `event`
    ///
    /// Events that make no sense from the current state leave it unchanged.
    pub fn apply(self, event: StatusEvent) -> ConnectivityStatus {
        use ConnectivityStatus as S;
        use StatusEvent as E;

        let next = match (self, event) {
            (S::None, E::ConnectRequested) => S::Connecting,
            (S::Connecting, E::EngineConnected) => S::Connected,
            (S::Connecting, E::EngineFailed | E::Stopped) => S::None,
            (S::Connected, E::Disconnected) => S::None,
            (state, _) => state,
        };

        if next == self {
            debug!("Ignoring {:?} while {}", event, self);
        }
        next
    }

    pub fn can_change_server(self) -> bool {
        self != ConnectivityStatus::Connected && self != ConnectivityStatus::Connecting
    }

    pub fn can_connect(self, record: &VpnConfiguration) -> bool {
        self != ConnectivityStatus::Connecting && record.is_usable()
    }

    /// Whether a "Stop" action is offered next to the primary button
    pub fn show_stop_action(self) -> bool {
        self == ConnectivityStatus::Connecting
    }

    /// Whether the primary button disconnects rather than connects
    pub fn primary_action_is_disconnect(self) -> bool {
        self == ConnectivityStatus::Connected
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityStatus::None => write!(f, "none"),
            ConnectivityStatus::Connecting => write!(f, "connecting"),
            ConnectivityStatus::Connected => write!(f, "connected"),
        }
    }
}

pub fn can_change_server(status: ConnectivityStatus) -> bool {
    status.can_change_server()
}

pub fn can_connect(status: ConnectivityStatus, record: &VpnConfiguration) -> bool {
    status.can_connect(record)
}

pub fn show_stop_action(status: ConnectivityStatus) -> bool {
    status.show_stop_action()
}

pub fn primary_action_is_disconnect(status: ConnectivityStatus) -> bool {
    status.primary_action_is_disconnect()
}
