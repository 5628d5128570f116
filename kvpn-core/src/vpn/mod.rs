//! VPN connection module
//!
//! Connectivity status state machine, the engine and notifier
//! collaborators, and the controller that owns the live state.

pub mod controller;
pub mod engine;
pub mod notify;
pub mod status;

// Public re-exports
pub use controller::{Action, Rejection, Snapshot, VpnController};
pub use engine::VpnEngine;
pub use notify::{LogNotifier, Notifier};
pub use status::{ConnectivityStatus, StatusEvent};
