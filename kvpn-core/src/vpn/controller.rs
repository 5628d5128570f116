//! VPN controller
//!
//! Owns the current connectivity status and server selection, applies user
//! actions against the status predicates, and forwards accepted actions to
//! the engine. Collaborators are injected at construction.

use crate::error::KvpnError;
use crate::server::listing::ListingPolicy;
use crate::server::record::VpnConfiguration;
use crate::server::store::RecordStore;
use crate::vpn::engine::VpnEngine;
use crate::vpn::notify::Notifier;
use crate::vpn::status::{ConnectivityStatus, StatusEvent};
use tokio::sync::watch;
use tracing::{info, warn};

/// Immutable view of the controller state at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: ConnectivityStatus,
    pub selection: VpnConfiguration,
    /// Last public IP observed outside the tunnel, if any
    pub public_ip: Option<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            status: ConnectivityStatus::None,
            selection: VpnConfiguration::empty(),
            public_ip: None,
        }
    }
}

/// Why a user action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The selected record is missing fields needed to connect
    NotUsable,
    /// A connection attempt is already in progress
    AlreadyConnecting,
    /// The server cannot change while connecting or connected
    ServerLocked,
    /// There is no attempt in progress to stop
    NothingToStop,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotUsable => write!(f, "selected server is not usable"),
            Rejection::AlreadyConnecting => write!(f, "a connection attempt is in progress"),
            Rejection::ServerLocked => write!(f, "disconnect before changing server"),
            Rejection::NothingToStop => write!(f, "no connection attempt to stop"),
        }
    }
}

/// Outcome of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Disconnect,
    Stop,
    Selected,
    Rejected(Rejection),
}

/// Serializes all updates to the connection state
pub struct VpnController<E, S, N> {
    engine: E,
    store: S,
    notifier: N,
    state: watch::Sender<Snapshot>,
}

impl<E, S, N> VpnController<E, S, N>
where
    E: VpnEngine,
    S: RecordStore,
    N: Notifier,
{
    pub fn new(engine: E, store: S, notifier: N) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            engine,
            store,
            notifier,
            state,
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn status(&self) -> ConnectivityStatus {
        self.state.borrow().status
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored servers, filtered and ranked by `policy`
    pub fn servers(
        &self,
        policy: &ListingPolicy,
        now: i64,
    ) -> Result<Vec<VpnConfiguration>, KvpnError> {
        Ok(self.store.listing(policy, now)?)
    }

    /// Persist records from a remote listing, returning them with their ids
    pub fn import(
        &mut self,
        records: impl IntoIterator<Item = VpnConfiguration>,
    ) -> Result<Vec<VpnConfiguration>, KvpnError> {
        Ok(self.store.insert_all(records)?)
    }

    /// Drop expired records from the store
    pub fn prune(&mut self, now: i64) -> Result<usize, KvpnError> {
        Ok(self.store.delete_expired(now)?)
    }

    /// Make `record` the current selection
    pub fn select_server(&mut self, record: VpnConfiguration) -> Action {
        if !self.status().can_change_server() {
            return self.reject(Rejection::ServerLocked);
        }

        info!("Selected server {} ({})", record.country, record.ip);
        self.state.send_modify(|s| s.selection = record);
        Action::Selected
    }

    /// Connect, or disconnect when already connected
    pub fn primary_action(&mut self) -> Result<Action, KvpnError> {
        let snapshot = self.snapshot();

        if snapshot.status.primary_action_is_disconnect() {
            self.engine.disconnect()?;
            self.transition(StatusEvent::Disconnected);
            return Ok(Action::Disconnect);
        }

        if !snapshot.status.can_connect(&snapshot.selection) {
            let reason = match snapshot.status {
                ConnectivityStatus::Connecting => Rejection::AlreadyConnecting,
                ConnectivityStatus::None | ConnectivityStatus::Connected => Rejection::NotUsable,
            };
            return Ok(self.reject(reason));
        }

        self.engine.connect(&snapshot.selection)?;
        self.transition(StatusEvent::ConnectRequested);
        Ok(Action::Connect)
    }

    /// Cancel an attempt in progress
    pub fn stop(&mut self) -> Result<Action, KvpnError> {
        if !self.status().show_stop_action() {
            return Ok(self.reject(Rejection::NothingToStop));
        }

        self.engine.stop()?;
        self.transition(StatusEvent::Stopped);
        Ok(Action::Stop)
    }

    /// Record a transition reported by the engine
    pub fn on_engine_event(&mut self, event: StatusEvent) -> ConnectivityStatus {
        self.transition(event)
    }

    pub fn set_public_ip(&mut self, ip: Option<String>) {
        self.state.send_if_modified(|s| {
            if s.public_ip == ip {
                return false;
            }
            s.public_ip = ip;
            true
        });
    }

    fn transition(&mut self, event: StatusEvent) -> ConnectivityStatus {
        let from = self.status();
        let to = from.apply(event);
        if to == from {
            return from;
        }

        self.state.send_modify(|s| s.status = to);
        self.notifier.status_changed(from, to, &self.state.borrow().selection);
        to
    }

    fn reject(&self, reason: Rejection) -> Action {
        warn!("Rejected action while {}: {}", self.status(), reason);
        Action::Rejected(reason)
    }
}
