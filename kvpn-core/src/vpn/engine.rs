//! External VPN engine collaborator
//!
//! The engine establishes and tears down the tunnel. It reports progress
//! back through [`crate::vpn::VpnController::on_engine_event`].

use crate::error::EngineError;
use crate::server::record::VpnConfiguration;

/// Commands accepted by the engine that owns the tunnel
pub trait VpnEngine {
    /// Begin a connection attempt using `record`'s opaque config payload
    fn connect(&mut self, record: &VpnConfiguration) -> Result<(), EngineError>;

    /// Tear down an established tunnel
    fn disconnect(&mut self) -> Result<(), EngineError>;

    /// Cancel an attempt that has not completed yet
    fn stop(&mut self) -> Result<(), EngineError>;
}
