//! VPN server configuration record
//!
//! One candidate server as delivered by the remote listing, plus the
//! validity queries used to gate connect and change-server actions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Country and ip shown before any server has been chosen
pub const UNKNOWN: &str = "Unknown";

/// A candidate VPN server
///
/// Treated as immutable value data. The only field written after
/// construction is `id`, which the record store assigns on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnConfiguration {
    pub country: String,
    /// Flag image URL, or empty when the listing has none
    pub country_flag_url: String,
    pub ip: String,
    /// Human-readable load indicator
    pub sessions: String,
    pub up_time: String,
    pub speed: String,
    /// Tunnel configuration payload, opaque to this crate
    pub config: String,
    /// Ranking metric, higher is better
    pub score: i64,
    /// Epoch seconds, 0 means unknown or never
    pub expire_time: i64,
    #[serde(default)]
    pub premium: bool,
    /// Assigned by the record store, 0 means unassigned
    #[serde(default)]
    pub id: u32,
}

impl VpnConfiguration {
    /// The "no configuration selected yet" sentinel
    pub fn empty() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            country_flag_url: String::new(),
            ip: UNKNOWN.to_string(),
            sessions: String::new(),
            up_time: String::new(),
            speed: String::new(),
            config: String::new(),
            score: 0,
            expire_time: 0,
            premium: false,
            id: 0,
        }
    }

    /// True when every field needed to connect is populated
    pub fn is_usable(&self) -> bool {
        !self.country.is_empty()
            && !self.country_flag_url.is_empty()
            && !self.ip.is_empty()
            && !self.config.is_empty()
    }

    /// Whether the record has expired at `now` (epoch seconds)
    ///
    /// Independent of [`is_usable`](Self::is_usable): an expired record
    /// keeps all its fields.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expire_time != 0 && self.expire_time <= now
    }

    pub fn has_flag(&self) -> bool {
        !self.country_flag_url.is_empty()
    }

    /// Whether the store has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Copy of this record carrying the given store id
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }
}

impl Default for VpnConfiguration {
    fn default() -> Self {
        Self::empty()
    }
}

/// Orders records best score first
pub fn by_score_desc(a: &VpnConfiguration, b: &VpnConfiguration) -> Ordering {
    b.score.cmp(&a.score)
}

/// Free-function form of [`VpnConfiguration::is_usable`]
pub fn is_usable(record: &VpnConfiguration) -> bool {
    record.is_usable()
}
