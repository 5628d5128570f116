//! Record store collaborator
//!
//! The store keeps known server configurations keyed by an id it assigns on
//! insert. The model only consumes what the store returns.

use crate::error::StoreError;
use crate::server::listing::ListingPolicy;
use crate::server::record::VpnConfiguration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// First id handed out by a store; 0 stays reserved for "unassigned"
const FIRST_ID: u32 = 1;

/// Storage of known server configurations
pub trait RecordStore {
    /// Persist `record` and return it with its newly assigned id
    ///
    /// Any id already present on `record` is ignored.
    fn insert(&mut self, record: VpnConfiguration) -> Result<VpnConfiguration, StoreError>;

    /// All stored records in insertion order
    fn list(&self) -> Result<Vec<VpnConfiguration>, StoreError>;

    /// Remove every record expired at `now`, returning how many were removed
    fn delete_expired(&mut self, now: i64) -> Result<usize, StoreError>;

    /// Look up a single record by id
    fn get(&self, id: u32) -> Result<Option<VpnConfiguration>, StoreError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Insert every record from a remote listing, returning them with their ids
    fn insert_all(
        &mut self,
        records: impl IntoIterator<Item = VpnConfiguration>,
    ) -> Result<Vec<VpnConfiguration>, StoreError>
    where
        Self: Sized,
    {
        let stored = records
            .into_iter()
            .map(|r| self.insert(r))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Imported {} server(s)", stored.len());
        Ok(stored)
    }

    /// Stored records filtered and ranked by `policy`
    fn listing(
        &self,
        policy: &ListingPolicy,
        now: i64,
    ) -> Result<Vec<VpnConfiguration>, StoreError> {
        Ok(policy.apply(self.list()?, now))
    }
}

/// Serialized shape shared by the in-memory and file-backed stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoreContents {
    #[serde(default = "default_next_id")]
    next_id: u32,

    #[serde(default)]
    servers: Vec<VpnConfiguration>,
}

fn default_next_id() -> u32 {
    FIRST_ID
}

impl Default for StoreContents {
    fn default() -> Self {
        Self {
            next_id: default_next_id(),
            servers: Vec::new(),
        }
    }
}

impl StoreContents {
    /// Next free id, never below FIRST_ID or any id already stored
    ///
    /// The counter read from disk is only a lower bound.
    fn next_free_id(&self) -> Result<u32, StoreError> {
        let above_stored = match self.servers.iter().map(|r| r.id).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted)?,
            None => FIRST_ID,
        };
        Ok(self.next_id.max(above_stored).max(FIRST_ID))
    }

    fn insert(&mut self, record: VpnConfiguration) -> Result<VpnConfiguration, StoreError> {
        let id = self.next_free_id()?;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        let stored = record.with_id(id);
        self.servers.push(stored.clone());
        Ok(stored)
    }

    fn delete_expired(&mut self, now: i64) -> usize {
        let before = self.servers.len();
        self.servers.retain(|r| !r.is_expired(now));
        before - self.servers.len()
    }
}

/// In-process record store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: StoreContents,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: VpnConfiguration) -> Result<VpnConfiguration, StoreError> {
        self.contents.insert(record)
    }

    fn list(&self) -> Result<Vec<VpnConfiguration>, StoreError> {
        Ok(self.contents.servers.clone())
    }

    fn delete_expired(&mut self, now: i64) -> Result<usize, StoreError> {
        let removed = self.contents.delete_expired(now);
        info!("Removed {} expired server(s)", removed);
        Ok(removed)
    }
}

/// Record store persisted as a TOML file of `[[servers]]` tables
///
/// A missing file reads as an empty store. Every mutation rewrites the file.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
}

impl TomlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<StoreContents, StoreError> {
        if !self.path.exists() {
            debug!("Record store {} does not exist yet", self.display_path());
            return Ok(StoreContents::default());
        }

        let raw = std::fs::read_to_string(&self.path).map_err(|e| StoreError::ReadFailed {
            path: self.display_path(),
            reason: e.to_string(),
        })?;

        toml::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.display_path(),
            reason: e.to_string(),
        })
    }

    fn save(&self, contents: &StoreContents) -> Result<(), StoreError> {
        let write_failed = |reason: String| StoreError::WriteFailed {
            path: self.display_path(),
            reason,
        };

        let raw = toml::to_string_pretty(contents).map_err(|e| write_failed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }

        std::fs::write(&self.path, raw).map_err(|e| write_failed(e.to_string()))
    }
}

impl RecordStore for TomlStore {
    fn insert(&mut self, record: VpnConfiguration) -> Result<VpnConfiguration, StoreError> {
        let mut contents = self.load()?;
        let stored = contents.insert(record)?;
        self.save(&contents)?;
        debug!("Stored server {} ({}) as id {}", stored.country, stored.ip, stored.id);
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<VpnConfiguration>, StoreError> {
        Ok(self.load()?.servers)
    }

    fn delete_expired(&mut self, now: i64) -> Result<usize, StoreError> {
        let mut contents = self.load()?;
        let removed = contents.delete_expired(now);
        if removed > 0 {
            self.save(&contents)?;
        }
        info!(
            "Removed {} expired server(s) from {}",
            removed,
            self.display_path()
        );
        Ok(removed)
    }
}
