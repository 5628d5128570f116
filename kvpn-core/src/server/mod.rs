//! Server configuration records
//!
//! The record model, the listing policy applied to server lists and the
//! record store collaborator.

pub mod listing;
pub mod record;
pub mod store;

// Public re-exports
pub use listing::ListingPolicy;
pub use record::VpnConfiguration;
pub use store::{MemoryStore, RecordStore, TomlStore};
