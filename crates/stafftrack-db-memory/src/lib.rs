//! In-memory record store backend for StaffTrack.
//!
//! This crate provides an in-memory implementation of the `RecordStore`
//! trait from `stafftrack-store`, using a papaya lock-free HashMap for
//! concurrent access, plus a demo dataset for local servers and tests.
//!
//! # Example
//!
//! ```ignore
//! use stafftrack_db_memory::MemoryStore;
//! use stafftrack_store::RecordStore;
//! use stafftrack_core::ModuleId;
//!
//! let store = MemoryStore::new();
//! let client = serde_json::json!({"name": "Acme", "status": "Active"});
//! let created = store.create(ModuleId::Clients, &client).await?;
//! ```

mod seed;
mod store;

// Re-export the RecordStore trait for convenience
pub use stafftrack_store::{RecordStore, StoreError, StoredRecord};

pub use seed::seed_demo_data;
pub use store::{MemoryStore, StoreKey};

use stafftrack_store::DynRecordStore;

/// Creates a new in-memory store behind the trait object alias.
pub fn create_memory_store() -> DynRecordStore {
    std::sync::Arc::new(MemoryStore::new())
}
