//! # stafftrack-store
//!
//! Record store abstraction for StaffTrack.
//!
//! This crate defines the traits and types that all store backends must
//! implement. It does not contain any implementations; those are provided
//! by separate crates (`stafftrack-db-memory` ships the in-memory one).
//!
//! ## Overview
//!
//! The main trait is [`RecordStore`], which defines the per-module
//! contract for:
//! - listing records
//! - reading one record
//! - create / update / delete
//!
//! ## Store Backends
//!
//! To implement a backend, implement the [`RecordStore`] trait:
//!
//! ```ignore
//! use async_trait::async_trait;
//! use stafftrack_store::{RecordStore, StoreError, StoredRecord};
//!
//! struct MyStore {
//!     // ...
//! }
//!
//! #[async_trait]
//! impl RecordStore for MyStore {
//!     async fn create(&self, module: ModuleId, fields: &Value) -> Result<StoredRecord, StoreError> {
//!         // Implementation
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::{ErrorCategory, StoreError};
pub use traits::RecordStore;
pub use types::StoredRecord;

/// Type alias for a store result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Type alias for a boxed store trait object.
pub type DynRecordStore = std::sync::Arc<dyn RecordStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use stafftrack_store::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StoreError};
    pub use crate::traits::RecordStore;
    pub use crate::types::StoredRecord;
    pub use crate::{DynRecordStore, StoreResult};
}
