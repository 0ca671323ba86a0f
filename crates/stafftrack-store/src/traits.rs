//! The record store contract that all backends must implement.

use async_trait::async_trait;
use serde_json::Value;

use stafftrack_core::ModuleId;

use crate::error::StoreError;
use crate::types::StoredRecord;

/// The store every module binding delegates to.
///
/// Implementations must be thread-safe (`Send + Sync`). Each module's
/// records form an independent keyspace; operations never cross modules.
///
/// # Example
///
/// ```ignore
/// use stafftrack_store::{RecordStore, StoreError, StoredRecord};
/// use stafftrack_core::ModuleId;
///
/// async fn get_client(store: &dyn RecordStore, id: &str) -> Result<StoredRecord, StoreError> {
///     store
///         .read(ModuleId::Clients, id)
///         .await?
///         .ok_or_else(|| StoreError::not_found("clients", id))
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns all records of a module in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues; a module with no
    /// records yields an empty list.
    async fn list(&self, module: ModuleId) -> Result<Vec<StoredRecord>, StoreError>;

    /// Reads a record by ID.
    ///
    /// Returns `None` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// records.
    async fn read(&self, module: ModuleId, id: &str) -> Result<Option<StoredRecord>, StoreError>;

    /// Creates a new record from a JSON object of field values.
    ///
    /// If the object carries no non-empty `id`, the backend assigns one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if a record with the same ID
    /// exists. Returns `StoreError::InvalidRecord` if `fields` is not an
    /// object.
    async fn create(&self, module: ModuleId, fields: &Value) -> Result<StoredRecord, StoreError>;

    /// Updates an existing record.
    ///
    /// Submitted fields are merged over the stored ones; keys absent from
    /// `fields` keep their stored values, so displayed-only record keys
    /// survive editor round trips. The stored `id` is never changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the record does not exist.
    /// Returns `StoreError::InvalidRecord` if `fields` is not an object.
    async fn update(
        &self,
        module: ModuleId,
        id: &str,
        fields: &Value,
    ) -> Result<StoredRecord, StoreError>;

    /// Deletes a record by ID.
    ///
    /// Deleting an ID that does not exist is not an error: the editor can
    /// issue duplicate deletes for the same row and the second call must
    /// succeed quietly.
    async fn delete(&self, module: ModuleId, id: &str) -> Result<(), StoreError>;

    /// Returns the name of this store backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
