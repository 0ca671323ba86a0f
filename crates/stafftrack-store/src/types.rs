//! Data types flowing across the record store boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use stafftrack_core::{AnyRecord, ModuleId, Result as CoreResult};

/// A record as held by a store backend.
///
/// `fields` is the persisted JSON object, including the injected `id`
/// key. Typed access goes through [`StoredRecord::decode`], which resolves
/// the module's concrete record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned identifier, immutable for the record's lifetime.
    pub id: String,
    /// The module this record belongs to.
    pub module: ModuleId,
    /// Monotonic revision, bumped on every update.
    pub revision: u64,
    /// The persisted field values.
    pub fields: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl StoredRecord {
    /// Decodes the persisted fields into the module's concrete record type.
    pub fn decode(&self) -> CoreResult<AnyRecord> {
        AnyRecord::decode(self.module, &self.fields)
    }
}
