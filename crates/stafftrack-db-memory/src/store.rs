use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use serde_json::Value;
use time::OffsetDateTime;

use stafftrack_core::{ModuleId, generate_id};
use stafftrack_store::{RecordStore, StoreError, StoredRecord};

pub type StoreKey = String; // Format: "module/id"

pub(crate) fn make_key(module: ModuleId, id: &str) -> StoreKey {
    format!("{module}/{id}")
}

/// In-memory record store using a papaya lock-free HashMap.
///
/// Semantics the rest of the system relies on:
/// - create assigns a UUID when the payload carries no usable `id`
/// - update merges submitted fields over the stored ones, so record keys
///   absent from the payload survive
/// - delete of a missing record is idempotent
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: PapayaHashMap<StoreKey, StoredRecord>,
    /// Atomic counter for generating revisions
    revision_counter: AtomicU64,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: PapayaHashMap::new(),
            revision_counter: AtomicU64::new(1),
        }
    }

    /// Generates the next revision number.
    fn next_revision(&self) -> u64 {
        self.revision_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Returns the number of records held, across all modules.
    pub fn len(&self) -> usize {
        self.records.pin().len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn require_object(fields: &Value) -> Result<&serde_json::Map<String, Value>, StoreError> {
    fields
        .as_object()
        .ok_or_else(|| StoreError::invalid_record("record fields must be a JSON object"))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, module: ModuleId) -> Result<Vec<StoredRecord>, StoreError> {
        let prefix = format!("{module}/");
        let guard = self.records.pin();
        let mut records: Vec<StoredRecord> = guard
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, record)| record.clone())
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    async fn read(&self, module: ModuleId, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let key = make_key(module, id);
        let guard = self.records.pin();
        Ok(guard.get(&key).cloned())
    }

    async fn create(&self, module: ModuleId, fields: &Value) -> Result<StoredRecord, StoreError> {
        let obj = require_object(fields)?;
        let id = obj
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(generate_id);
        let now = OffsetDateTime::now_utc();

        let mut stored_fields = fields.clone();
        if let Some(target) = stored_fields.as_object_mut() {
            target.insert("id".to_string(), Value::String(id.clone()));
        }

        let record = StoredRecord {
            id: id.clone(),
            module,
            revision: self.next_revision(),
            fields: stored_fields,
            created_at: now,
            updated_at: now,
        };

        let key = make_key(module, &id);
        let guard = self.records.pin();
        if guard.get(&key).is_some() {
            return Err(StoreError::already_exists(module.as_str(), &id));
        }
        guard.insert(key, record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        module: ModuleId,
        id: &str,
        fields: &Value,
    ) -> Result<StoredRecord, StoreError> {
        let obj = require_object(fields)?;
        let key = make_key(module, id);
        let guard = self.records.pin();
        let existing = guard
            .get(&key)
            .ok_or_else(|| StoreError::not_found(module.as_str(), id))?;

        // Merge submitted fields over the stored ones; the id is immutable.
        let mut updated = existing.clone();
        if let Some(target) = updated.fields.as_object_mut() {
            for (name, value) in obj {
                if name != "id" {
                    target.insert(name.clone(), value.clone());
                }
            }
        }
        updated.revision = self.next_revision();
        updated.updated_at = OffsetDateTime::now_utc();

        guard.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, module: ModuleId, id: &str) -> Result<(), StoreError> {
        let key = make_key(module, id);
        let guard = self.records.pin();
        // Removing a missing key is fine: duplicate deletes must succeed.
        guard.remove(&key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
