//! Module bindings: one schema wired to store operations.
//!
//! A binding is the only surface the editor and transport layers see.
//! Every module presents the same shape (fields, columns, list, create,
//! update, delete), so callers never branch on which module is active.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use stafftrack_core::{AnyRecord, FieldDefinition, ModuleId};
use stafftrack_store::{DynRecordStore, StoreError, StoredRecord};

use crate::audit::{AuditAction, AuditEntry, AuditTrail};
use crate::cache::ListCache;
use crate::normalize::{FormValues, normalize_create, normalize_update};
use crate::notify::{DynNotifier, NotificationKind};
use crate::schema::ModuleSchema;

/// The uniform contract every module presents to the editor.
///
/// The inert fallback implements the same contract with no-ops, so code
/// resolving a module by name never needs a missing-module branch.
#[async_trait]
pub trait ModuleBinding: Send + Sync {
    /// The bound module, or `None` for the inert fallback.
    fn module(&self) -> Option<ModuleId>;

    /// Plural display label ("BD Prospects").
    fn label(&self) -> &'static str;

    /// Singular label used in outcome messages ("Prospect").
    fn entity_label(&self) -> &'static str;

    /// Editable fields, in form order.
    fn fields(&self) -> &[FieldDefinition];

    /// Record keys rendered as table columns.
    fn columns(&self) -> &[&'static str];

    /// Whether rows expose a delete action.
    fn supports_delete(&self) -> bool;

    /// Whether a list load is currently in flight.
    fn is_loading(&self) -> bool;

    /// Returns the module's records in creation order, served from the
    /// list cache when it holds a fresh entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be reached or a stored
    /// record no longer decodes into the module's record type.
    async fn records(&self) -> Result<Vec<AnyRecord>, StoreError>;

    /// Drops the cached list and reloads it from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the reload fails; the cache entry stays
    /// empty so the next read tries again.
    async fn refetch(&self) -> Result<(), StoreError>;

    /// Normalizes submitted values and stores a new record.
    ///
    /// Returns `None` from the inert fallback, which accepts and drops
    /// the submission.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRecord` when normalization rejects a
    /// value, or any store error from the write itself.
    async fn create(&self, values: &FormValues) -> Result<Option<StoredRecord>, StoreError>;

    /// Normalizes submitted values and updates the record named by
    /// `values["id"]`. Create-only fields are dropped from the payload.
    ///
    /// Returns `None` from the inert fallback.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRecord` when the id is missing or a
    /// value fails normalization, `StoreError::NotFound` when the record
    /// does not exist.
    async fn update(&self, values: &FormValues) -> Result<Option<StoredRecord>, StoreError>;

    /// Deletes a record by id.
    ///
    /// A quiet no-op when the module does not support deletion or the
    /// binding is inert. Deleting an already-deleted id succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself fails.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Shared handle to a module binding.
pub type DynModuleBinding = Arc<dyn ModuleBinding>;

/// A schema bound to a live store, cache, notifier, and audit trail.
pub(crate) struct StoreBinding {
    schema: &'static ModuleSchema,
    store: DynRecordStore,
    cache: Arc<ListCache>,
    notifier: DynNotifier,
    audit: Arc<AuditTrail>,
}

impl StoreBinding {
    pub(crate) fn new(
        schema: &'static ModuleSchema,
        store: DynRecordStore,
        cache: Arc<ListCache>,
        notifier: DynNotifier,
        audit: Arc<AuditTrail>,
    ) -> Self {
        Self {
            schema,
            store,
            cache,
            notifier,
            audit,
        }
    }

    fn module_id(&self) -> ModuleId {
        self.schema.module
    }

    async fn load_records(&self) -> Result<Arc<Vec<StoredRecord>>, StoreError> {
        let module = self.module_id();
        let generation = self.cache.begin_load(module);
        match self.store.list(module).await {
            Ok(records) => Ok(self.cache.complete_load(module, generation, records)),
            Err(err) => {
                self.cache.abort_load(module);
                Err(err)
            }
        }
    }

    async fn cached_records(&self) -> Result<Arc<Vec<StoredRecord>>, StoreError> {
        if let Some(records) = self.cache.get(self.module_id()) {
            return Ok(records);
        }
        self.load_records().await
    }

    fn record_audit(
        &self,
        action: AuditAction,
        record_id: &str,
        old_values: Option<Value>,
        new_values: Option<Value>,
    ) {
        let mut entry = AuditEntry::builder(action, self.module_id(), record_id);
        if let Some(values) = old_values {
            entry = entry.old_values(values);
        }
        if let Some(values) = new_values {
            entry = entry.new_values(values);
        }
        self.audit.record(entry.build());
    }

    fn notify_success(&self, verb: &str) {
        let message = format!("{} {verb}", self.schema.entity_label);
        self.notifier.notify(&message, NotificationKind::Success);
    }
}

#[async_trait]
impl ModuleBinding for StoreBinding {
    fn module(&self) -> Option<ModuleId> {
        Some(self.schema.module)
    }

    fn label(&self) -> &'static str {
        self.schema.label
    }

    fn entity_label(&self) -> &'static str {
        self.schema.entity_label
    }

    fn fields(&self) -> &[FieldDefinition] {
        &self.schema.fields
    }

    fn columns(&self) -> &[&'static str] {
        &self.schema.columns
    }

    fn supports_delete(&self) -> bool {
        self.schema.supports_delete
    }

    fn is_loading(&self) -> bool {
        self.cache.is_loading(self.module_id())
    }

    async fn records(&self) -> Result<Vec<AnyRecord>, StoreError> {
        let stored = self.cached_records().await?;
        let mut records = Vec::with_capacity(stored.len());
        for record in stored.iter() {
            records.push(record.decode()?);
        }
        Ok(records)
    }

    async fn refetch(&self) -> Result<(), StoreError> {
        self.cache.invalidate(self.module_id());
        self.load_records().await?;
        Ok(())
    }

    async fn create(&self, values: &FormValues) -> Result<Option<StoredRecord>, StoreError> {
        let payload = normalize_create(self.schema, values)?;
        let created = self.store.create(self.module_id(), &payload).await?;

        self.cache.invalidate(self.module_id());
        self.record_audit(
            AuditAction::RecordCreate,
            &created.id,
            None,
            Some(created.fields.clone()),
        );
        self.notify_success("created");
        Ok(Some(created))
    }

    async fn update(&self, values: &FormValues) -> Result<Option<StoredRecord>, StoreError> {
        let id = values
            .get("id")
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::invalid_record("update requires an id"))?;
        let payload = normalize_update(self.schema, values)?;

        let previous = self.store.read(self.module_id(), id).await?;
        let updated = self.store.update(self.module_id(), id, &payload).await?;

        self.cache.invalidate(self.module_id());
        self.record_audit(
            AuditAction::RecordUpdate,
            id,
            previous.map(|p| p.fields),
            Some(updated.fields.clone()),
        );
        self.notify_success("updated");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        // Modules without delete support ignore the request entirely;
        // no store call, no notification, no audit entry.
        if !self.schema.supports_delete {
            return Ok(());
        }

        let previous = self.store.read(self.module_id(), id).await?;
        self.store.delete(self.module_id(), id).await?;

        self.cache.invalidate(self.module_id());
        self.record_audit(AuditAction::RecordDelete, id, previous.map(|p| p.fields), None);
        self.notify_success("deleted");
        Ok(())
    }
}

/// Fallback binding for names that resolve to no module.
///
/// Lists are empty, mutations accept input and drop it. Nothing is
/// stored, notified, or audited.
pub(crate) struct InertBinding;

#[async_trait]
impl ModuleBinding for InertBinding {
    fn module(&self) -> Option<ModuleId> {
        None
    }

    fn label(&self) -> &'static str {
        ""
    }

    fn entity_label(&self) -> &'static str {
        ""
    }

    fn fields(&self) -> &[FieldDefinition] {
        &[]
    }

    fn columns(&self) -> &[&'static str] {
        &[]
    }

    fn supports_delete(&self) -> bool {
        false
    }

    fn is_loading(&self) -> bool {
        false
    }

    async fn records(&self) -> Result<Vec<AnyRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn refetch(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, _values: &FormValues) -> Result<Option<StoredRecord>, StoreError> {
        Ok(None)
    }

    async fn update(&self, _values: &FormValues) -> Result<Option<StoredRecord>, StoreError> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stafftrack_core::RecordFields;
    use stafftrack_db_memory::MemoryStore;

    use crate::audit::AuditQuery;
    use crate::notify::MemorySink;
    use crate::schema::module_schema;

    struct Fixture {
        binding: StoreBinding,
        sink: Arc<MemorySink>,
        audit: Arc<AuditTrail>,
    }

    fn fixture(module: ModuleId) -> Fixture {
        let store: DynRecordStore = Arc::new(MemoryStore::new());
        let sink = Arc::new(MemorySink::new());
        let audit = Arc::new(AuditTrail::default());
        let binding = StoreBinding::new(
            module_schema(module),
            store,
            Arc::new(ListCache::new()),
            sink.clone(),
            audit.clone(),
        );
        Fixture { binding, sink, audit }
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_coerces_notifies_and_audits() {
        let f = fixture(ModuleId::Clients);
        let created = f
            .binding
            .create(&values(&[
                ("name", "Acme Corp"),
                ("billing_type", "Monthly"),
                ("status", "Active"),
                ("outstanding", "12000"),
            ]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.fields["outstanding"], json!(12000));
        assert_eq!(created.fields["status"], json!("Active"));
        assert_eq!(f.sink.messages(), vec!["Client created"]);

        let entries = f.audit.query(&AuditQuery::default());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::RecordCreate);
        assert_eq!(entries[0].record_id, created.id);
        assert!(entries[0].old_values.is_none());
        assert_eq!(entries[0].new_values.as_ref().unwrap()["name"], json!("Acme Corp"));
    }

    #[tokio::test]
    async fn test_mutation_invalidates_cached_list() {
        let f = fixture(ModuleId::Jobs);
        assert!(f.binding.records().await.unwrap().is_empty());

        // The empty list is now cached; the create must invalidate it or
        // the next read would still show zero rows.
        f.binding
            .create(&values(&[("title", "Forklift Operator"), ("client_id", "c-1")]))
            .await
            .unwrap();
        let records = f.binding.records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].field("title").unwrap().display_string(),
            "Forklift Operator"
        );
    }

    #[tokio::test]
    async fn test_update_keeps_create_only_binding() {
        let f = fixture(ModuleId::Jobs);
        let created = f
            .binding
            .create(&values(&[
                ("title", "Forklift Operator"),
                ("client_id", "c-1"),
                ("priority", "High"),
                ("status", "Open"),
            ]))
            .await
            .unwrap()
            .unwrap();

        let updated = f
            .binding
            .update(&values(&[
                ("id", &created.id),
                ("title", "Warehouse Lead"),
                ("client_id", "c-999"),
                ("priority", "High"),
                ("status", "Interviewing"),
            ]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.fields["title"], json!("Warehouse Lead"));
        assert_eq!(updated.fields["client_id"], json!("c-1"));
        assert_eq!(f.sink.messages(), vec!["Job created", "Job updated"]);
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let f = fixture(ModuleId::Clients);
        let err = f
            .binding
            .update(&values(&[("name", "Acme")]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
        assert!(f.sink.messages().is_empty());
        assert!(f.audit.is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_stores_nothing() {
        let f = fixture(ModuleId::Invoices);
        let err = f
            .binding
            .create(&values(&[
                ("invoice_no", "INV-001"),
                ("client_id", "c-1"),
                ("billing_month", "2026-02"),
                ("amount", "twelve"),
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidRecord { .. }));
        assert!(f.binding.records().await.unwrap().is_empty());
        assert!(f.sink.messages().is_empty());
        assert!(f.audit.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unsupported_is_silent() {
        let f = fixture(ModuleId::Invoices);
        let created = f
            .binding
            .create(&values(&[
                ("invoice_no", "INV-001"),
                ("client_id", "c-1"),
                ("billing_month", "2026-02"),
                ("amount", "45000"),
            ]))
            .await
            .unwrap()
            .unwrap();
        let audit_before = f.audit.len();

        f.binding.delete(&created.id).await.unwrap();

        let records = f.binding.records().await.unwrap();
        assert_eq!(records.len(), 1, "invoice must survive the delete");
        assert_eq!(f.sink.messages(), vec!["Invoice created"]);
        assert_eq!(f.audit.len(), audit_before);
    }

    #[tokio::test]
    async fn test_delete_notifies_audits_and_tolerates_repeats() {
        let f = fixture(ModuleId::Employees);
        let created = f
            .binding
            .create(&values(&[("name", "Dana Whitfield"), ("role", "Recruiter")]))
            .await
            .unwrap()
            .unwrap();

        f.binding.delete(&created.id).await.unwrap();
        // Second click on the same row arrives after the first landed.
        f.binding.delete(&created.id).await.unwrap();

        assert!(f.binding.records().await.unwrap().is_empty());
        assert_eq!(
            f.sink.messages(),
            vec!["Employee created", "Employee deleted", "Employee deleted"]
        );

        let deletes = f.audit.query(&AuditQuery {
            action: Some(AuditAction::RecordDelete),
            ..AuditQuery::default()
        });
        assert_eq!(deletes.len(), 2);
        assert!(deletes[1].old_values.is_some());
        assert!(deletes[0].old_values.is_none(), "record was already gone");
    }

    #[tokio::test]
    async fn test_inert_binding_is_a_quiet_no_op() {
        let binding = InertBinding;
        assert!(binding.module().is_none());
        assert!(binding.fields().is_empty());
        assert!(binding.columns().is_empty());
        assert!(!binding.supports_delete());
        assert!(!binding.is_loading());

        assert!(binding.records().await.unwrap().is_empty());
        assert!(binding.create(&values(&[("name", "x")])).await.unwrap().is_none());
        assert!(binding.update(&values(&[("id", "1")])).await.unwrap().is_none());
        binding.delete("1").await.unwrap();
        binding.delete("1").await.unwrap();
        binding.refetch().await.unwrap();
    }
}
