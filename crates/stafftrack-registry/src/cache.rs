//! Per-module list cache with explicit invalidation.
//!
//! Each module caches its last successful list result. Nothing here
//! expires by time: a module's entry is dropped only by an explicit
//! [`ListCache::invalidate`], which every successful mutation issues for
//! its own module. Entries carry a generation counter so a list fetch
//! that was in flight when an invalidation landed cannot reinstall its
//! stale result.

use std::sync::Arc;

use dashmap::DashMap;
use stafftrack_core::ModuleId;
use stafftrack_store::StoredRecord;

#[derive(Debug, Default)]
struct CacheEntry {
    records: Option<Arc<Vec<StoredRecord>>>,
    loading: bool,
    generation: u64,
}

/// Concurrent list cache keyed by module.
#[derive(Debug, Default)]
pub struct ListCache {
    entries: DashMap<ModuleId, CacheEntry>,
}

impl ListCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list for `module`, if any.
    #[must_use]
    pub fn get(&self, module: ModuleId) -> Option<Arc<Vec<StoredRecord>>> {
        self.entries.get(&module).and_then(|e| e.records.clone())
    }

    /// Marks a load as in flight and returns the generation it must
    /// present to [`ListCache::complete_load`].
    pub fn begin_load(&self, module: ModuleId) -> u64 {
        let mut entry = self.entries.entry(module).or_default();
        entry.loading = true;
        entry.generation
    }

    /// Installs a load result. The cache only accepts it when no
    /// invalidation happened since the matching [`ListCache::begin_load`];
    /// either way the caller gets back the list it fetched.
    pub fn complete_load(
        &self,
        module: ModuleId,
        generation: u64,
        records: Vec<StoredRecord>,
    ) -> Arc<Vec<StoredRecord>> {
        let records = Arc::new(records);
        let mut entry = self.entries.entry(module).or_default();
        entry.loading = false;
        if entry.generation == generation {
            entry.records = Some(records.clone());
        }
        records
    }

    /// Clears the loading flag after a failed load.
    pub fn abort_load(&self, module: ModuleId) {
        if let Some(mut entry) = self.entries.get_mut(&module) {
            entry.loading = false;
        }
    }

    /// Drops the cached list for `module` and bumps its generation so
    /// any in-flight load for it is discarded on completion.
    pub fn invalidate(&self, module: ModuleId) {
        let mut entry = self.entries.entry(module).or_default();
        entry.records = None;
        entry.generation += 1;
    }

    /// Whether a load for `module` is currently in flight.
    #[must_use]
    pub fn is_loading(&self, module: ModuleId) -> bool {
        self.entries.get(&module).is_some_and(|e| e.loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::OffsetDateTime;

    fn record(module: ModuleId, id: &str) -> StoredRecord {
        StoredRecord {
            id: id.to_string(),
            module,
            revision: 1,
            fields: json!({"id": id}),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_load_then_hit() {
        let cache = ListCache::new();
        assert!(cache.get(ModuleId::Clients).is_none());

        let generation = cache.begin_load(ModuleId::Clients);
        assert!(cache.is_loading(ModuleId::Clients));

        cache.complete_load(
            ModuleId::Clients,
            generation,
            vec![record(ModuleId::Clients, "c-1")],
        );
        assert!(!cache.is_loading(ModuleId::Clients));
        let cached = cache.get(ModuleId::Clients).unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "c-1");
    }

    #[test]
    fn test_invalidate_drops_entry() {
        let cache = ListCache::new();
        let generation = cache.begin_load(ModuleId::Jobs);
        cache.complete_load(ModuleId::Jobs, generation, vec![record(ModuleId::Jobs, "j-1")]);

        cache.invalidate(ModuleId::Jobs);
        assert!(cache.get(ModuleId::Jobs).is_none());
    }

    #[test]
    fn test_invalidation_keys_are_per_module() {
        let cache = ListCache::new();
        let clients = cache.begin_load(ModuleId::Clients);
        cache.complete_load(ModuleId::Clients, clients, vec![record(ModuleId::Clients, "c-1")]);
        let jobs = cache.begin_load(ModuleId::Jobs);
        cache.complete_load(ModuleId::Jobs, jobs, vec![record(ModuleId::Jobs, "j-1")]);

        cache.invalidate(ModuleId::Clients);
        assert!(cache.get(ModuleId::Clients).is_none());
        assert!(cache.get(ModuleId::Jobs).is_some(), "other modules keep their entries");
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let cache = ListCache::new();
        let generation = cache.begin_load(ModuleId::Clients);

        // A mutation lands while the fetch is in flight.
        cache.invalidate(ModuleId::Clients);

        let fetched =
            cache.complete_load(ModuleId::Clients, generation, vec![record(ModuleId::Clients, "c-1")]);
        // The caller still gets its result, but the cache stays empty so
        // the next read refetches fresh data.
        assert_eq!(fetched.len(), 1);
        assert!(cache.get(ModuleId::Clients).is_none());

        let fresh = cache.begin_load(ModuleId::Clients);
        cache.complete_load(
            ModuleId::Clients,
            fresh,
            vec![record(ModuleId::Clients, "c-1"), record(ModuleId::Clients, "c-2")],
        );
        assert_eq!(cache.get(ModuleId::Clients).unwrap().len(), 2);
    }

    #[test]
    fn test_abort_load_clears_flag() {
        let cache = ListCache::new();
        cache.begin_load(ModuleId::Invoices);
        assert!(cache.is_loading(ModuleId::Invoices));
        cache.abort_load(ModuleId::Invoices);
        assert!(!cache.is_loading(ModuleId::Invoices));
        assert!(cache.get(ModuleId::Invoices).is_none());
    }
}
