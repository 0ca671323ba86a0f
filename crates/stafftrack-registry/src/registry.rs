//! The module registry.
//!
//! Built once at startup: every module gets a binding wired to the
//! shared store, list cache, notifier, and audit trail. Lookup by name
//! falls back to an inert binding instead of an error.

use std::collections::HashMap;
use std::sync::Arc;

use stafftrack_core::ModuleId;
use stafftrack_store::DynRecordStore;

use crate::audit::AuditTrail;
use crate::binding::{DynModuleBinding, InertBinding, StoreBinding};
use crate::cache::ListCache;
use crate::notify::DynNotifier;
use crate::schema::module_schema;

/// Registry of module bindings over one shared store.
pub struct Registry {
    bindings: HashMap<ModuleId, DynModuleBinding>,
    inert: DynModuleBinding,
    notifier: DynNotifier,
    audit: Arc<AuditTrail>,
}

impl Registry {
    /// Builds bindings for every module against the given store.
    #[must_use]
    pub fn new(store: DynRecordStore, notifier: DynNotifier, audit: Arc<AuditTrail>) -> Self {
        let cache = Arc::new(ListCache::new());
        let mut bindings: HashMap<ModuleId, DynModuleBinding> = HashMap::new();
        for module in ModuleId::ALL {
            let binding = StoreBinding::new(
                module_schema(module),
                store.clone(),
                cache.clone(),
                notifier.clone(),
                audit.clone(),
            );
            bindings.insert(module, Arc::new(binding));
        }
        Self {
            bindings,
            inert: Arc::new(InertBinding),
            notifier,
            audit,
        }
    }

    /// Returns the binding for a module.
    #[must_use]
    pub fn select(&self, module: ModuleId) -> DynModuleBinding {
        self.bindings
            .get(&module)
            .cloned()
            .unwrap_or_else(|| self.inert.clone())
    }

    /// Resolves a binding by module name. Unknown names get the inert
    /// fallback rather than an error.
    #[must_use]
    pub fn select_name(&self, name: &str) -> DynModuleBinding {
        match name.parse::<ModuleId>() {
            Ok(module) => self.select(module),
            Err(_) => self.inert.clone(),
        }
    }

    /// The sink mutation outcomes are reported through.
    #[must_use]
    pub fn notifier(&self) -> &DynNotifier {
        &self.notifier
    }

    /// The shared activity trail.
    #[must_use]
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stafftrack_db_memory::MemoryStore;

    use crate::audit::{AuditAction, AuditQuery};
    use crate::binding::ModuleBinding;
    use crate::normalize::FormValues;
    use crate::notify::MemorySink;

    fn registry() -> Registry {
        Registry::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemorySink::new()),
            Arc::new(AuditTrail::default()),
        )
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_every_module_resolves() {
        let registry = registry();
        for module in ModuleId::ALL {
            let binding = registry.select(module);
            assert_eq!(binding.module(), Some(module));
            assert!(!binding.fields().is_empty());
        }
    }

    #[test]
    fn test_name_resolution_falls_back_to_inert() {
        let registry = registry();
        assert_eq!(
            registry.select_name("bd_prospects").module(),
            Some(ModuleId::BdProspects)
        );
        assert!(registry.select_name("timesheets").module().is_none());
        assert!(registry.select_name("").module().is_none());
    }

    #[tokio::test]
    async fn test_unknown_module_accepts_and_drops_input() {
        let registry = registry();
        let binding = registry.select_name("timesheets");

        assert!(binding.records().await.unwrap().is_empty());
        let outcome = binding
            .create(&values(&[("name", "ghost")]))
            .await
            .unwrap();
        assert!(outcome.is_none());
        binding.delete("anything").await.unwrap();

        // Nothing leaked into real modules or the trail.
        for module in ModuleId::ALL {
            assert!(registry.select(module).records().await.unwrap().is_empty());
        }
        assert!(registry.audit().is_empty());
    }

    #[tokio::test]
    async fn test_modules_share_one_store_and_trail() {
        let registry = registry();
        registry
            .select(ModuleId::Clients)
            .create(&values(&[("name", "Acme Corp")]))
            .await
            .unwrap();
        registry
            .select(ModuleId::Employees)
            .create(&values(&[("name", "Dana Whitfield"), ("role", "Recruiter")]))
            .await
            .unwrap();

        let creates = registry.audit().query(&AuditQuery {
            action: Some(AuditAction::RecordCreate),
            ..AuditQuery::default()
        });
        assert_eq!(creates.len(), 2);
        // Newest first: the employee create landed last.
        assert_eq!(creates[0].module, ModuleId::Employees);
        assert_eq!(creates[1].module, ModuleId::Clients);
    }
}
