//! # stafftrack-registry
//!
//! The module registry: a static catalogue of editable modules, each
//! bound to the shared record store behind one uniform interface.
//!
//! - [`schema`]: declarative field/column/delete-policy tables
//! - [`normalize`]: submitted-string to stored-value coercion
//! - [`binding`]: the [`ModuleBinding`] contract and its store-backed
//!   and inert implementations
//! - [`registry`]: name-to-binding resolution with inert fallback
//! - [`cache`]: per-module list cache with explicit invalidation
//! - [`notify`]: outcome notifications ("Client created")
//! - [`audit`]: bounded activity trail of record mutations

pub mod audit;
pub mod binding;
pub mod cache;
pub mod normalize;
pub mod notify;
pub mod registry;
pub mod schema;

pub use audit::{AuditAction, AuditEntry, AuditEntryBuilder, AuditQuery, AuditTrail};
pub use binding::{DynModuleBinding, ModuleBinding};
pub use cache::ListCache;
pub use normalize::{FormValues, normalize_create, normalize_update};
pub use notify::{
    DynNotifier, MemorySink, Notification, NotificationKind, NotificationSink, TracingSink,
};
pub use registry::Registry;
pub use schema::{ModuleSchema, all_schemas, module_schema};
