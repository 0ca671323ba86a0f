//! # stafftrack-core
//!
//! Core types for the StaffTrack operations system: the closed set of
//! module identifiers, the field schema types driving the generic form
//! and table renderers, concrete record types per module, and the shared
//! error type.
//!
//! Higher layers build on these: `stafftrack-store` defines the record
//! store contract, `stafftrack-registry` binds modules to store
//! operations, and `stafftrack-editor` renders records generically
//! through the [`RecordFields`] accessor.

pub mod error;
pub mod field;
pub mod id;
pub mod module;
pub mod record;
pub mod time;
pub mod value;

pub use error::{CoreError, ErrorCategory, Result};
pub use field::{FieldDefinition, FieldKind, SelectOption};
pub use id::generate_id;
pub use module::ModuleId;
pub use record::{AnyRecord, Client, Employee, Invoice, Job, Prospect, RecordFields};
pub use time::Timestamp;
pub use value::FieldValue;
