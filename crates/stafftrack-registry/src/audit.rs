//! Activity trail for record mutations.
//!
//! Every successful create, update, and delete appends an entry with the
//! record's before/after values. The trail is a bounded in-memory ring
//! queried newest first, with action, module, and free-text filters.

use std::collections::VecDeque;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stafftrack_core::{ModuleId, Timestamp, generate_id};

/// Mutation kinds recorded in the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    RecordCreate,
    RecordUpdate,
    RecordDelete,
}

impl AuditAction {
    /// Returns the single-letter action code (C, U, D)
    pub fn to_action_code(&self) -> &'static str {
        match self {
            AuditAction::RecordCreate => "C",
            AuditAction::RecordUpdate => "U",
            AuditAction::RecordDelete => "D",
        }
    }

    /// Returns the dotted subtype code
    pub fn to_subtype_code(&self) -> &'static str {
        match self {
            AuditAction::RecordCreate => "record.create",
            AuditAction::RecordUpdate => "record.update",
            AuditAction::RecordDelete => "record.delete",
        }
    }

    /// Returns a human-readable display name
    pub fn display(&self) -> &'static str {
        match self {
            AuditAction::RecordCreate => "Record Created",
            AuditAction::RecordUpdate => "Record Updated",
            AuditAction::RecordDelete => "Record Deleted",
        }
    }
}

/// One recorded mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub action: AuditAction,
    pub module: ModuleId,
    pub record_id: String,
    /// Stored fields before the mutation. Absent for creates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_values: Option<Value>,
    /// Stored fields after the mutation. Absent for deletes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_values: Option<Value>,
    pub recorded_at: Timestamp,
}

impl AuditEntry {
    /// Starts building an entry for a mutation on `record_id`.
    pub fn builder(
        action: AuditAction,
        module: ModuleId,
        record_id: impl Into<String>,
    ) -> AuditEntryBuilder {
        AuditEntryBuilder {
            action,
            module,
            record_id: record_id.into(),
            old_values: None,
            new_values: None,
        }
    }
}

/// Builder for audit entries
#[derive(Debug, Clone)]
pub struct AuditEntryBuilder {
    action: AuditAction,
    module: ModuleId,
    record_id: String,
    old_values: Option<Value>,
    new_values: Option<Value>,
}

impl AuditEntryBuilder {
    /// Set the record's fields before the mutation
    pub fn old_values(mut self, values: Value) -> Self {
        self.old_values = Some(values);
        self
    }

    /// Set the record's fields after the mutation
    pub fn new_values(mut self, values: Value) -> Self {
        self.new_values = Some(values);
        self
    }

    /// Stamp the entry with an id and the current time
    pub fn build(self) -> AuditEntry {
        AuditEntry {
            id: generate_id(),
            action: self.action,
            module: self.module,
            record_id: self.record_id,
            old_values: self.old_values,
            new_values: self.new_values,
            recorded_at: Timestamp::now(),
        }
    }
}

/// Filters for querying the trail. All filters are conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<AuditAction>,
    pub module: Option<ModuleId>,
    /// Case-insensitive match against the subtype code, module name, and
    /// record id.
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// Bounded in-memory activity trail.
///
/// Once full, recording evicts the oldest entry. A disabled trail drops
/// everything and always queries empty.
#[derive(Debug)]
pub struct AuditTrail {
    enabled: bool,
    capacity: usize,
    entries: RwLock<VecDeque<AuditEntry>>,
}

impl AuditTrail {
    /// Entries retained (and returned per query) unless configured otherwise.
    pub const DEFAULT_CAPACITY: usize = 200;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            enabled: true,
            capacity: capacity.max(1),
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// A trail that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            capacity: 0,
            entries: RwLock::new(VecDeque::new()),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends an entry, evicting the oldest when at capacity.
    pub fn record(&self, entry: AuditEntry) {
        if !self.enabled {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Returns matching entries, newest first.
    #[must_use]
    pub fn query(&self, query: &AuditQuery) -> Vec<AuditEntry> {
        let limit = query.limit.unwrap_or(Self::DEFAULT_CAPACITY);
        let search = query.search.as_deref().map(str::to_lowercase);

        let Ok(entries) = self.entries.read() else {
            return Vec::new();
        };
        entries
            .iter()
            .rev()
            .filter(|entry| {
                query.action.is_none_or(|action| entry.action == action)
                    && query.module.is_none_or(|module| entry.module == module)
                    && search.as_deref().is_none_or(|term| {
                        entry.action.to_subtype_code().contains(term)
                            || entry.module.as_str().contains(term)
                            || entry.record_id.to_lowercase().contains(term)
                    })
            })
            .take(limit)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
