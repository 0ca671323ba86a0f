//! The closed set of manageable modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identifier of one manageable entity type.
///
/// The set is closed: a name that matches none of the variants is not a
/// module, and callers that accept free-form names are expected to fall
/// back to an inert empty binding rather than fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Clients,
    Jobs,
    Employees,
    BdProspects,
    Invoices,
}

impl ModuleId {
    /// All modules, in presentation order.
    pub const ALL: [ModuleId; 5] = [
        ModuleId::Clients,
        ModuleId::Jobs,
        ModuleId::Employees,
        ModuleId::BdProspects,
        ModuleId::Invoices,
    ];

    /// Returns the wire/storage name of this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Clients => "clients",
            ModuleId::Jobs => "jobs",
            ModuleId::Employees => "employees",
            ModuleId::BdProspects => "bd_prospects",
            ModuleId::Invoices => "invoices",
        }
    }

    /// Returns the singular entity label used in user-facing messages
    /// ("Client created", "Invoice updated").
    #[must_use]
    pub fn entity_label(&self) -> &'static str {
        match self {
            ModuleId::Clients => "Client",
            ModuleId::Jobs => "Job",
            ModuleId::Employees => "Employee",
            ModuleId::BdProspects => "Prospect",
            ModuleId::Invoices => "Invoice",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(ModuleId::Clients),
            "jobs" => Ok(ModuleId::Jobs),
            "employees" => Ok(ModuleId::Employees),
            "bd_prospects" => Ok(ModuleId::BdProspects),
            "invoices" => Ok(ModuleId::Invoices),
            _ => Err(CoreError::unknown_module(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for module in ModuleId::ALL {
            let parsed: ModuleId = module.as_str().parse().unwrap();
            assert_eq!(parsed, module);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "widgets".parse::<ModuleId>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ModuleId::BdProspects).unwrap();
        assert_eq!(json, "\"bd_prospects\"");
        let parsed: ModuleId = serde_json::from_str("\"invoices\"").unwrap();
        assert_eq!(parsed, ModuleId::Invoices);
    }

    #[test]
    fn test_entity_labels() {
        assert_eq!(ModuleId::Clients.entity_label(), "Client");
        assert_eq!(ModuleId::BdProspects.entity_label(), "Prospect");
    }
}
