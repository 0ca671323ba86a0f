//! Concrete record types, one per module.
//!
//! Records are not dynamic field bags: each module has its own struct,
//! and the generic table/form renderers reach into them only through the
//! [`RecordFields`] accessor. [`AnyRecord`] unifies the closed set behind
//! one value type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::module::ModuleId;
use crate::value::FieldValue;

/// Name-indexed access into a record, used only by the generic
/// table and form renderers.
pub trait RecordFields {
    /// The store-assigned identifier.
    fn id(&self) -> &str;

    /// Resolves a field by name. Unknown names yield `None`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A client of the agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub billing_type: String,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub outstanding: f64,
}

impl RecordFields for Client {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "billing_type" => Some(FieldValue::Text(self.billing_type.clone())),
            "payment_terms" => Some(FieldValue::Text(self.payment_terms.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "outstanding" => Some(FieldValue::Number(self.outstanding)),
            _ => None,
        }
    }
}

/// An open position being worked for a client.
///
/// The pipeline counters are maintained outside the editor; they are
/// displayed as columns but never appear in the editable field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub submissions: i64,
    #[serde(default)]
    pub interviews: i64,
    #[serde(default)]
    pub offers: i64,
    #[serde(default)]
    pub starts: i64,
}

impl RecordFields for Job {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "client_id" => Some(FieldValue::Text(self.client_id.clone())),
            "priority" => Some(FieldValue::Text(self.priority.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "submissions" => Some(FieldValue::Number(self.submissions as f64)),
            "interviews" => Some(FieldValue::Number(self.interviews as f64)),
            "offers" => Some(FieldValue::Number(self.offers as f64)),
            "starts" => Some(FieldValue::Number(self.starts as f64)),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// An internal employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    /// Displayed-only flag; new employees start active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl RecordFields for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "role" => Some(FieldValue::Text(self.role.clone())),
            "department" => Some(FieldValue::Text(self.department.clone())),
            "is_active" => Some(FieldValue::Bool(self.is_active)),
            _ => None,
        }
    }
}

/// A business-development prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prospect_name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub probability: f64,
}

impl RecordFields for Prospect {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "prospect_name" => Some(FieldValue::Text(self.prospect_name.clone())),
            "contact_name" => Some(FieldValue::Text(self.contact_name.clone())),
            "contact_email" => Some(FieldValue::Text(self.contact_email.clone())),
            "industry" => Some(FieldValue::Text(self.industry.clone())),
            "stage" => Some(FieldValue::Text(self.stage.clone())),
            "probability" => Some(FieldValue::Number(self.probability)),
            _ => None,
        }
    }
}

/// An invoice issued to a client. Invoices are append-only; the module
/// does not support deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub billing_month: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: String,
}

impl RecordFields for Invoice {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "invoice_no" => Some(FieldValue::Text(self.invoice_no.clone())),
            "client_id" => Some(FieldValue::Text(self.client_id.clone())),
            "billing_month" => Some(FieldValue::Text(self.billing_month.clone())),
            "amount" => Some(FieldValue::Number(self.amount)),
            "status" => Some(FieldValue::Text(self.status.clone())),
            _ => None,
        }
    }
}

/// One record of any module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyRecord {
    Client(Client),
    Job(Job),
    Employee(Employee),
    Prospect(Prospect),
    Invoice(Invoice),
}

impl AnyRecord {
    /// Decodes a stored JSON object into the module's concrete type.
    pub fn decode(module: ModuleId, fields: &Value) -> Result<AnyRecord> {
        fn from<T: serde::de::DeserializeOwned>(
            module: ModuleId,
            fields: &Value,
        ) -> Result<T> {
            serde_json::from_value(fields.clone())
                .map_err(|e| CoreError::record_decode(module.as_str(), e.to_string()))
        }

        Ok(match module {
            ModuleId::Clients => AnyRecord::Client(from(module, fields)?),
            ModuleId::Jobs => AnyRecord::Job(from(module, fields)?),
            ModuleId::Employees => AnyRecord::Employee(from(module, fields)?),
            ModuleId::BdProspects => AnyRecord::Prospect(from(module, fields)?),
            ModuleId::Invoices => AnyRecord::Invoice(from(module, fields)?),
        })
    }

    /// Returns which module this record belongs to.
    #[must_use]
    pub fn module(&self) -> ModuleId {
        match self {
            AnyRecord::Client(_) => ModuleId::Clients,
            AnyRecord::Job(_) => ModuleId::Jobs,
            AnyRecord::Employee(_) => ModuleId::Employees,
            AnyRecord::Prospect(_) => ModuleId::BdProspects,
            AnyRecord::Invoice(_) => ModuleId::Invoices,
        }
    }
}

impl RecordFields for AnyRecord {
    fn id(&self) -> &str {
        match self {
            AnyRecord::Client(r) => r.id(),
            AnyRecord::Job(r) => r.id(),
            AnyRecord::Employee(r) => r.id(),
            AnyRecord::Prospect(r) => r.id(),
            AnyRecord::Invoice(r) => r.id(),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            AnyRecord::Client(r) => r.field(name),
            AnyRecord::Job(r) => r.field(name),
            AnyRecord::Employee(r) => r.field(name),
            AnyRecord::Prospect(r) => r.field(name),
            AnyRecord::Invoice(r) => r.field(name),
        }
    }
}
