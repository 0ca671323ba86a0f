//! Static module catalogue.
//!
//! Every editable module is declared here once: its field set, table
//! columns, and delete policy. The registry resolves bindings against
//! this table, so adding a module is one entry plus a record type.

use std::sync::OnceLock;

use serde::Serialize;
use stafftrack_core::{FieldDefinition, ModuleId};

/// Declarative description of one module's editor surface.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSchema {
    pub module: ModuleId,
    /// Plural display label, shown in the module selector.
    pub label: &'static str,
    /// Singular label used in outcome messages ("Client created").
    pub entity_label: &'static str,
    /// Editable fields, in form order.
    pub fields: Vec<FieldDefinition>,
    /// Record keys rendered as table columns, in display order.
    /// Columns may name keys that are not editable fields.
    pub columns: Vec<&'static str>,
    /// Whether rows of this module expose a delete action.
    pub supports_delete: bool,
}

fn clients() -> ModuleSchema {
    ModuleSchema {
        module: ModuleId::Clients,
        label: "Clients",
        entity_label: "Client",
        fields: vec![
            FieldDefinition::text("name", "Client Name").required(),
            FieldDefinition::select("billing_type", "Billing Type", ["Monthly", "Hourly", "Fixed"]),
            FieldDefinition::text("payment_terms", "Payment Terms").with_placeholder("Net 30"),
            FieldDefinition::select("status", "Status", ["Active", "Hold", "Inactive"]),
            FieldDefinition::number("outstanding", "Outstanding").with_number_default(0.0),
        ],
        columns: vec!["name", "billing_type", "payment_terms", "status", "outstanding"],
        supports_delete: true,
    }
}

fn jobs() -> ModuleSchema {
    ModuleSchema {
        module: ModuleId::Jobs,
        label: "Jobs",
        entity_label: "Job",
        fields: vec![
            FieldDefinition::text("title", "Job Title").required(),
            // The owning client is fixed at creation; edits cannot move a
            // job to another client.
            FieldDefinition::text("client_id", "Client ID").required().create_only(),
            FieldDefinition::select("priority", "Priority", ["High", "Medium", "Low"]),
            FieldDefinition::select(
                "status",
                "Status",
                [
                    "Open",
                    "On Hold",
                    "Interviewing",
                    "Offer Made",
                    "Filled",
                    "Closed - No Hire",
                ],
            ),
        ],
        columns: vec![
            "title",
            "priority",
            "status",
            "submissions",
            "interviews",
            "offers",
            "starts",
        ],
        supports_delete: true,
    }
}

fn employees() -> ModuleSchema {
    ModuleSchema {
        module: ModuleId::Employees,
        label: "Employees",
        entity_label: "Employee",
        fields: vec![
            FieldDefinition::text("name", "Name").required(),
            FieldDefinition::text("email", "Email"),
            FieldDefinition::select(
                "role",
                "Role",
                [
                    "Account Manager",
                    "Recruiter",
                    "Business Development",
                    "Operations Manager",
                    "Owner",
                ],
            )
            .required(),
            FieldDefinition::text("department", "Department"),
        ],
        columns: vec!["name", "email", "role", "department", "is_active"],
        supports_delete: true,
    }
}

fn bd_prospects() -> ModuleSchema {
    ModuleSchema {
        module: ModuleId::BdProspects,
        label: "BD Prospects",
        entity_label: "Prospect",
        fields: vec![
            FieldDefinition::text("prospect_name", "Prospect Name").required(),
            FieldDefinition::text("contact_name", "Contact Name"),
            FieldDefinition::text("contact_email", "Contact Email"),
            FieldDefinition::text("industry", "Industry"),
            FieldDefinition::select(
                "stage",
                "Stage",
                [
                    "Lead",
                    "Contacted",
                    "Meeting Scheduled",
                    "Proposal Sent",
                    "Negotiation",
                    "Closed Won",
                    "Closed Lost",
                ],
            ),
            FieldDefinition::number("probability", "Probability (%)").with_number_default(10.0),
        ],
        columns: vec!["prospect_name", "contact_name", "industry", "stage", "probability"],
        supports_delete: true,
    }
}

fn invoices() -> ModuleSchema {
    ModuleSchema {
        module: ModuleId::Invoices,
        label: "Invoices",
        entity_label: "Invoice",
        fields: vec![
            FieldDefinition::text("invoice_no", "Invoice No").required(),
            FieldDefinition::text("client_id", "Client ID").required().create_only(),
            FieldDefinition::text("billing_month", "Billing Month")
                .required()
                .with_placeholder("2026-02"),
            // No fallback: a blank or malformed amount is a validation
            // error, never silently zero.
            FieldDefinition::number("amount", "Amount").required(),
            FieldDefinition::select("status", "Status", ["Draft", "Sent", "Paid", "Overdue"]),
        ],
        columns: vec!["invoice_no", "billing_month", "amount", "status"],
        // Invoices are an append-only ledger; rows are never deleted.
        supports_delete: false,
    }
}

static SCHEMAS: OnceLock<Vec<ModuleSchema>> = OnceLock::new();

fn schemas() -> &'static [ModuleSchema] {
    SCHEMAS.get_or_init(|| vec![clients(), jobs(), employees(), bd_prospects(), invoices()])
}

/// All module schemas, in selector order.
#[must_use]
pub fn all_schemas() -> &'static [ModuleSchema] {
    schemas()
}

/// Resolves the schema for a module. Every [`ModuleId`] has exactly one.
#[must_use]
pub fn module_schema(module: ModuleId) -> &'static ModuleSchema {
    let index = match module {
        ModuleId::Clients => 0,
        ModuleId::Jobs => 1,
        ModuleId::Employees => 2,
        ModuleId::BdProspects => 3,
        ModuleId::Invoices => 4,
    };
    &schemas()[index]
}
