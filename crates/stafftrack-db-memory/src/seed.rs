//! Demo dataset used by local servers and tests.
//!
//! The records carry the displayed-only keys the editor never submits
//! (job pipeline counters, the employee active flag), so table rendering
//! paths see realistic rows.

use serde_json::{Value, json};

use stafftrack_core::ModuleId;
use stafftrack_store::{RecordStore, StoreResult};

/// Loads a small demo dataset into the given store.
pub async fn seed_demo_data(store: &dyn RecordStore) -> StoreResult<()> {
    for (module, fields) in demo_records() {
        store.create(module, &fields).await?;
    }
    Ok(())
}

fn demo_records() -> Vec<(ModuleId, Value)> {
    vec![
        (
            ModuleId::Clients,
            json!({
                "name": "Northwind Logistics",
                "billing_type": "Monthly",
                "payment_terms": "Net 30",
                "status": "Active",
                "outstanding": 42500
            }),
        ),
        (
            ModuleId::Clients,
            json!({
                "name": "Harbor Foods",
                "billing_type": "Hourly",
                "payment_terms": "Net 45",
                "status": "Hold",
                "outstanding": 61200
            }),
        ),
        (
            ModuleId::Clients,
            json!({
                "name": "Summit Manufacturing",
                "billing_type": "Fixed",
                "payment_terms": "Net 15",
                "status": "Active",
                "outstanding": 0
            }),
        ),
        (
            ModuleId::Jobs,
            json!({
                "title": "Forklift Operator",
                "client_id": "northwind",
                "priority": "High",
                "status": "Interviewing",
                "submissions": 12,
                "interviews": 4,
                "offers": 1,
                "starts": 0
            }),
        ),
        (
            ModuleId::Jobs,
            json!({
                "title": "Line Cook",
                "client_id": "harbor",
                "priority": "Medium",
                "status": "Open",
                "submissions": 5,
                "interviews": 1,
                "offers": 0,
                "starts": 0
            }),
        ),
        (
            ModuleId::Jobs,
            json!({
                "title": "CNC Machinist",
                "client_id": "summit",
                "priority": "Low",
                "status": "Filled",
                "submissions": 9,
                "interviews": 6,
                "offers": 2,
                "starts": 2
            }),
        ),
        (
            ModuleId::Employees,
            json!({
                "name": "Dana Whitfield",
                "email": "dana@stafftrack.example",
                "role": "Account Manager",
                "department": "Accounts",
                "is_active": true
            }),
        ),
        (
            ModuleId::Employees,
            json!({
                "name": "Marcus Reed",
                "email": "marcus@stafftrack.example",
                "role": "Recruiter",
                "department": "Recruiting",
                "is_active": true
            }),
        ),
        (
            ModuleId::Employees,
            json!({
                "name": "Priya Nair",
                "email": "priya@stafftrack.example",
                "role": "Operations Manager",
                "department": "Operations",
                "is_active": false
            }),
        ),
        (
            ModuleId::BdProspects,
            json!({
                "prospect_name": "Cedar Valley Care",
                "contact_name": "J. Ortiz",
                "contact_email": "jortiz@cedarvalley.example",
                "industry": "Healthcare",
                "stage": "Meeting Scheduled",
                "probability": 40
            }),
        ),
        (
            ModuleId::BdProspects,
            json!({
                "prospect_name": "Brightline Retail",
                "contact_name": "S. Kim",
                "contact_email": "skim@brightline.example",
                "industry": "Retail",
                "stage": "Lead",
                "probability": 10
            }),
        ),
        (
            ModuleId::Invoices,
            json!({
                "invoice_no": "INV-2026-014",
                "client_id": "northwind",
                "billing_month": "2026-01",
                "amount": 18250,
                "status": "Sent"
            }),
        ),
        (
            ModuleId::Invoices,
            json!({
                "invoice_no": "INV-2026-015",
                "client_id": "harbor",
                "billing_month": "2026-01",
                "amount": 9400,
                "status": "Overdue"
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use tokio_test::block_on;

    #[test]
    fn test_seed_populates_every_module() {
        let store = MemoryStore::new();
        block_on(async {
            seed_demo_data(&store).await.unwrap();

            for module in ModuleId::ALL {
                let records = store.list(module).await.unwrap();
                assert!(!records.is_empty(), "no seed records for {module}");
                for record in &records {
                    record.decode().expect("seed record should decode");
                }
            }
        });
    }
}
