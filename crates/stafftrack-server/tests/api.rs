//! API tests against a live server bound to an ephemeral port.
//!
//! Each test gets its own in-memory store, so tests are independent and
//! need no external services.

use std::sync::Arc;

use assert_json_diff::assert_json_include;
use serde_json::{Value, json};
use stafftrack_db_memory::{create_memory_store, seed_demo_data};
use stafftrack_registry::{AuditTrail, Registry, TracingSink};
use stafftrack_server::{AppConfig, build_app};
use tokio::task::JoinHandle;

async fn start_server(seed: bool) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let store = create_memory_store();
    if seed {
        seed_demo_data(store.as_ref()).await.expect("seed demo data");
    }
    let registry = Arc::new(Registry::new(
        store,
        Arc::new(TracingSink),
        Arc::new(AuditTrail::default()),
    ));
    let app = build_app(&AppConfig::default(), registry);

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

#[tokio::test]
async fn health_and_module_catalogue() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({"status": "ok"}));

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["service"], json!("StaffTrack Server"));

    let resp = client.get(format!("{base}/api/modules")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let modules: Value = resp.json().await.unwrap();
    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 5);
    assert_json_include!(
        actual: modules[0].clone(),
        expected: json!({
            "module": "clients",
            "label": "Clients",
            "entity_label": "Client",
            "supports_delete": true,
        })
    );
    assert_eq!(modules[3]["label"], json!("BD Prospects"));
    assert_eq!(modules[4]["module"], json!("invoices"));
    assert_eq!(modules[4]["supports_delete"], json!(false));
    assert_eq!(modules[4]["fields"][3]["name"], json!("amount"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn client_crud_round_trip() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    // Create: submitted strings are normalized before storage.
    let resp = client
        .post(format!("{base}/api/clients/records"))
        .json(&json!({
            "name": "Acme Corp",
            "billing_type": "Monthly",
            "payment_terms": "Net 30",
            "status": "Active",
            "outstanding": "12000",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["outstanding"], json!(12000));

    // List
    let resp = client
        .get(format!("{base}/api/clients/records"))
        .send()
        .await
        .unwrap();
    let rows: Value = resp.json().await.unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], json!("Acme Corp"));
    assert_eq!(rows[0]["id"], json!(id.clone()));

    // Update via path id
    let resp = client
        .put(format!("{base}/api/clients/records/{id}"))
        .json(&json!({
            "name": "Acme Corp",
            "billing_type": "Monthly",
            "payment_terms": "Net 45",
            "status": "Hold",
            "outstanding": "9500",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["payment_terms"], json!("Net 45"));
    assert_eq!(updated["id"], json!(id.clone()));

    // Forced refresh returns the updated row
    let resp = client
        .get(format!("{base}/api/clients/records?refresh=true"))
        .send()
        .await
        .unwrap();
    let rows: Value = resp.json().await.unwrap();
    assert_eq!(rows[0]["status"], json!("Hold"));

    // Delete, then delete again: the repeat must also succeed.
    for _ in 0..2 {
        let resp = client
            .delete(format!("{base}/api/clients/records/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }
    let resp = client
        .get(format!("{base}/api/clients/records"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn validation_and_missing_record_errors() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    // The amount field has no fallback, so junk input is rejected.
    let resp = client
        .post(format!("{base}/api/invoices/records"))
        .json(&json!({
            "invoice_no": "INV-001",
            "client_id": "c-1",
            "billing_month": "2026-02",
            "amount": "12k",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("amount"));
    assert_eq!(body["category"], json!("validation"));

    // Nothing was stored.
    let resp = client
        .get(format!("{base}/api/invoices/records"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    let resp = client
        .put(format!("{base}/api/clients/records/no-such-id"))
        .json(&json!({"name": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["category"], json!("not_found"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unknown_module_is_inert() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/timesheets/records"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    let resp = client
        .post(format!("{base}/api/timesheets/records"))
        .json(&json!({"name": "ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .delete(format!("{base}/api/timesheets/records/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // The dropped submission reached no real module.
    let resp = client
        .get(format!("{base}/api/clients/records"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
    let resp = client.get(format!("{base}/api/activity")).send().await.unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn invoice_delete_is_ignored() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/invoices/records"))
        .json(&json!({
            "invoice_no": "INV-001",
            "client_id": "c-1",
            "billing_month": "2026-02",
            "amount": "45000",
            "status": "Sent",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let id = resp.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = client
        .delete(format!("{base}/api/invoices/records/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/invoices/records"))
        .send()
        .await
        .unwrap();
    let rows: Value = resp.json().await.unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1, "ledger rows are never deleted");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn activity_trail_filters() {
    let (base, shutdown, _server) = start_server(false).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/clients/records"))
        .json(&json!({"name": "Acme Corp", "status": "Active", "outstanding": ""}))
        .send()
        .await
        .unwrap();
    let id = resp.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    client
        .put(format!("{base}/api/clients/records/{id}"))
        .json(&json!({"name": "Acme Corp", "status": "Hold", "outstanding": "0"}))
        .send()
        .await
        .unwrap();

    let resp = client.get(format!("{base}/api/activity")).send().await.unwrap();
    let entries: Value = resp.json().await.unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first
    assert_eq!(entries[0]["action"], json!("record_update"));
    assert_eq!(entries[1]["action"], json!("record_create"));
    assert_eq!(entries[0]["module"], json!("clients"));
    assert_eq!(entries[0]["record_id"], json!(id.clone()));
    assert_eq!(entries[0]["old_values"]["status"], json!("Active"));
    assert_eq!(entries[0]["new_values"]["status"], json!("Hold"));
    assert!(entries[1].get("old_values").is_none());

    let resp = client
        .get(format!("{base}/api/activity?action=record_create"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap().as_array().unwrap().len(), 1);

    let resp = client
        .get(format!("{base}/api/activity?module=jobs"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));

    let resp = client
        .get(format!("{base}/api/activity?limit=1"))
        .send()
        .await
        .unwrap();
    let entries: Value = resp.json().await.unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["action"], json!("record_update"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn seeded_server_has_rows_in_every_module() {
    let (base, shutdown, _server) = start_server(true).await;
    let client = reqwest::Client::new();

    for module in ["clients", "jobs", "employees", "bd_prospects", "invoices"] {
        let resp = client
            .get(format!("{base}/api/{module}/records"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let rows: Value = resp.json().await.unwrap();
        assert!(
            !rows.as_array().unwrap().is_empty(),
            "{module} should be seeded"
        );
    }

    let _ = shutdown.send(());
}
