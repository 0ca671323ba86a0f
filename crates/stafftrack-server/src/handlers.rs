use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use stafftrack_core::AnyRecord;
use stafftrack_registry::{
    AuditEntry, AuditQuery, FormValues, ModuleSchema, NotificationKind, Registry, all_schemas,
};
use stafftrack_store::StoreError;

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Drop the module's cached list and reload before responding.
    pub refresh: Option<bool>,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "StaffTrack Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Lists every module's schema, in selector order.
pub async fn list_modules() -> Json<&'static [ModuleSchema]> {
    Json(all_schemas())
}

/// Lists a module's records. Unknown modules resolve to the inert
/// binding and yield an empty list.
pub async fn list_records(
    State(state): State<AppState>,
    Path(module): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AnyRecord>>, ApiError> {
    let binding = state.registry.select_name(&module);
    if params.refresh.unwrap_or(false) {
        binding.refetch().await?;
    }
    Ok(Json(binding.records().await?))
}

/// Creates a record from submitted form values. Responds 201 with the
/// stored fields, or 204 when an unknown module dropped the submission.
pub async fn create_record(
    State(state): State<AppState>,
    Path(module): Path<String>,
    Json(values): Json<FormValues>,
) -> Result<Response, ApiError> {
    let binding = state.registry.select_name(&module);
    match binding.create(&values).await {
        Ok(Some(record)) => Ok((StatusCode::CREATED, Json(record.fields)).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(failure(&state, binding.entity_label(), "create", err)),
    }
}

/// Updates a record. The path id wins over any id in the body.
pub async fn update_record(
    State(state): State<AppState>,
    Path((module, id)): Path<(String, String)>,
    Json(mut values): Json<FormValues>,
) -> Result<Response, ApiError> {
    let binding = state.registry.select_name(&module);
    values.insert("id".to_string(), id);
    match binding.update(&values).await {
        Ok(Some(record)) => Ok(Json(record.fields).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(failure(&state, binding.entity_label(), "update", err)),
    }
}

/// Deletes a record. Requests against non-deletable or unknown modules,
/// and repeats of an already-applied delete, succeed quietly.
pub async fn delete_record(
    State(state): State<AppState>,
    Path((module, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let binding = state.registry.select_name(&module);
    match binding.delete(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(failure(&state, binding.entity_label(), "delete", err)),
    }
}

/// Reports a failed mutation through the notification sink, then hands
/// the error back for the response mapping.
fn failure(state: &AppState, entity: &str, verb: &str, err: StoreError) -> ApiError {
    let message = if entity.is_empty() {
        format!("{verb} failed: {err}")
    } else {
        format!("{entity} {verb} failed: {err}")
    };
    state
        .registry
        .notifier()
        .notify(&message, NotificationKind::Error);
    err.into()
}

/// Returns matching activity-trail entries, newest first.
pub async fn activity(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Json<Vec<AuditEntry>> {
    Json(state.registry.audit().query(&query))
}
