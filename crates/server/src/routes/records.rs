use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use models::{Record, RecordPatch};
use serde_json::Value;
use service::errors::ServiceError;
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::metrics::{self, outcome};
use crate::routes::AppState;

/// List every record in store order, exactly as stored.
#[utoipa::path(
    get, path = "/records", tag = "records",
    responses(
        (status = 200, description = "All records", body = [crate::openapi::RecordDoc]),
        (status = 500, description = "Store unreadable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<Value>>, JsonApiError> {
    let records = state.store.list().await?;
    info!(count = records.len(), "list records");
    Ok(Json(records))
}

/// Apply a partial update of `price` and/or `on_sale` to one record.
#[utoipa::path(
    patch, path = "/records/{id}", tag = "records",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = crate::openapi::RecordPatchDoc,
    responses(
        (status = 200, description = "Updated record", body = crate::openapi::RecordDoc),
        (status = 400, description = "Invalid price or on_sale", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn patch_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Record>, JsonApiError> {
    let Json(body) = body.map_err(|e| {
        metrics::record_patch(outcome::INVALID);
        JsonApiError::bad_request(e.body_text())
    })?;

    let patch = match RecordPatch::from_json(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(record_id = %id, error = %e, "rejected record patch");
            metrics::record_patch(outcome::INVALID);
            return Err(ServiceError::from(e).into());
        }
    };

    match state.store.patch(&id, patch).await {
        Ok(rec) => {
            metrics::record_patch(outcome::UPDATED);
            Ok(Json(rec))
        }
        Err(e) => {
            let label = match e {
                ServiceError::NotFound(_) => outcome::NOT_FOUND,
                ServiceError::Validation(_) => outcome::INVALID,
                ServiceError::Storage(_) => outcome::FAILED,
            };
            metrics::record_patch(label);
            Err(e.into())
        }
    }
}
