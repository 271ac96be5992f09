//! Create/list/get handlers shared by every registered record type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::utils::{ValidatedJson, ValidatedQuery};
use validator::Validate;

use crate::models::Record;
use crate::services::{clamp_limit, identifier, to_output, to_storable, SerializedDocument};
use crate::startup::AppState;

/// Out-of-range limits are clamped, not rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct ListParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[tracing::instrument(skip_all)]
pub async fn create_record<T: Record>(
    State(state): State<AppState>,
    ValidatedJson(record): ValidatedJson<T>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let kind = T::DESCRIPTOR.collection();
    let document = to_storable(&record)?;

    let id = state.store.insert(&kind, document).await?;

    tracing::info!(kind = %kind, id = %id, "Record created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[tracing::instrument(skip(state))]
pub async fn list_records<T: Record>(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListParams>,
) -> Result<Json<Vec<SerializedDocument>>, AppError> {
    let kind = T::DESCRIPTOR.collection();
    let limit = clamp_limit(params.limit);

    let documents = state.store.list(&kind, doc! {}, limit).await?;

    tracing::debug!(kind = %kind, limit, count = documents.len(), "Records listed");
    Ok(Json(documents.into_iter().map(to_output).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn get_record<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SerializedDocument>, AppError> {
    let kind = T::DESCRIPTOR.collection();
    let oid = identifier::decode(&id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid {} id", kind)))?;

    let document = state
        .store
        .find_by_id(&kind, oid)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("{} not found", T::DESCRIPTOR.name)))?;

    Ok(Json(to_output(document)))
}
