//! CRUD handlers for `/records/{kind}`.
//!
//! The kind segment is resolved to a typed repository before anything else,
//! so an unknown kind is a 404 for every verb regardless of the body.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{
        BankCustomerPayload, CreatedResponse, MessageResponse, PatientPayload, RecordPayload,
        ReservationPayload, UpdateStatusRequest,
    },
    models::{QueueRecord, RecordKind},
    services::QueueRepository,
    startup::AppState,
};

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e.body_text())))
}

fn record_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(anyhow::anyhow!("Invalid record id")))
}

fn record_not_found(kind: RecordKind, id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No {} record with id {}", kind, id))
}

/// List every record of a kind, newest first.
pub async fn list_records(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, AppError> {
    let db = &state.db;
    match kind.parse::<RecordKind>()? {
        RecordKind::Patient => list(&db.patients()).await,
        RecordKind::Restaurant => list(&db.restaurants()).await,
        RecordKind::Bank => list(&db.banks()).await,
    }
}

async fn list<R: QueueRepository>(repo: &R) -> Result<Response, AppError> {
    let records = repo.list().await?;
    Ok(Json(records).into_response())
}

/// Create a record with the default status.
pub async fn create_record(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let kind = kind.parse::<RecordKind>()?;
    let body = json_body(body)?;
    let db = &state.db;
    match kind {
        RecordKind::Patient => create::<PatientPayload, _>(&db.patients(), body).await,
        RecordKind::Restaurant => create::<ReservationPayload, _>(&db.restaurants(), body).await,
        RecordKind::Bank => create::<BankCustomerPayload, _>(&db.banks(), body).await,
    }
}

async fn create<P, R>(repo: &R, body: Value) -> Result<Response, AppError>
where
    P: RecordPayload,
    R: QueueRepository<New = P::New>,
{
    let input = P::parse(body)?;
    let record = repo.insert(&input).await?;

    tracing::info!(kind = R::KIND.as_str(), id = record.id(), "Record created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: R::KIND.created_message().to_string(),
            id: record.id(),
        }),
    )
        .into_response())
}

/// Replace a record's contractual fields. Status and created_at are kept.
pub async fn update_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind = kind.parse::<RecordKind>()?;
    let id = record_id(&id)?;
    let body = json_body(body)?;
    let db = &state.db;
    match kind {
        RecordKind::Patient => update::<PatientPayload, _>(&db.patients(), id, body).await,
        RecordKind::Restaurant => {
            update::<ReservationPayload, _>(&db.restaurants(), id, body).await
        }
        RecordKind::Bank => update::<BankCustomerPayload, _>(&db.banks(), id, body).await,
    }
}

async fn update<P, R>(repo: &R, id: i64, body: Value) -> Result<Json<MessageResponse>, AppError>
where
    P: RecordPayload,
    R: QueueRepository<New = P::New>,
{
    let input = P::parse(body)?;
    repo.update(id, &input)
        .await?
        .ok_or_else(|| record_not_found(R::KIND, id))?;

    tracing::info!(kind = R::KIND.as_str(), id = id, "Record updated");

    Ok(Json(MessageResponse::new("Record updated successfully")))
}

/// Overwrite only the status of a record.
pub async fn update_status(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind = kind.parse::<RecordKind>()?;
    let id = record_id(&id)?;

    let request: UpdateStatusRequest = serde_json::from_value(json_body(body)?)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e)))?;
    request
        .validate()
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Status is required")))?;
    let status = request.status.unwrap_or_default();

    let db = &state.db;
    let found = match kind {
        RecordKind::Patient => patch_status(&db.patients(), id, &status).await?,
        RecordKind::Restaurant => patch_status(&db.restaurants(), id, &status).await?,
        RecordKind::Bank => patch_status(&db.banks(), id, &status).await?,
    };

    if !found {
        return Err(record_not_found(kind, id));
    }

    tracing::info!(kind = %kind, id = id, status = %status, "Record status updated");

    Ok(Json(MessageResponse::new("Status updated successfully")))
}

async fn patch_status<R: QueueRepository>(
    repo: &R,
    id: i64,
    status: &str,
) -> Result<bool, AppError> {
    Ok(repo.patch_status(id, status).await?.is_some())
}

/// Remove a record.
pub async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind = kind.parse::<RecordKind>()?;
    let id = record_id(&id)?;

    let db = &state.db;
    let deleted = match kind {
        RecordKind::Patient => db.patients().delete(id).await?,
        RecordKind::Restaurant => db.restaurants().delete(id).await?,
        RecordKind::Bank => db.banks().delete(id).await?,
    };

    if !deleted {
        return Err(record_not_found(kind, id));
    }

    tracing::info!(kind = %kind, id = id, "Record deleted");

    Ok(Json(MessageResponse::new("Record deleted successfully")))
}
