use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::entry::{FinishEntryRequest, RecordLapRequest},
    models::{Lap, RaceEntry},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/race-entries/{id}/begin",
    params(
        ("id" = Uuid, Path, description = "Race entry id")
    ),
    responses(
        (status = 200, description = "Entrant is on the clock", body = RaceEntry),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry not waiting, or another entrant is racing")
    ),
    tag = "race-entries"
)]
pub async fn begin_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let entry = services::begin_entry(db.store(), id).await?;

    Ok(Json(entry).into_response())
}

#[utoipa::path(
    post,
    path = "/api/race-entries/{id}/laps",
    params(
        ("id" = Uuid, Path, description = "Race entry id")
    ),
    request_body = RecordLapRequest,
    responses(
        (status = 201, description = "Lap recorded", body = Lap),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry is not racing")
    ),
    tag = "race-entries"
)]
pub async fn record_lap(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordLapRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let lap = services::record_lap(db.store(), id, &req).await?;

    Ok((StatusCode::CREATED, Json(lap)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/race-entries/{id}/laps",
    params(
        ("id" = Uuid, Path, description = "Race entry id")
    ),
    responses(
        (status = 200, description = "Laps in lap order", body = Vec<Lap>)
    ),
    tag = "race-entries"
)]
pub async fn list_laps(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let laps = services::list_laps(db.store(), id).await?;

    Ok(Json(laps).into_response())
}

#[utoipa::path(
    post,
    path = "/api/race-entries/{id}/finish",
    params(
        ("id" = Uuid, Path, description = "Race entry id")
    ),
    request_body = FinishEntryRequest,
    responses(
        (status = 200, description = "Run completed", body = RaceEntry),
        (status = 400, description = "Missing final-lap distance"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry is not racing")
    ),
    tag = "race-entries"
)]
pub async fn finish_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<FinishEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::finish_entry(db.store(), id, &req).await?;

    Ok(Json(entry).into_response())
}
