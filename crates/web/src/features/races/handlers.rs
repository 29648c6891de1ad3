use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::race::{CreateRaceRequest, RaceDetailResponse, UpdateRaceStatusRequest},
    models::{Race, RaceEntry},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/races",
    responses(
        (status = 200, description = "List all races", body = Vec<Race>)
    ),
    tag = "races"
)]
pub async fn list_races(State(db): State<Database>) -> Result<Response, WebError> {
    let races = services::list_races(db.store()).await?;

    Ok(Json(races).into_response())
}

#[utoipa::path(
    get,
    path = "/api/races/{id}",
    params(
        ("id" = Uuid, Path, description = "Race id")
    ),
    responses(
        (status = 200, description = "Race found", body = Race),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn get_race(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let race = services::get_race(db.store(), id).await?;

    Ok(Json(race).into_response())
}

#[utoipa::path(
    post,
    path = "/api/races",
    request_body = CreateRaceRequest,
    responses(
        (status = 201, description = "Race created with a locked order", body = Race),
        (status = 400, description = "Validation error or unapproved pair"),
        (status = 404, description = "Category or pair not found"),
        (status = 409, description = "Category already has a locked race")
    ),
    tag = "races"
)]
pub async fn create_race(
    State(db): State<Database>,
    Json(req): Json<CreateRaceRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let race = services::create_race(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(race)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/races/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Race id")
    ),
    request_body = UpdateRaceStatusRequest,
    responses(
        (status = 200, description = "Race status updated", body = Race),
        (status = 404, description = "Race not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "races"
)]
pub async fn update_race_status(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRaceStatusRequest>,
) -> Result<Response, WebError> {
    let race = services::set_race_status(db.store(), id, req.status).await?;

    Ok(Json(race).into_response())
}

#[utoipa::path(
    get,
    path = "/api/races/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Race id")
    ),
    responses(
        (status = 200, description = "Entries in running order", body = Vec<RaceEntry>)
    ),
    tag = "races"
)]
pub async fn race_entries(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let entries = services::race_entries(db.store(), id).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/races/{id}/details",
    params(
        ("id" = Uuid, Path, description = "Race id")
    ),
    responses(
        (status = 200, description = "Race with category, entries, pairs and laps", body = RaceDetailResponse),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn race_details(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let details = services::race_details(db.store(), id).await?;

    Ok(Json(details).into_response())
}
