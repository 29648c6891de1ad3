use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::pair::{CreatePairRequest, PairListQuery, UpdatePairStatusRequest},
    models::BullPair,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/bull-pairs",
    params(PairListQuery),
    responses(
        (status = 200, description = "List registered pairs in registration order", body = Vec<BullPair>)
    ),
    tag = "bull-pairs"
)]
pub async fn list_pairs(
    State(db): State<Database>,
    Query(query): Query<PairListQuery>,
) -> Result<Response, WebError> {
    let pairs = services::list_pairs(db.store(), query.category_id).await?;

    Ok(Json(pairs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/bull-pairs/{id}",
    params(
        ("id" = Uuid, Path, description = "Pair id")
    ),
    responses(
        (status = 200, description = "Pair found", body = BullPair),
        (status = 404, description = "Pair not found")
    ),
    tag = "bull-pairs"
)]
pub async fn get_pair(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let pair = services::get_pair(db.store(), id).await?;

    Ok(Json(pair).into_response())
}

#[utoipa::path(
    post,
    path = "/api/bull-pairs",
    request_body = CreatePairRequest,
    responses(
        (status = 201, description = "Pair registered", body = BullPair),
        (status = 400, description = "Validation error")
    ),
    tag = "bull-pairs"
)]
pub async fn create_pair(
    State(db): State<Database>,
    Json(req): Json<CreatePairRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let pair = services::create_pair(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(pair)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/bull-pairs/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Pair id")
    ),
    request_body = UpdatePairStatusRequest,
    responses(
        (status = 200, description = "Registration status updated", body = BullPair),
        (status = 404, description = "Pair not found")
    ),
    tag = "bull-pairs"
)]
pub async fn update_pair_status(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePairStatusRequest>,
) -> Result<Response, WebError> {
    let pair = services::set_pair_status(db.store(), id, req.status).await?;

    Ok(Json(pair).into_response())
}
