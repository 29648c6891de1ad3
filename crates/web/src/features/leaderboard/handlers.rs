use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::leaderboard::{HistoryQuery, LeaderboardQuery, LeaderboardRow},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked standings, distance first then time", body = Vec<LeaderboardRow>)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    let rows = services::live(db.store(), query.category_id).await?;

    Ok(Json(rows).into_response())
}

#[utoipa::path(
    get,
    path = "/api/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Standings of races completed in the given year", body = Vec<LeaderboardRow>)
    ),
    tag = "leaderboard"
)]
pub async fn get_history(
    State(db): State<Database>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, WebError> {
    let rows = services::history(db.store(), query.year, query.category_id).await?;

    Ok(Json(rows).into_response())
}
