use axum::{Json, Router, routing::get};
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

pub mod config;
pub mod error;
pub mod features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::categories::handlers::list_categories,
        features::categories::handlers::get_category,
        features::categories::handlers::create_category,
        features::categories::handlers::update_category,
        features::categories::handlers::delete_category,
        features::registrations::handlers::list_pairs,
        features::registrations::handlers::get_pair,
        features::registrations::handlers::create_pair,
        features::registrations::handlers::update_pair_status,
        features::races::handlers::list_races,
        features::races::handlers::get_race,
        features::races::handlers::create_race,
        features::races::handlers::update_race_status,
        features::races::handlers::race_entries,
        features::races::handlers::race_details,
        features::entries::handlers::begin_entry,
        features::entries::handlers::record_lap,
        features::entries::handlers::list_laps,
        features::entries::handlers::finish_entry,
        features::leaderboard::handlers::get_leaderboard,
        features::leaderboard::handlers::get_history,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::UpdateCategoryRequest,
            storage::dto::pair::CreatePairRequest,
            storage::dto::pair::UpdatePairStatusRequest,
            storage::dto::race::CreateRaceRequest,
            storage::dto::race::UpdateRaceStatusRequest,
            storage::dto::race::RaceDetailResponse,
            storage::dto::race::EntryDetail,
            storage::dto::entry::DistanceOverrideRequest,
            storage::dto::entry::RecordLapRequest,
            storage::dto::entry::FinishEntryRequest,
            storage::dto::leaderboard::LeaderboardRow,
            storage::models::Category,
            storage::models::BullPair,
            storage::models::RegistrationStatus,
            storage::models::Race,
            storage::models::RaceStatus,
            storage::models::RaceEntry,
            storage::models::RunStatus,
            storage::models::Lap,
        )
    ),
    tags(
        (name = "categories", description = "Race category endpoints"),
        (name = "bull-pairs", description = "Pair registration endpoints"),
        (name = "races", description = "Race lifecycle endpoints"),
        (name = "race-entries", description = "Entrant timing endpoints"),
        (name = "leaderboard", description = "Standings endpoints"),
    )
)]
pub struct ApiDoc;

/// Assemble the full API router over one database handle.
pub fn app(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    Router::new()
        .nest("/api/categories", features::categories::routes::routes())
        .nest("/api/bull-pairs", features::registrations::routes::routes())
        .nest("/api/races", features::races::routes::routes())
        .nest("/api/race-entries", features::entries::routes::routes())
        .nest("/api", features::leaderboard::routes::routes())
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .layer(cors)
        .with_state(db)
}
