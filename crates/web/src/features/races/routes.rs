use axum::{
    Router,
    routing::{get, patch, post},
};
use storage::Database;

use super::handlers::{
    create_race, get_race, list_races, race_details, race_entries, update_race_status,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_races))
        .route("/", post(create_race))
        .route("/:id", get(get_race))
        .route("/:id/status", patch(update_race_status))
        .route("/:id/entries", get(race_entries))
        .route("/:id/details", get(race_details))
}
