use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{begin_entry, finish_entry, list_laps, record_lap};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:id/begin", post(begin_entry))
        .route("/:id/laps", post(record_lap))
        .route("/:id/laps", get(list_laps))
        .route("/:id/finish", post(finish_entry))
}
