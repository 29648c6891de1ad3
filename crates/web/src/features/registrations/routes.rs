use axum::{
    Router,
    routing::{get, patch, post},
};
use storage::Database;

use super::handlers::{create_pair, get_pair, list_pairs, update_pair_status};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_pairs))
        .route("/", post(create_pair))
        .route("/:id", get(get_pair))
        .route("/:id/status", patch(update_pair_status))
}
