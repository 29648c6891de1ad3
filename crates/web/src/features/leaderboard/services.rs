use storage::{
    dto::leaderboard::LeaderboardRow, error::Result, services::leaderboard,
    store::DocumentStore,
};
use uuid::Uuid;

/// Live standings across every entry
pub async fn live(
    store: &dyn DocumentStore,
    category_id: Option<Uuid>,
) -> Result<Vec<LeaderboardRow>> {
    leaderboard::live(store, category_id).await
}

/// Standings of races completed in the given year
pub async fn history(
    store: &dyn DocumentStore,
    year: i32,
    category_id: Option<Uuid>,
) -> Result<Vec<LeaderboardRow>> {
    leaderboard::history(store, year, category_id).await
}
