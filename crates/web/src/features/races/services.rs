use storage::{
    dto::race::{CreateRaceRequest, RaceDetailResponse},
    error::{RaceError, Result},
    models::{Race, RaceEntry, RaceStatus},
    repository::RaceRepository,
    services::{race_control, race_setup},
    store::DocumentStore,
};
use uuid::Uuid;

/// List all races
pub async fn list_races(store: &dyn DocumentStore) -> Result<Vec<Race>> {
    RaceRepository::new(store).list().await
}

/// Get one race by id
pub async fn get_race(store: &dyn DocumentStore, id: Uuid) -> Result<Race> {
    RaceRepository::new(store).find_by_id(id).await
}

/// Lock the entrant order and start a race
pub async fn create_race(
    store: &dyn DocumentStore,
    req: &CreateRaceRequest,
) -> std::result::Result<Race, RaceError> {
    race_setup::create_race(store, req.category_id, &req.ordered_pair_ids, req.shuffle).await
}

/// Explicit race lifecycle change
pub async fn set_race_status(
    store: &dyn DocumentStore,
    id: Uuid,
    status: RaceStatus,
) -> std::result::Result<Race, RaceError> {
    race_control::set_race_status(store, id, status).await
}

/// Entries of a race in running order
pub async fn race_entries(store: &dyn DocumentStore, race_id: Uuid) -> Result<Vec<RaceEntry>> {
    RaceRepository::new(store).entries_by_race(race_id).await
}

/// Race joined with its category, entries, pairs and laps
pub async fn race_details(
    store: &dyn DocumentStore,
    race_id: Uuid,
) -> std::result::Result<RaceDetailResponse, RaceError> {
    race_control::race_details(store, race_id).await
}
