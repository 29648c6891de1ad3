use storage::{
    dto::entry::{FinishEntryRequest, RecordLapRequest},
    engine::ledger::DistanceOverride,
    error::{RaceError, Result},
    models::{Lap, RaceEntry},
    repository::LapRepository,
    services::race_control,
    store::DocumentStore,
};
use uuid::Uuid;

/// Put the entrant on the clock
pub async fn begin_entry(
    store: &dyn DocumentStore,
    entry_id: Uuid,
) -> std::result::Result<RaceEntry, RaceError> {
    race_control::begin_entry(store, entry_id).await
}

/// Record a lap, with an optional corrected distance
pub async fn record_lap(
    store: &dyn DocumentStore,
    entry_id: Uuid,
    req: &RecordLapRequest,
) -> std::result::Result<Lap, RaceError> {
    let distance = req.distance.map(DistanceOverride::from);
    race_control::record_entry_lap(store, entry_id, distance).await
}

/// Finish the run, on the operator's mark or at the time ceiling
pub async fn finish_entry(
    store: &dyn DocumentStore,
    entry_id: Uuid,
    req: &FinishEntryRequest,
) -> std::result::Result<RaceEntry, RaceError> {
    let distance = req.distance.map(DistanceOverride::from);
    race_control::finish_entry(store, entry_id, req.elapsed_ms, req.time_expired, distance).await
}

/// Laps of one entry in lap order
pub async fn list_laps(store: &dyn DocumentStore, entry_id: Uuid) -> Result<Vec<Lap>> {
    LapRepository::new(store).list_by_entry(entry_id).await
}
