use chrono::Utc;
use uuid::Uuid;

use crate::dto::race::{EntryDetail, RaceDetailResponse};
use crate::engine::ledger::DistanceOverride;
use crate::engine::race as race_engine;
use crate::engine::run::{FinishOutcome, RunMachine};
use crate::error::{RaceError, StorageError};
use crate::models::{Category, Lap, Race, RaceEntry, RaceStatus, RunStatus};
use crate::repository::{CategoryRepository, LapRepository, PairRepository, RaceRepository};
use crate::store::DocumentStore;

use super::resolve_err;

struct LoadedRun {
    race: Race,
    entry: RaceEntry,
    machine: RunMachine,
}

impl LoadedRun {
    /// Timing operations only apply while the parent race is in progress;
    /// a completed race is terminal for every entry in it.
    fn ensure_race_open(&self, action: &'static str) -> Result<(), RaceError> {
        if self.race.status != RaceStatus::InProgress {
            return Err(RaceError::InvalidTransition {
                action,
                state: self.race.status.as_str(),
            });
        }
        Ok(())
    }
}

/// Rehydrate the run machine for one entry from persisted state. The
/// machine, not any cached timer, is the source of truth for elapsed time.
async fn load(store: &dyn DocumentStore, entry_id: Uuid) -> Result<LoadedRun, RaceError> {
    let races = RaceRepository::new(store);
    let entry = races
        .find_entry(entry_id)
        .await
        .map_err(resolve_err(entry_id))?;
    let race = races
        .find_by_id(entry.race_id)
        .await
        .map_err(resolve_err(entry.race_id))?;
    let category = CategoryRepository::new(store)
        .find_by_id(race.category_id)
        .await
        .map_err(resolve_err(race.category_id))?;
    let laps = LapRepository::new(store).list_by_entry(entry.id).await?;
    let machine = RunMachine::rehydrate(&entry, &laps, &category);
    Ok(LoadedRun {
        race,
        entry,
        machine,
    })
}

/// waiting -> racing for the current entrant. Only one entry may race at a
/// time within a race; the single-writer discipline hangs off this check.
pub async fn begin_entry(store: &dyn DocumentStore, entry_id: Uuid) -> Result<RaceEntry, RaceError> {
    let races = RaceRepository::new(store);
    let mut loaded = load(store, entry_id).await?;
    loaded.ensure_race_open("begin")?;

    let siblings = races.entries_by_race(loaded.entry.race_id).await?;
    if siblings
        .iter()
        .any(|e| e.id != entry_id && e.status == RunStatus::Racing)
    {
        return Err(RaceError::InvalidTransition {
            action: "begin",
            state: "racing",
        });
    }

    loaded.machine.begin(Utc::now())?;
    loaded.machine.apply_to(&mut loaded.entry);
    races.update_entry(&loaded.entry).await?;
    tracing::info!(%entry_id, race_id = %loaded.entry.race_id, "entrant run started");
    Ok(loaded.entry)
}

/// Record a lap for the racing entry. Without an override the lap scores
/// the category default distance; with one, the corrected distance.
pub async fn record_entry_lap(
    store: &dyn DocumentStore,
    entry_id: Uuid,
    distance: Option<DistanceOverride>,
) -> Result<Lap, RaceError> {
    let mut loaded = load(store, entry_id).await?;
    loaded.ensure_race_open("record_lap")?;
    let now = Utc::now();
    let record = match distance {
        Some(d) => loaded.machine.record_lap_with_override(now, d)?,
        None => loaded.machine.record_lap(now)?,
    };
    let lap = LapRepository::new(store).create(entry_id, &record).await?;
    tracing::debug!(%entry_id, lap_number = lap.lap_number, "lap recorded");
    Ok(lap)
}

/// Finish the racing entry, either on the operator's mark (with a measured
/// distance for the partial final lap) or because the clock ceiling forced
/// it. Exactly one final lap is appended and the run completes; when no
/// waiting entrants remain the race itself completes.
pub async fn finish_entry(
    store: &dyn DocumentStore,
    entry_id: Uuid,
    elapsed_ms: Option<i64>,
    time_expired: bool,
    distance: Option<DistanceOverride>,
) -> Result<RaceEntry, RaceError> {
    let races = RaceRepository::new(store);
    let mut loaded = load(store, entry_id).await?;
    loaded.ensure_race_open("finish")?;
    let now = Utc::now();

    let final_record = if time_expired {
        match loaded.machine.time_expired(now)? {
            FinishOutcome::Completed { final_lap, .. } => final_lap,
            FinishOutcome::AwaitingDistance(_) => return Err(RaceError::PendingDistance),
        }
    } else {
        match loaded.machine.finish(now, elapsed_ms)? {
            // Forced termination won the race against the manual finish.
            FinishOutcome::Completed { final_lap, .. } => final_lap,
            FinishOutcome::AwaitingDistance(_) => {
                let d = distance.ok_or(RaceError::PendingDistance)?;
                loaded.machine.confirm_distance(now, d)?
            }
        }
    };

    LapRepository::new(store)
        .create(entry_id, &final_record)
        .await?;
    loaded.machine.apply_to(&mut loaded.entry);
    races.update_entry(&loaded.entry).await?;
    tracing::info!(
        %entry_id,
        total_time_ms = loaded.entry.total_time_ms,
        laps = final_record.lap_number,
        "entrant run completed"
    );

    let entries = races.entries_by_race(loaded.entry.race_id).await?;
    if race_engine::is_complete(&entries)
        && loaded.race.status.can_transition(RaceStatus::Completed)
    {
        races
            .set_status(loaded.race.id, RaceStatus::Completed)
            .await?;
        tracing::info!(race_id = %loaded.race.id, "all entrants finished, race completed");
    }

    Ok(loaded.entry)
}

/// Explicit lifecycle change from the operator, checked against the
/// forward-only transition table.
pub async fn set_race_status(
    store: &dyn DocumentStore,
    race_id: Uuid,
    status: RaceStatus,
) -> Result<Race, RaceError> {
    let races = RaceRepository::new(store);
    let race = races
        .find_by_id(race_id)
        .await
        .map_err(resolve_err(race_id))?;
    if !race.status.can_transition(status) {
        return Err(RaceError::InvalidTransition {
            action: "change race status",
            state: race.status.as_str(),
        });
    }
    Ok(races.set_status(race_id, status).await?)
}

/// Full race state for rehydrating an operator console: race, category, and
/// every entry joined with its pair and laps. Entries whose pair no longer
/// resolves are skipped.
pub async fn race_details(
    store: &dyn DocumentStore,
    race_id: Uuid,
) -> Result<RaceDetailResponse, RaceError> {
    let races = RaceRepository::new(store);
    let pairs = PairRepository::new(store);
    let laps_repo = LapRepository::new(store);

    let race = races
        .find_by_id(race_id)
        .await
        .map_err(resolve_err(race_id))?;
    let category: Category = CategoryRepository::new(store)
        .find_by_id(race.category_id)
        .await
        .map_err(resolve_err(race.category_id))?;

    let mut entries = Vec::new();
    for entry in races.entries_by_race(race.id).await? {
        let pair = match pairs.find_by_id(entry.pair_id).await {
            Ok(p) => p,
            Err(StorageError::NotFound) => continue,
            Err(e) => return Err(e.into()),
        };
        let laps = laps_repo.list_by_entry(entry.id).await?;
        entries.push(EntryDetail { entry, pair, laps });
    }

    Ok(RaceDetailResponse {
        race,
        category,
        entries,
    })
}
