use chrono::Datelike;
use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardRow;
use crate::error::{Result, StorageError};
use crate::models::{BullPair, Lap, RaceEntry, RaceStatus, RunStatus};
use crate::repository::{LapRepository, PairRepository, RaceRepository};
use crate::store::DocumentStore;

/// Absorbs floating-point summation noise on the distance key before the
/// ordering falls through to the time tiebreak.
pub const DISTANCE_TOLERANCE_M: f64 = 0.01;

/// Sort and rank leaderboard rows: primary descending total distance,
/// secondary ascending total time. A pair that covered more distance always
/// outranks a merely faster one; speed only breaks ties within equal
/// distance. Ranks are dense and consecutive, ties included.
pub fn rank(mut rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    rows.sort_by(|a, b| {
        if (a.total_distance_m - b.total_distance_m).abs() > DISTANCE_TOLERANCE_M {
            b.total_distance_m.total_cmp(&a.total_distance_m)
        } else {
            a.total_time_ms.cmp(&b.total_time_ms)
        }
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}

/// Live leaderboard over every race entry, optionally filtered to one
/// category. In-progress runs contribute the sum of their recorded laps.
pub async fn live(
    store: &dyn DocumentStore,
    category_id: Option<Uuid>,
) -> Result<Vec<LeaderboardRow>> {
    let races = RaceRepository::new(store);
    let pairs = PairRepository::new(store);
    let laps_repo = LapRepository::new(store);

    let mut rows = Vec::new();
    for entry in races.list_entries().await? {
        let Some(pair) = resolve_pair(&pairs, &entry).await? else {
            continue;
        };
        if category_id.is_some_and(|id| pair.category_id != id) {
            continue;
        }
        let laps = laps_repo.list_by_entry(entry.id).await?;
        let total_time_ms = entry
            .total_time_ms
            .unwrap_or_else(|| laps.iter().map(|l| l.lap_time_ms).sum());
        rows.push(build_row(
            &entry,
            &pair,
            &laps,
            total_time_ms,
            entry.status == RunStatus::Racing,
        ));
    }
    Ok(rank(rows))
}

/// Historical results: entries of races completed in the given calendar
/// year, ranked by the same distance-then-time ordering as the live view.
pub async fn history(
    store: &dyn DocumentStore,
    year: i32,
    category_id: Option<Uuid>,
) -> Result<Vec<LeaderboardRow>> {
    let races = RaceRepository::new(store);
    let pairs = PairRepository::new(store);
    let laps_repo = LapRepository::new(store);

    let mut rows = Vec::new();
    for race in races.list().await? {
        if race.status != RaceStatus::Completed {
            continue;
        }
        if !race.completed_at.is_some_and(|at| at.year() == year) {
            continue;
        }
        if category_id.is_some_and(|id| race.category_id != id) {
            continue;
        }
        for entry in races.entries_by_race(race.id).await? {
            let Some(pair) = resolve_pair(&pairs, &entry).await? else {
                continue;
            };
            let laps = laps_repo.list_by_entry(entry.id).await?;
            let total_time_ms = entry.total_time_ms.unwrap_or(0);
            rows.push(build_row(&entry, &pair, &laps, total_time_ms, false));
        }
    }
    Ok(rank(rows))
}

/// A partial leaderboard beats a failed one: entries whose pair no longer
/// resolves are skipped, not fatal.
async fn resolve_pair(
    pairs: &PairRepository<'_>,
    entry: &RaceEntry,
) -> Result<Option<BullPair>> {
    match pairs.find_by_id(entry.pair_id).await {
        Ok(pair) => Ok(Some(pair)),
        Err(StorageError::NotFound) => {
            tracing::warn!(
                entry_id = %entry.id,
                pair_id = %entry.pair_id,
                "skipping leaderboard row: pair does not resolve"
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn build_row(
    entry: &RaceEntry,
    pair: &BullPair,
    laps: &[Lap],
    total_time_ms: i64,
    is_racing: bool,
) -> LeaderboardRow {
    // Ranked distance sums the authoritative stored meters; the feet/inches
    // override components are display-only precision.
    let total_distance_m = laps.iter().map(|l| f64::from(l.distance_covered_m)).sum();
    LeaderboardRow {
        rank: 0,
        pair_id: entry.pair_id,
        pair_name: pair.pair_name.clone(),
        owner_name_1: pair.owner_name_1.clone(),
        owner_name_2: pair.owner_name_2.clone(),
        total_time_ms,
        lap_count: laps.len() as u32,
        total_distance_m,
        is_racing,
    }
}
