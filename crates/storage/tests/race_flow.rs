//! Full race-day flow over the in-memory store: register, approve, lock an
//! order, time every entrant, and read the standings.

use assert_matches::assert_matches;
use chrono::{Datelike, Utc};
use uuid::Uuid;

use storage::Database;
use storage::dto::category::CreateCategoryRequest;
use storage::dto::pair::CreatePairRequest;
use storage::engine::ledger::DistanceOverride;
use storage::error::RaceError;
use storage::models::{RaceStatus, RegistrationStatus, RunStatus};
use storage::repository::{CategoryRepository, LapRepository, PairRepository, RaceRepository};
use storage::services::{leaderboard, race_control, race_setup};

async fn seed_category(db: &Database) -> Uuid {
    CategoryRepository::new(db.store())
        .create(&CreateCategoryRequest {
            category_type: "Seniors".to_string(),
            race_date: Utc::now().date_naive(),
            race_end_date: None,
            max_duration_secs: 300,
            lap_distance_m: 100,
            created_by: None,
        })
        .await
        .unwrap()
        .id
}

async fn seed_pair(db: &Database, category_id: Uuid, name: &str) -> Uuid {
    PairRepository::new(db.store())
        .create(&CreatePairRequest {
            pair_name: name.to_string(),
            owner_name_1: format!("{name} owner"),
            owner_name_2: None,
            phone_number: "0612345678".to_string(),
            email: None,
            category_id,
        })
        .await
        .unwrap()
        .id
}

async fn approve(db: &Database, pair_id: Uuid) {
    PairRepository::new(db.store())
        .set_status(pair_id, RegistrationStatus::Approved)
        .await
        .unwrap();
}

#[tokio::test]
async fn race_day_from_registration_to_standings() {
    let db = Database::in_memory();
    let category_id = seed_category(&db).await;

    let alpha = seed_pair(&db, category_id, "Alpha").await;
    let bravo = seed_pair(&db, category_id, "Bravo").await;
    let charlie = seed_pair(&db, category_id, "Charlie").await;

    // Registrations start pending; an unapproved pair cannot enter a race.
    approve(&db, alpha).await;
    approve(&db, bravo).await;
    assert_matches!(
        race_setup::create_race(db.store(), category_id, &[alpha, bravo, charlie], false).await,
        Err(RaceError::PairNotApproved { id }) if id == charlie
    );
    approve(&db, charlie).await;

    let race = race_setup::create_race(db.store(), category_id, &[alpha, bravo, charlie], false)
        .await
        .unwrap();
    assert!(race.is_order_locked);
    assert_eq!(race.status, RaceStatus::InProgress);
    assert!(race.started_at.is_some());

    let races = RaceRepository::new(db.store());
    let entries = races.entries_by_race(race.id).await.unwrap();
    assert_eq!(entries.len(), 3);
    let orders: Vec<u32> = entries.iter().map(|e| e.race_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    let pair_seq: Vec<Uuid> = entries.iter().map(|e| e.pair_id).collect();
    assert_eq!(pair_seq, vec![alpha, bravo, charlie]);

    // One locked race per category.
    assert_matches!(
        race_setup::create_race(db.store(), category_id, &[alpha], false).await,
        Err(RaceError::AlreadyLocked)
    );

    // Alpha runs two full laps and finishes at 3:30 with a 40 m final lap.
    let alpha_entry = entries[0].id;
    let started = race_control::begin_entry(db.store(), alpha_entry).await.unwrap();
    assert_eq!(started.status, RunStatus::Racing);

    // Only one entrant may be on the clock.
    assert_matches!(
        race_control::begin_entry(db.store(), entries[1].id).await,
        Err(RaceError::InvalidTransition {
            action: "begin",
            state: "racing"
        })
    );

    race_control::record_entry_lap(db.store(), alpha_entry, None)
        .await
        .unwrap();
    race_control::record_entry_lap(db.store(), alpha_entry, None)
        .await
        .unwrap();

    // A finish without the measured distance leaves the run open.
    assert_matches!(
        race_control::finish_entry(db.store(), alpha_entry, Some(210_000), false, None).await,
        Err(RaceError::PendingDistance)
    );
    let finished = race_control::finish_entry(
        db.store(),
        alpha_entry,
        Some(210_000),
        false,
        Some(DistanceOverride {
            meters: 40,
            feet: 0,
            inches: 0,
        }),
    )
    .await
    .unwrap();
    assert_eq!(finished.status, RunStatus::Completed);
    assert_eq!(finished.total_time_ms, Some(210_000));

    let alpha_laps = LapRepository::new(db.store())
        .list_by_entry(alpha_entry)
        .await
        .unwrap();
    assert_eq!(alpha_laps.len(), 3);
    assert_eq!(alpha_laps[2].distance_covered_m, 40);
    assert_eq!(alpha_laps[2].total_time_ms, 210_000);

    // Bravo hits the time ceiling mid-lap: the run completes at exactly the
    // category maximum with a default-distance final lap.
    let bravo_entry = entries[1].id;
    race_control::begin_entry(db.store(), bravo_entry).await.unwrap();
    let expired = race_control::finish_entry(db.store(), bravo_entry, None, true, None)
        .await
        .unwrap();
    assert_eq!(expired.total_time_ms, Some(300_000));
    let bravo_laps = LapRepository::new(db.store())
        .list_by_entry(bravo_entry)
        .await
        .unwrap();
    assert_eq!(bravo_laps.len(), 1);
    assert_eq!(bravo_laps[0].distance_covered_m, 100);

    // Charlie records a corrected lap distance, then stalls: five meters
    // plus two feet six inches stores the components but ranks as 5 m.
    let charlie_entry = entries[2].id;
    race_control::begin_entry(db.store(), charlie_entry).await.unwrap();
    race_control::record_entry_lap(
        db.store(),
        charlie_entry,
        Some(DistanceOverride {
            meters: 5,
            feet: 2,
            inches: 6,
        }),
    )
    .await
    .unwrap();
    race_control::finish_entry(
        db.store(),
        charlie_entry,
        Some(250_000),
        false,
        Some(DistanceOverride {
            meters: 0,
            feet: 0,
            inches: 0,
        }),
    )
    .await
    .unwrap();

    let charlie_laps = LapRepository::new(db.store())
        .list_by_entry(charlie_entry)
        .await
        .unwrap();
    assert_eq!(charlie_laps[0].distance_covered_m, 5);
    assert_eq!(charlie_laps[0].override_meters, Some(5));
    assert_eq!(charlie_laps[0].override_feet, Some(2));
    assert_eq!(charlie_laps[0].override_inches, Some(6));

    // All entrants done: the race completed on the last finish.
    let race = races.find_by_id(race.id).await.unwrap();
    assert_eq!(race.status, RaceStatus::Completed);
    assert!(race.completed_at.is_some());

    // Standings: distance first, time only breaks ties.
    let board = leaderboard::live(db.store(), Some(category_id)).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].pair_id, alpha);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].total_distance_m, 240.0);
    assert_eq!(board[0].lap_count, 3);
    assert_eq!(board[1].pair_id, bravo);
    assert_eq!(board[1].total_distance_m, 100.0);
    assert_eq!(board[2].pair_id, charlie);
    assert_eq!(board[2].total_distance_m, 5.0);

    // History for the completion year shows the same rows, same order.
    let year = Utc::now().year();
    let history = leaderboard::history(db.store(), year, Some(category_id))
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].pair_id, alpha);
    assert!(history.iter().all(|r| !r.is_racing));

    let empty = leaderboard::history(db.store(), year - 1, None).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn duplicate_pairs_cannot_enter_the_same_race() {
    let db = Database::in_memory();
    let category_id = seed_category(&db).await;
    let alpha = seed_pair(&db, category_id, "Alpha").await;
    approve(&db, alpha).await;

    // One entrant run per (race, pair): a repeated id never creates a
    // second run or a second leaderboard row.
    assert_matches!(
        race_setup::create_race(db.store(), category_id, &[alpha, alpha], false).await,
        Err(RaceError::DuplicatePair { id }) if id == alpha
    );
    assert!(RaceRepository::new(db.store()).list().await.unwrap().is_empty());
}

#[tokio::test]
async fn completed_race_is_terminal_for_its_entries() {
    let db = Database::in_memory();
    let category_id = seed_category(&db).await;
    let alpha = seed_pair(&db, category_id, "Alpha").await;
    let bravo = seed_pair(&db, category_id, "Bravo").await;
    approve(&db, alpha).await;
    approve(&db, bravo).await;

    let race = race_setup::create_race(db.store(), category_id, &[alpha, bravo], false)
        .await
        .unwrap();
    let entries = RaceRepository::new(db.store())
        .entries_by_race(race.id)
        .await
        .unwrap();

    let first = entries[0].id;
    race_control::begin_entry(db.store(), first).await.unwrap();

    // The operator closes the race early, with an entrant still waiting.
    race_control::set_race_status(db.store(), race.id, RaceStatus::Completed)
        .await
        .unwrap();

    assert_matches!(
        race_control::begin_entry(db.store(), entries[1].id).await,
        Err(RaceError::InvalidTransition {
            action: "begin",
            state: "completed"
        })
    );
    assert_matches!(
        race_control::record_entry_lap(db.store(), first, None).await,
        Err(RaceError::InvalidTransition {
            action: "record_lap",
            state: "completed"
        })
    );
    assert_matches!(
        race_control::finish_entry(db.store(), first, Some(10_000), false, None).await,
        Err(RaceError::InvalidTransition {
            action: "finish",
            state: "completed"
        })
    );
}

#[tokio::test]
async fn race_needs_at_least_one_entrant() {
    let db = Database::in_memory();
    let category_id = seed_category(&db).await;
    assert_matches!(
        race_setup::create_race(db.store(), category_id, &[], false).await,
        Err(RaceError::EmptyRace)
    );
}

#[tokio::test]
async fn shuffled_race_keeps_every_entrant_exactly_once() {
    let db = Database::in_memory();
    let category_id = seed_category(&db).await;

    let mut ids = Vec::new();
    for i in 0..8 {
        let id = seed_pair(&db, category_id, &format!("Pair {i}")).await;
        approve(&db, id).await;
        ids.push(id);
    }

    let race = race_setup::create_race(db.store(), category_id, &ids, true)
        .await
        .unwrap();
    let entries = RaceRepository::new(db.store())
        .entries_by_race(race.id)
        .await
        .unwrap();

    let mut seen: Vec<Uuid> = entries.iter().map(|e| e.pair_id).collect();
    seen.sort();
    let mut expected = ids.clone();
    expected.sort();
    assert_eq!(seen, expected);
    let orders: Vec<u32> = entries.iter().map(|e| e.race_order).collect();
    assert_eq!(orders, (1..=8).collect::<Vec<u32>>());
}

#[tokio::test]
async fn unknown_references_surface_as_missing() {
    let db = Database::in_memory();
    let ghost = Uuid::new_v4();
    assert_matches!(
        race_control::begin_entry(db.store(), ghost).await,
        Err(RaceError::MissingReference { id }) if id == ghost
    );
    assert_matches!(
        race_setup::create_race(db.store(), ghost, &[ghost], false).await,
        Err(RaceError::MissingReference { id }) if id == ghost
    );
}
