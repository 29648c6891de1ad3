use std::collections::HashSet;

use uuid::Uuid;

use crate::engine::order::RaceOrderController;
use crate::error::RaceError;
use crate::models::{Race, RegistrationStatus};
use crate::repository::{CategoryRepository, PairRepository, RaceRepository};
use crate::store::DocumentStore;

use super::resolve_err;

/// Lock an ordered entrant list and start the race.
///
/// Validates the category and every pair (must resolve, be approved, and
/// belong to the category), refuses a second locked race per category,
/// optionally shuffles, then creates the race and its entries in sequence
/// and flips the race to in_progress. Entry creation is sequential and
/// best-effort; the store offers no transactions.
pub async fn create_race(
    store: &dyn DocumentStore,
    category_id: Uuid,
    ordered_pair_ids: &[Uuid],
    shuffle: bool,
) -> Result<Race, RaceError> {
    let categories = CategoryRepository::new(store);
    let pairs_repo = PairRepository::new(store);
    let races = RaceRepository::new(store);

    categories
        .find_by_id(category_id)
        .await
        .map_err(resolve_err(category_id))?;

    if let Some(existing) = races.find_by_category(category_id).await?
        && existing.is_order_locked
    {
        return Err(RaceError::AlreadyLocked);
    }

    // One entrant run per (race, pair).
    let mut seen = HashSet::with_capacity(ordered_pair_ids.len());
    let mut selected = Vec::with_capacity(ordered_pair_ids.len());
    for &pair_id in ordered_pair_ids {
        if !seen.insert(pair_id) {
            return Err(RaceError::DuplicatePair { id: pair_id });
        }
        let pair = pairs_repo
            .find_by_id(pair_id)
            .await
            .map_err(resolve_err(pair_id))?;
        if pair.status != RegistrationStatus::Approved || pair.category_id != category_id {
            return Err(RaceError::PairNotApproved { id: pair_id });
        }
        selected.push(pair);
    }

    let mut controller = RaceOrderController::new(selected);
    if shuffle {
        controller.shuffle(&mut rand::rng())?;
    }
    let ordering = controller.lock()?;

    let race = races.create(category_id).await?;
    for &(pair_id, race_order) in &ordering {
        races.create_entry(race.id, pair_id, race_order).await?;
        pairs_repo.set_race_order(pair_id, race_order).await?;
    }
    let race = races.lock_order(race.id).await?;

    tracing::info!(
        race_id = %race.id,
        %category_id,
        entrants = ordering.len(),
        "race order locked, race in progress"
    );
    Ok(race)
}
