use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Race, RaceEntry, RaceStatus, RunStatus};
use crate::store::{DocumentStore, collections};

use super::{decode, decode_all, read_or_empty, read_or_missing};

/// Races and their entries. A race exclusively owns its entries, so both
/// live behind the same repository.
pub struct RaceRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RaceRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Race>> {
        let docs = read_or_empty(self.store.list_all(collections::RACES).await)?;
        decode_all(docs)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Race> {
        read_or_missing(self.store.get(collections::RACES, id).await)?
            .map(decode)
            .transpose()?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_category(&self, category_id: Uuid) -> Result<Option<Race>> {
        let docs = read_or_empty(
            self.store
                .query(collections::RACES, "category_id", &json!(category_id))
                .await,
        )?;
        Ok(decode_all::<Race>(docs)?.into_iter().next())
    }

    pub async fn create(&self, category_id: Uuid) -> Result<Race> {
        let race = Race {
            id: Uuid::new_v4(),
            category_id,
            status: RaceStatus::Upcoming,
            is_order_locked: false,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
        };
        self.put(&race).await?;
        Ok(race)
    }

    /// Stamps `started_at`/`completed_at` alongside the matching transition;
    /// both are set at most once.
    pub async fn set_status(&self, id: Uuid, status: RaceStatus) -> Result<Race> {
        let mut race = self.find_by_id(id).await?;
        race.status = status;
        match status {
            RaceStatus::InProgress if race.started_at.is_none() => {
                race.started_at = Some(Utc::now());
            }
            RaceStatus::Completed if race.completed_at.is_none() => {
                race.completed_at = Some(Utc::now());
            }
            _ => {}
        }
        self.put(&race).await?;
        Ok(race)
    }

    /// One-way: locking flips the order flag and moves the race to
    /// in_progress atomically with respect to this document.
    pub async fn lock_order(&self, id: Uuid) -> Result<Race> {
        let mut race = self.find_by_id(id).await?;
        race.is_order_locked = true;
        race.status = RaceStatus::InProgress;
        race.started_at = Some(Utc::now());
        self.put(&race).await?;
        Ok(race)
    }

    pub async fn entries_by_race(&self, race_id: Uuid) -> Result<Vec<RaceEntry>> {
        let docs = read_or_empty(
            self.store
                .query(collections::RACE_ENTRIES, "race_id", &json!(race_id))
                .await,
        )?;
        let mut entries: Vec<RaceEntry> = decode_all(docs)?;
        entries.sort_by_key(|e| e.race_order);
        Ok(entries)
    }

    pub async fn list_entries(&self) -> Result<Vec<RaceEntry>> {
        let docs = read_or_empty(self.store.list_all(collections::RACE_ENTRIES).await)?;
        decode_all(docs)
    }

    pub async fn find_entry(&self, id: Uuid) -> Result<RaceEntry> {
        read_or_missing(self.store.get(collections::RACE_ENTRIES, id).await)?
            .map(decode)
            .transpose()?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create_entry(
        &self,
        race_id: Uuid,
        pair_id: Uuid,
        race_order: u32,
    ) -> Result<RaceEntry> {
        let entry = RaceEntry {
            id: Uuid::new_v4(),
            race_id,
            pair_id,
            race_order,
            status: RunStatus::Waiting,
            started_at: None,
            ended_at: None,
            total_time_ms: None,
        };
        self.put_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn update_entry(&self, entry: &RaceEntry) -> Result<()> {
        self.put_entry(entry).await
    }

    async fn put(&self, race: &Race) -> Result<()> {
        self.store
            .put(collections::RACES, race.id, serde_json::to_value(race)?)
            .await
    }

    async fn put_entry(&self, entry: &RaceEntry) -> Result<()> {
        self.store
            .put(
                collections::RACE_ENTRIES,
                entry.id,
                serde_json::to_value(entry)?,
            )
            .await
    }
}
