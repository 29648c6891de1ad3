use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::engine::ledger::LapRecord;
use crate::error::Result;
use crate::models::Lap;
use crate::store::{DocumentStore, collections};

use super::{decode_all, read_or_empty};

pub struct LapRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> LapRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list_by_entry(&self, entry_id: Uuid) -> Result<Vec<Lap>> {
        let docs = read_or_empty(
            self.store
                .query(collections::LAPS, "entry_id", &json!(entry_id))
                .await,
        )?;
        let mut laps: Vec<Lap> = decode_all(docs)?;
        laps.sort_by_key(|l| l.lap_number);
        Ok(laps)
    }

    /// Persist a ledger record. Zero feet/inches components are stored as
    /// absent, matching the wire format for overrides.
    pub async fn create(&self, entry_id: Uuid, record: &LapRecord) -> Result<Lap> {
        let lap = Lap {
            id: Uuid::new_v4(),
            entry_id,
            lap_number: record.lap_number,
            lap_time_ms: record.lap_time_ms,
            total_time_ms: record.total_time_ms,
            distance_covered_m: record.distance_covered_m,
            override_meters: record.override_distance.map(|o| o.meters),
            override_feet: record
                .override_distance
                .and_then(|o| (o.feet > 0).then_some(o.feet)),
            override_inches: record
                .override_distance
                .and_then(|o| (o.inches > 0).then_some(o.inches)),
            created_at: Utc::now(),
        };
        self.store
            .put(collections::LAPS, lap.id, serde_json::to_value(&lap)?)
            .await?;
        Ok(lap)
    }
}
