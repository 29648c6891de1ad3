use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::dto::pair::CreatePairRequest;
use crate::error::{Result, StorageError};
use crate::models::{BullPair, RegistrationStatus};
use crate::store::{DocumentStore, collections};

use super::{decode, decode_all, read_or_empty, read_or_missing};

pub struct PairRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PairRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<BullPair>> {
        let docs = read_or_empty(self.store.list_all(collections::BULL_PAIRS).await)?;
        Ok(sorted_by_registration(decode_all(docs)?))
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<BullPair>> {
        let docs = read_or_empty(
            self.store
                .query(collections::BULL_PAIRS, "category_id", &json!(category_id))
                .await,
        )?;
        Ok(sorted_by_registration(decode_all(docs)?))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<BullPair> {
        read_or_missing(self.store.get(collections::BULL_PAIRS, id).await)?
            .map(decode)
            .transpose()?
            .ok_or(StorageError::NotFound)
    }

    /// Create a pending registration with the next registration sequence
    /// number within its category.
    pub async fn create(&self, req: &CreatePairRequest) -> Result<BullPair> {
        let siblings = self.list_by_category(req.category_id).await?;
        let next_order = siblings
            .iter()
            .filter_map(|p| p.registration_order)
            .max()
            .unwrap_or(0)
            + 1;

        let pair = BullPair {
            id: Uuid::new_v4(),
            pair_name: req.pair_name.clone(),
            owner_name_1: req.owner_name_1.clone(),
            owner_name_2: req.owner_name_2.clone(),
            phone_number: req.phone_number.clone(),
            email: req.email.clone(),
            category_id: req.category_id,
            status: RegistrationStatus::Pending,
            registration_order: Some(next_order),
            race_order: None,
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        };
        self.put(&pair).await?;
        Ok(pair)
    }

    pub async fn set_status(&self, id: Uuid, status: RegistrationStatus) -> Result<BullPair> {
        let mut pair = self.find_by_id(id).await?;
        pair.status = status;
        pair.modified_at = Some(Utc::now());
        self.put(&pair).await?;
        Ok(pair)
    }

    pub async fn set_race_order(&self, id: Uuid, race_order: u32) -> Result<BullPair> {
        let mut pair = self.find_by_id(id).await?;
        pair.race_order = Some(race_order);
        pair.modified_at = Some(Utc::now());
        self.put(&pair).await?;
        Ok(pair)
    }

    async fn put(&self, pair: &BullPair) -> Result<()> {
        self.store
            .put(collections::BULL_PAIRS, pair.id, serde_json::to_value(pair)?)
            .await
    }
}

fn sorted_by_registration(mut pairs: Vec<BullPair>) -> Vec<BullPair> {
    pairs.sort_by_key(|p| p.registration_order.unwrap_or(0));
    pairs
}
