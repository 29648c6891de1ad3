use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{BullPair, Category, Lap, Race, RaceEntry, RaceStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRaceRequest {
    pub category_id: Uuid,
    /// Approved pairs in their intended running order.
    #[validate(length(min = 1))]
    pub ordered_pair_ids: Vec<Uuid>,
    /// Randomize the given order before locking.
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRaceStatusRequest {
    pub status: RaceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryDetail {
    pub entry: RaceEntry,
    pub pair: BullPair,
    pub laps: Vec<Lap>,
}

/// Full race state for rehydrating an operator console.
#[derive(Debug, Serialize, ToSchema)]
pub struct RaceDetailResponse {
    pub race: Race,
    pub category: Category,
    pub entries: Vec<EntryDetail>,
}
