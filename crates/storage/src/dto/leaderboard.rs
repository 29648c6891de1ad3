use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Restrict to one category; absent means all categories.
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Calendar year the races completed in.
    pub year: i32,
    pub category_id: Option<Uuid>,
}

/// One ranked leaderboard row. Derived on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub pair_id: Uuid,
    pub pair_name: String,
    pub owner_name_1: String,
    pub owner_name_2: Option<String>,
    pub total_time_ms: i64,
    pub lap_count: u32,
    pub total_distance_m: f64,
    pub is_racing: bool,
}
