use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One completed (or final partial) distance/time increment for a race
/// entry. Immutable once created; corrections are new laps, not edits.
///
/// `distance_covered_m` is the authoritative stored distance. The override
/// triple keeps the operator's raw meters/feet/inches entry so the displayed
/// breakdown stays reproducible; feet and inches never feed the ranked sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Lap {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub lap_number: u32,
    pub lap_time_ms: i64,
    pub total_time_ms: i64,
    pub distance_covered_m: i32,
    pub override_meters: Option<i32>,
    pub override_feet: Option<i32>,
    pub override_inches: Option<i32>,
    pub created_at: DateTime<Utc>,
}
