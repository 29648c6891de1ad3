use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A race class with a fixed maximum duration and per-lap distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub category_type: String,
    pub race_date: NaiveDate,
    pub race_end_date: Option<NaiveDate>,
    pub max_duration_secs: u32,
    pub lap_distance_m: u32,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn max_duration_ms(&self) -> i64 {
        i64::from(self.max_duration_secs) * 1000
    }
}
