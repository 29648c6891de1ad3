use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Waiting,
    Racing,
    Completed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Racing => "racing",
            Self::Completed => "completed",
        }
    }
}

/// One pair's participation record within one race. Status only ever moves
/// forward: waiting -> racing -> completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RaceEntry {
    pub id: Uuid,
    pub race_id: Uuid,
    pub pair_id: Uuid,
    pub race_order: u32,
    pub status: RunStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub total_time_ms: Option<i64>,
}
