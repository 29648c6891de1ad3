use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
    Upcoming,
    InProgress,
    Completed,
}

impl RaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Lifecycle legality: upcoming -> in_progress -> completed, no skips,
    /// never backward.
    pub fn can_transition(self, next: RaceStatus) -> bool {
        matches!(
            (self, next),
            (Self::Upcoming, Self::InProgress) | (Self::InProgress, Self::Completed)
        )
    }
}

/// One run of a category through all its approved, ordered pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Race {
    pub id: Uuid,
    pub category_id: Uuid,
    pub status: RaceStatus,
    pub is_order_locked: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
