use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A registered racing entrant. Identity and approval status outlive any
/// particular race; `race_order` is stamped exactly once, at order lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BullPair {
    pub id: Uuid,
    pub pair_name: String,
    pub owner_name_1: String,
    pub owner_name_2: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
    pub category_id: Uuid,
    pub status: RegistrationStatus,
    pub registration_order: Option<u32>,
    pub race_order: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}
