use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::RegistrationStatus;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PairListQuery {
    /// Restrict to one category; absent means all pairs.
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePairRequest {
    #[validate(length(min = 1, max = 100))]
    pub pair_name: String,
    #[validate(length(min = 1, max = 100))]
    pub owner_name_1: String,
    pub owner_name_2: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub phone_number: String,
    #[validate(email)]
    pub email: Option<String>,
    pub category_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePairStatusRequest {
    pub status: RegistrationStatus,
}
