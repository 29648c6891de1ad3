use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub category_type: String,
    pub race_date: NaiveDate,
    pub race_end_date: Option<NaiveDate>,
    /// Maximum race duration in seconds.
    #[validate(range(min = 60, max = 3600))]
    pub max_duration_secs: u32,
    /// Nominal distance of one lap in meters.
    #[validate(range(min = 10, max = 1000))]
    pub lap_distance_m: u32,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub category_type: Option<String>,
    pub race_date: Option<NaiveDate>,
    pub race_end_date: Option<NaiveDate>,
    #[validate(range(min = 60, max = 3600))]
    pub max_duration_secs: Option<u32>,
    #[validate(range(min = 10, max = 1000))]
    pub lap_distance_m: Option<u32>,
    pub modified_by: Option<String>,
}
