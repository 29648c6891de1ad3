use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::engine::ledger::DistanceOverride;

/// Operator distance entry: whole meters plus feet/inches precision.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct DistanceOverrideRequest {
    #[validate(range(min = 0))]
    pub meters: i32,
    #[validate(range(min = 0, max = 100))]
    pub feet: i32,
    #[validate(range(min = 0, max = 11))]
    pub inches: i32,
}

impl From<DistanceOverrideRequest> for DistanceOverride {
    fn from(req: DistanceOverrideRequest) -> Self {
        Self {
            meters: req.meters,
            feet: req.feet,
            inches: req.inches,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FinishEntryRequest {
    /// Elapsed time reported by the operator console. Ignored on the
    /// time-expired path; defaults to the rehydrated clock when absent.
    pub elapsed_ms: Option<i64>,
    /// True when the clock ceiling forced the termination.
    #[serde(default)]
    pub time_expired: bool,
    /// Measured distance for the partial final lap. Required unless
    /// `time_expired` is set.
    #[validate(nested)]
    pub distance: Option<DistanceOverrideRequest>,
}

/// Request body for recording a lap with a corrected distance. An empty
/// body records a normal lap at the category default.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct RecordLapRequest {
    #[validate(nested)]
    pub distance: Option<DistanceOverrideRequest>,
}
