use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures raised by the race engine and its orchestration services.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Cannot lock a race with no approved pairs")]
    EmptyRace,

    #[error("Race order is already locked")]
    AlreadyLocked,

    #[error("Referenced record {id} does not resolve")]
    MissingReference { id: Uuid },

    #[error("Pair {id} is not approved for racing")]
    PairNotApproved { id: Uuid },

    #[error("Pair {id} appears more than once in the race order")]
    DuplicatePair { id: Uuid },

    #[error("Order position {index} is out of range")]
    InvalidOrderIndex { index: usize },

    #[error("Final lap is awaiting a distance entry")]
    PendingDistance,

    #[error("Clock is not running")]
    ClockNotRunning,

    #[error("Lap {lap_number} would regress cumulative time")]
    LapOutOfOrder { lap_number: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
