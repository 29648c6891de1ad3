pub mod leaderboard;
pub mod race_control;
pub mod race_setup;

use uuid::Uuid;

use crate::error::{RaceError, StorageError};

/// Promote a repository miss to a reference failure on the named id.
pub(crate) fn resolve_err(id: Uuid) -> impl FnOnce(StorageError) -> RaceError {
    move |e| match e {
        StorageError::NotFound => RaceError::MissingReference { id },
        other => RaceError::Storage(other),
    }
}
