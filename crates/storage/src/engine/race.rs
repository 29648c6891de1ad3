use crate::models::{RaceEntry, RunStatus};

/// Pointer protocol over a race's ordered entries: the current entrant is
/// the one racing, else the first still waiting. At most one entry races at
/// a time; that invariant is upheld here, not by storage constraints.
pub fn current_entry(entries: &[RaceEntry]) -> Option<&RaceEntry> {
    entries
        .iter()
        .find(|e| e.status == RunStatus::Racing)
        .or_else(|| entries.iter().find(|e| e.status == RunStatus::Waiting))
}

pub fn racing_count(entries: &[RaceEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.status == RunStatus::Racing)
        .count()
}

/// A race is complete once every entrant run has completed.
pub fn is_complete(entries: &[RaceEntry]) -> bool {
    !entries.is_empty() && entries.iter().all(|e| e.status == RunStatus::Completed)
}
