use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::error::RaceError;
use crate::models::{BullPair, RegistrationStatus};

/// Establishes and locks the entrant ordering before racing starts. Only
/// approved pairs participate; locking is one-way and stamps the 1-based
/// race sequence.
#[derive(Debug)]
pub struct RaceOrderController {
    pairs: Vec<BullPair>,
    locked: bool,
}

impl RaceOrderController {
    pub fn new(pairs: Vec<BullPair>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .filter(|p| p.status == RegistrationStatus::Approved)
                .collect(),
            locked: false,
        }
    }

    pub fn pairs(&self) -> &[BullPair] {
        &self.pairs
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Manual reorder: move the pair at `from` so it sits at `to`.
    pub fn move_pair(&mut self, from: usize, to: usize) -> Result<(), RaceError> {
        self.ensure_unlocked()?;
        if from >= self.pairs.len() {
            return Err(RaceError::InvalidOrderIndex { index: from });
        }
        if to >= self.pairs.len() {
            return Err(RaceError::InvalidOrderIndex { index: to });
        }
        let pair = self.pairs.remove(from);
        self.pairs.insert(to, pair);
        Ok(())
    }

    /// Uniform random permutation (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RaceError> {
        self.ensure_unlocked()?;
        self.pairs.shuffle(rng);
        Ok(())
    }

    /// Freeze the ordering and yield `(pair_id, race_order)` assignments.
    pub fn lock(&mut self) -> Result<Vec<(Uuid, u32)>, RaceError> {
        self.ensure_unlocked()?;
        if self.pairs.is_empty() {
            return Err(RaceError::EmptyRace);
        }
        self.locked = true;
        Ok(self
            .pairs
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i as u32 + 1))
            .collect())
    }

    fn ensure_unlocked(&self) -> Result<(), RaceError> {
        if self.locked {
            return Err(RaceError::AlreadyLocked);
        }
        Ok(())
    }
}
