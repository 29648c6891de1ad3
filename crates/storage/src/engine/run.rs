use chrono::{DateTime, Utc};

use crate::engine::clock::RaceClock;
use crate::engine::ledger::{DistanceOverride, LapLedger, LapRecord};
use crate::error::RaceError;
use crate::models::{Category, Lap, RaceEntry, RunStatus};

/// A staged final-lap split awaiting the operator's distance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLap {
    pub lap_time_ms: i64,
    pub total_time_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinishOutcome {
    /// Operator finish: the run stays open until a distance is confirmed.
    AwaitingDistance(PendingLap),
    /// Forced termination at the ceiling: completed immediately.
    Completed {
        total_time_ms: i64,
        final_lap: LapRecord,
    },
}

/// Per-entrant race state machine: waiting -> racing -> completed, no skips,
/// never backward. Owns the entrant's clock and lap ledger; the persisted
/// entry and laps are projections of this machine.
#[derive(Debug, Clone)]
pub struct RunMachine {
    status: RunStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    total_time_ms: Option<i64>,
    clock: Option<RaceClock>,
    ledger: LapLedger,
    pending_final: Option<PendingLap>,
    max_duration_ms: i64,
    default_lap_distance_m: i32,
}

impl RunMachine {
    pub fn new(category: &Category) -> Self {
        Self {
            status: RunStatus::Waiting,
            started_at: None,
            ended_at: None,
            total_time_ms: None,
            clock: None,
            ledger: LapLedger::new(),
            pending_final: None,
            max_duration_ms: category.max_duration_ms(),
            default_lap_distance_m: category.lap_distance_m as i32,
        }
    }

    /// Rebuild the machine from persisted state. A racing entry's clock is
    /// re-anchored on its stored start instant, so elapsed time survives a
    /// process restart without trusting any cached timer value.
    pub fn rehydrate(entry: &RaceEntry, laps: &[Lap], category: &Category) -> Self {
        let ledger = LapLedger::from_records(laps.iter().map(LapRecord::from_lap).collect());
        let clock = match (entry.status, entry.started_at) {
            (RunStatus::Racing, Some(started_at)) => {
                let cursor = ledger.laps().last().map(|l| l.total_time_ms).unwrap_or(0);
                Some(RaceClock::resume(
                    started_at,
                    category.max_duration_ms(),
                    cursor,
                ))
            }
            _ => None,
        };
        Self {
            status: entry.status,
            started_at: entry.started_at,
            ended_at: entry.ended_at,
            total_time_ms: entry.total_time_ms,
            clock,
            ledger,
            pending_final: None,
            max_duration_ms: category.max_duration_ms(),
            default_lap_distance_m: category.lap_distance_m as i32,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn total_time_ms(&self) -> Option<i64> {
        self.total_time_ms
    }

    pub fn ledger(&self) -> &LapLedger {
        &self.ledger
    }

    pub fn pending_final(&self) -> Option<PendingLap> {
        self.pending_final
    }

    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        match self.status {
            RunStatus::Waiting => 0,
            RunStatus::Racing => self
                .clock
                .as_ref()
                .map(|c| c.elapsed_ms(now))
                .unwrap_or(0),
            RunStatus::Completed => self.total_time_ms.unwrap_or(0),
        }
    }

    /// waiting -> racing. Records the start instant and arms the clock.
    pub fn begin(&mut self, now: DateTime<Utc>) -> Result<(), RaceError> {
        if self.status != RunStatus::Waiting {
            return Err(self.invalid("begin"));
        }
        self.status = RunStatus::Racing;
        self.started_at = Some(now);
        self.clock = Some(RaceClock::start(now, self.max_duration_ms));
        Ok(())
    }

    /// Record a full lap at the category default distance.
    pub fn record_lap(&mut self, now: DateTime<Utc>) -> Result<LapRecord, RaceError> {
        self.record_lap_inner(now, None)
    }

    /// Record a lap whose distance the operator corrected. Does not force a
    /// transition; the override is stored only when it deviates from the
    /// category default.
    pub fn record_lap_with_override(
        &mut self,
        now: DateTime<Utc>,
        distance: DistanceOverride,
    ) -> Result<LapRecord, RaceError> {
        self.record_lap_inner(now, Some(distance))
    }

    fn record_lap_inner(
        &mut self,
        now: DateTime<Utc>,
        distance: Option<DistanceOverride>,
    ) -> Result<LapRecord, RaceError> {
        if self.status != RunStatus::Racing {
            return Err(self.invalid("record_lap"));
        }
        if self.pending_final.is_some() {
            return Err(RaceError::PendingDistance);
        }
        let clock = self.clock.as_mut().ok_or(RaceError::ClockNotRunning)?;
        let (lap_ms, total_ms) = clock.split(now)?;

        let (distance_m, stored_override) = match distance {
            Some(o) => {
                let deviates =
                    o.meters != self.default_lap_distance_m || o.feet > 0 || o.inches > 0;
                (o.meters, deviates.then_some(o))
            }
            None => (self.default_lap_distance_m, None),
        };
        self.ledger.append(lap_ms, total_ms, distance_m, stored_override)
    }

    /// Operator-initiated finish at the given elapsed time (or the clock's
    /// current elapsed when none is supplied). If elapsed has already
    /// reached the ceiling, the forced-termination outcome wins
    /// deterministically; otherwise the partial final lap is staged until
    /// the operator confirms a measured distance.
    pub fn finish(
        &mut self,
        now: DateTime<Utc>,
        elapsed_ms: Option<i64>,
    ) -> Result<FinishOutcome, RaceError> {
        if self.status != RunStatus::Racing {
            return Err(self.invalid("finish"));
        }
        if let Some(pending) = self.pending_final {
            return Ok(FinishOutcome::AwaitingDistance(pending));
        }
        let clock = self.clock.as_mut().ok_or(RaceError::ClockNotRunning)?;
        let elapsed = elapsed_ms.unwrap_or_else(|| clock.elapsed_ms(now));
        if clock.is_expired(now) || elapsed >= self.max_duration_ms {
            return self.complete_at_ceiling(now);
        }
        clock.freeze(elapsed);
        let lap_time_ms = (elapsed - self.ledger.total_lap_time_ms()).max(0);
        let pending = PendingLap {
            lap_time_ms,
            total_time_ms: elapsed,
        };
        self.pending_final = Some(pending);
        Ok(FinishOutcome::AwaitingDistance(pending))
    }

    /// The automatic path when the clock ceiling is reached: no operator
    /// action is available, so the final lap degrades to the category
    /// default distance and the run completes at exactly the maximum.
    pub fn time_expired(&mut self, now: DateTime<Utc>) -> Result<FinishOutcome, RaceError> {
        if self.status != RunStatus::Racing {
            return Err(self.invalid("finish"));
        }
        if self.pending_final.is_some() {
            return Err(RaceError::PendingDistance);
        }
        self.complete_at_ceiling(now)
    }

    fn complete_at_ceiling(&mut self, now: DateTime<Utc>) -> Result<FinishOutcome, RaceError> {
        let total = self.max_duration_ms;
        let lap_time_ms = (total - self.ledger.total_lap_time_ms()).max(0);
        let final_lap = self
            .ledger
            .append(lap_time_ms, total, self.default_lap_distance_m, None)?;
        if let Some(clock) = self.clock.as_mut() {
            clock.freeze_at_ceiling();
        }
        self.complete(now, total);
        Ok(FinishOutcome::Completed {
            total_time_ms: total,
            final_lap,
        })
    }

    /// Consume the pending final lap with the operator's measured distance
    /// and transition to completed.
    pub fn confirm_distance(
        &mut self,
        now: DateTime<Utc>,
        distance: DistanceOverride,
    ) -> Result<LapRecord, RaceError> {
        let pending = self.pending_final.ok_or(RaceError::PendingDistance)?;
        let record = self.ledger.append(
            pending.lap_time_ms,
            pending.total_time_ms,
            distance.meters,
            Some(distance),
        )?;
        self.pending_final = None;
        self.complete(now, pending.total_time_ms);
        Ok(record)
    }

    fn complete(&mut self, now: DateTime<Utc>, total_time_ms: i64) {
        self.status = RunStatus::Completed;
        self.ended_at = Some(now);
        self.total_time_ms = Some(total_time_ms);
    }

    /// Copy the machine's timing fields onto the persisted entry record.
    pub fn apply_to(&self, entry: &mut RaceEntry) {
        entry.status = self.status;
        entry.started_at = self.started_at;
        entry.ended_at = self.ended_at;
        entry.total_time_ms = self.total_time_ms;
    }

    fn invalid(&self, action: &'static str) -> RaceError {
        RaceError::InvalidTransition {
            action,
            state: self.status.as_str(),
        }
    }
}
