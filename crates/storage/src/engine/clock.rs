use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::time::MissedTickBehavior;

use crate::error::RaceError;

/// Sampling granularity of the elapsed-time signal.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub elapsed_ms: i64,
    /// True exactly once, when the ceiling froze the clock.
    pub expired: bool,
}

/// Race clock anchored on a persisted wall-clock start instant.
///
/// Elapsed time is always recomputed as `now - started_at`, so a restarted
/// process rehydrates without drift; any gap spent restarted still counts as
/// race time. All queries take `now` explicitly.
#[derive(Debug, Clone)]
pub struct RaceClock {
    started_at: DateTime<Utc>,
    max_elapsed_ms: i64,
    last_split_ms: i64,
    frozen_at_ms: Option<i64>,
}

impl RaceClock {
    pub fn start(now: DateTime<Utc>, max_elapsed_ms: i64) -> Self {
        Self {
            started_at: now,
            max_elapsed_ms,
            last_split_ms: 0,
            frozen_at_ms: None,
        }
    }

    /// Rehydrate a running clock from persisted state. `prior_elapsed_ms` is
    /// the cumulative time already covered by recorded laps; the next split
    /// measures from there.
    pub fn resume(started_at: DateTime<Utc>, max_elapsed_ms: i64, prior_elapsed_ms: i64) -> Self {
        Self {
            started_at,
            max_elapsed_ms,
            last_split_ms: prior_elapsed_ms,
            frozen_at_ms: None,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn max_elapsed_ms(&self) -> i64 {
        self.max_elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.frozen_at_ms.is_none()
    }

    /// Current elapsed, clamped to `[0, max_elapsed_ms]`. A frozen clock
    /// reports its final value regardless of `now`.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        match self.frozen_at_ms {
            Some(frozen) => frozen,
            None => (now - self.started_at)
                .num_milliseconds()
                .clamp(0, self.max_elapsed_ms),
        }
    }

    /// Whether the running clock has reached its ceiling.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_running() && (now - self.started_at).num_milliseconds() >= self.max_elapsed_ms
    }

    /// Record a lap split: returns `(lap_ms, total_ms)` and advances the
    /// split cursor.
    pub fn split(&mut self, now: DateTime<Utc>) -> Result<(i64, i64), RaceError> {
        if !self.is_running() {
            return Err(RaceError::ClockNotRunning);
        }
        let total = self.elapsed_ms(now);
        let lap = (total - self.last_split_ms).max(0);
        self.last_split_ms = total;
        Ok((lap, total))
    }

    /// Freeze at a final elapsed value, clamped to the ceiling. Callable
    /// whether running or already frozen.
    pub fn freeze(&mut self, elapsed_ms: i64) {
        self.frozen_at_ms = Some(elapsed_ms.clamp(0, self.max_elapsed_ms));
    }

    /// The forced-termination freeze: exactly the ceiling value.
    pub fn freeze_at_ceiling(&mut self) {
        self.frozen_at_ms = Some(self.max_elapsed_ms);
    }
}

/// Drive a shared clock on a fixed 10 ms tick, publishing elapsed samples.
/// The loop freezes the clock at exactly the ceiling, emits one final
/// expired tick, and stops. It also stops once the clock is frozen
/// externally or every receiver is gone.
pub fn spawn_ticker(clock: Arc<Mutex<RaceClock>>) -> watch::Receiver<ClockTick> {
    let (tx, rx) = watch::channel(ClockTick {
        elapsed_ms: 0,
        expired: false,
    });
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let now = Utc::now();
            let mut clock = clock.lock().await;
            if !clock.is_running() {
                break;
            }
            if clock.is_expired(now) {
                clock.freeze_at_ceiling();
                let _ = tx.send(ClockTick {
                    elapsed_ms: clock.max_elapsed_ms(),
                    expired: true,
                });
                break;
            }
            let tick = ClockTick {
                elapsed_ms: clock.elapsed_ms(now),
                expired: false,
            };
            drop(clock);
            if tx.send(tick).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeDelta;

    fn at(start: DateTime<Utc>, ms: i64) -> DateTime<Utc> {
        start + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn elapsed_is_wall_clock_since_start() {
        let start = Utc::now();
        let clock = RaceClock::start(start, 300_000);
        assert_eq!(clock.elapsed_ms(at(start, 0)), 0);
        assert_eq!(clock.elapsed_ms(at(start, 4_200)), 4_200);
    }

    #[test]
    fn elapsed_clamps_to_ceiling() {
        let start = Utc::now();
        let clock = RaceClock::start(start, 300_000);
        assert_eq!(clock.elapsed_ms(at(start, 301_000)), 300_000);
        assert!(clock.is_expired(at(start, 300_000)));
        assert!(!clock.is_expired(at(start, 299_999)));
    }

    #[test]
    fn splits_measure_from_previous_split() {
        let start = Utc::now();
        let mut clock = RaceClock::start(start, 300_000);
        assert_eq!(clock.split(at(start, 60_000)).unwrap(), (60_000, 60_000));
        assert_eq!(clock.split(at(start, 130_000)).unwrap(), (70_000, 130_000));
    }

    #[test]
    fn split_fails_once_frozen() {
        let start = Utc::now();
        let mut clock = RaceClock::start(start, 300_000);
        clock.freeze(210_000);
        assert_matches!(
            clock.split(at(start, 220_000)),
            Err(RaceError::ClockNotRunning)
        );
        assert_eq!(clock.elapsed_ms(at(start, 220_000)), 210_000);
    }

    #[test]
    fn resume_restores_split_cursor() {
        let start = Utc::now();
        let mut clock = RaceClock::resume(start, 300_000, 130_000);
        assert_eq!(clock.split(at(start, 195_000)).unwrap(), (65_000, 195_000));
    }

    #[test]
    fn freeze_clamps_to_ceiling() {
        let start = Utc::now();
        let mut clock = RaceClock::start(start, 300_000);
        clock.freeze(400_000);
        assert_eq!(clock.elapsed_ms(at(start, 0)), 300_000);
    }

    #[tokio::test]
    async fn ticker_emits_expired_tick_at_ceiling() {
        // Ceiling of zero expires on the first sample.
        let clock = Arc::new(Mutex::new(RaceClock::start(Utc::now(), 0)));
        let mut rx = spawn_ticker(Arc::clone(&clock));

        rx.changed().await.unwrap();
        let tick = *rx.borrow();
        assert_eq!(
            tick,
            ClockTick {
                elapsed_ms: 0,
                expired: true
            }
        );
        assert!(!clock.lock().await.is_running());
    }
}
