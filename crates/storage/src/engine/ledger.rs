use crate::error::RaceError;
use crate::models::Lap;

pub const METERS_PER_FOOT: f64 = 0.3048;
pub const METERS_PER_INCH: f64 = 0.0254;

/// Raw operator distance entry for a lap. The whole-meters component is the
/// authoritative stored distance; feet and inches are supplementary
/// precision kept for display and audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceOverride {
    pub meters: i32,
    pub feet: i32,
    pub inches: i32,
}

impl DistanceOverride {
    /// Compound total shown to the operator for confirmation.
    pub fn total_meters(&self) -> f64 {
        f64::from(self.meters)
            + f64::from(self.feet) * METERS_PER_FOOT
            + f64::from(self.inches) * METERS_PER_INCH
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapRecord {
    pub lap_number: u32,
    pub lap_time_ms: i64,
    pub total_time_ms: i64,
    pub distance_covered_m: i32,
    pub override_distance: Option<DistanceOverride>,
}

impl LapRecord {
    /// Distance shown for this lap: the override-derived compound total when
    /// one is present and positive, else the stored meters.
    pub fn effective_distance_m(&self) -> f64 {
        match self.override_distance {
            Some(o) if o.total_meters() > 0.0 => o.total_meters(),
            _ => f64::from(self.distance_covered_m),
        }
    }

    pub fn from_lap(lap: &Lap) -> Self {
        let override_distance = lap.override_meters.map(|meters| DistanceOverride {
            meters,
            feet: lap.override_feet.unwrap_or(0),
            inches: lap.override_inches.unwrap_or(0),
        });
        Self {
            lap_number: lap.lap_number,
            lap_time_ms: lap.lap_time_ms,
            total_time_ms: lap.total_time_ms,
            distance_covered_m: lap.distance_covered_m,
            override_distance,
        }
    }
}

/// Append-only per-entrant lap sequence. Laps are numbered 1..N contiguously
/// with non-decreasing cumulative time.
#[derive(Debug, Clone, Default)]
pub struct LapLedger {
    laps: Vec<LapRecord>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut laps: Vec<LapRecord>) -> Self {
        laps.sort_by_key(|l| l.lap_number);
        Self { laps }
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn next_lap_number(&self) -> u32 {
        self.laps.len() as u32 + 1
    }

    pub fn append(
        &mut self,
        lap_time_ms: i64,
        total_time_ms: i64,
        distance_covered_m: i32,
        override_distance: Option<DistanceOverride>,
    ) -> Result<LapRecord, RaceError> {
        let lap_number = self.next_lap_number();
        if let Some(last) = self.laps.last()
            && total_time_ms < last.total_time_ms
        {
            return Err(RaceError::LapOutOfOrder { lap_number });
        }
        let record = LapRecord {
            lap_number,
            lap_time_ms,
            total_time_ms,
            distance_covered_m,
            override_distance,
        };
        self.laps.push(record);
        Ok(record)
    }

    /// Sum of individual lap times.
    pub fn total_lap_time_ms(&self) -> i64 {
        self.laps.iter().map(|l| l.lap_time_ms).sum()
    }

    /// Cumulative distance for operator display, using compound override
    /// totals where present.
    pub fn cumulative_distance_m(&self) -> f64 {
        self.laps.iter().map(|l| l.effective_distance_m()).sum()
    }

    /// Cumulative distance as ranked: authoritative stored meters only.
    pub fn ranked_distance_m(&self) -> f64 {
        self.laps
            .iter()
            .map(|l| f64::from(l.distance_covered_m))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn appends_are_contiguous_from_one() {
        let mut ledger = LapLedger::new();
        ledger.append(60_000, 60_000, 100, None).unwrap();
        ledger.append(70_000, 130_000, 100, None).unwrap();
        let numbers: Vec<u32> = ledger.laps().iter().map(|l| l.lap_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(ledger.next_lap_number(), 3);
    }

    #[test]
    fn rejects_cumulative_time_regression() {
        let mut ledger = LapLedger::new();
        ledger.append(60_000, 60_000, 100, None).unwrap();
        assert_matches!(
            ledger.append(1_000, 59_000, 100, None),
            Err(RaceError::LapOutOfOrder { lap_number: 2 })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn override_compound_total() {
        let o = DistanceOverride {
            meters: 5,
            feet: 2,
            inches: 6,
        };
        assert!((o.total_meters() - 5.7604).abs() < 1e-9);
    }

    #[test]
    fn display_distance_uses_compound_but_ranked_uses_meters() {
        let mut ledger = LapLedger::new();
        ledger.append(60_000, 60_000, 100, None).unwrap();
        ledger
            .append(
                30_000,
                90_000,
                5,
                Some(DistanceOverride {
                    meters: 5,
                    feet: 2,
                    inches: 6,
                }),
            )
            .unwrap();

        assert!((ledger.cumulative_distance_m() - 105.7604).abs() < 1e-9);
        assert_eq!(ledger.ranked_distance_m(), 105.0);
    }

    #[test]
    fn zero_override_falls_back_to_stored_meters() {
        let lap = LapRecord {
            lap_number: 1,
            lap_time_ms: 1_000,
            total_time_ms: 1_000,
            distance_covered_m: 100,
            override_distance: Some(DistanceOverride {
                meters: 0,
                feet: 0,
                inches: 0,
            }),
        };
        assert_eq!(lap.effective_distance_m(), 100.0);
    }
}
