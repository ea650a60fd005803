use crate::prelude::{Emission, Epoch, PositionFix, Record, Survey};

use hifitime::Unit;
use std::str::FromStr;

/// Depth of every beam, when not specified
pub const DEFAULT_DEPTH_M: f64 = 25.0;

/// [SurveyBuilder] assembles in-memory surveys.
/// Emissions are 0.5s apart, position fixes are timestamped explicitly.
pub struct SurveyBuilder {
    t0: Epoch,
    records: Vec<Record>,
    pings: u16,
    fixes: u16,
}

impl SurveyBuilder {
    pub fn new() -> Self {
        Self {
            t0: Epoch::from_str("2020-06-25T12:00:00 UTC").unwrap(),
            records: vec![],
            pings: 0,
            fixes: 0,
        }
    }

    /// Adds a position fix at `t0 + t_s`
    pub fn fix(mut self, t_s: f64, latitude: f64, longitude: f64, system: u8) -> Self {
        self.records.push(Record::Position(PositionFix {
            sequence_index: self.fixes,
            timestamp: self.t0 + t_s * Unit::Second,
            latitude,
            longitude,
            system,
        }));
        self.fixes += 1;
        self
    }

    /// Adds an emission, every beam at [DEFAULT_DEPTH_M]
    pub fn emission(self, across_track: &[f64], samples: &[f64]) -> Self {
        let depths = vec![DEFAULT_DEPTH_M; samples.len()];
        self.emission_with_depths(across_track, samples, &depths)
    }

    pub fn emission_with_depths(
        mut self,
        across_track: &[f64],
        samples: &[f64],
        depths: &[f64],
    ) -> Self {
        self.records.push(Record::Emission(Emission {
            sequence_index: self.pings,
            timestamp: self.t0 + self.pings as f64 * 0.5 * Unit::Second,
            samples: samples.to_vec(),
            across_track: across_track.to_vec(),
            depths: depths.to_vec(),
        }));
        self.pings += 1;
        self
    }

    /// Adds a record of another kind
    pub fn other(mut self, kind: u8) -> Self {
        self.records.push(Record::Other(kind));
        self
    }

    pub fn build(self) -> Survey {
        Survey::from_records(self.records)
    }
}
