//! Survey records
use crate::prelude::{Epoch, Error};

/// Vessel position fix, as reported by one positioning system.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    /// Position counter
    pub sequence_index: u16,
    /// Time of fix
    pub timestamp: Epoch,
    /// Latitude (decimal degrees)
    pub latitude: f64,
    /// Longitude (decimal degrees)
    pub longitude: f64,
    /// Positioning system descriptor. Several systems may be interleaved
    /// in a single survey.
    pub system: u8,
}

/// One sonar emission (ping) and its beam measurements, ordered
/// across the swath.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// Ping counter
    pub sequence_index: u16,
    /// Time of emission
    pub timestamp: Epoch,
    /// Beam intensity samples (dB)
    pub samples: Vec<f64>,
    /// Signed across track offset of each beam (m).
    /// 0.0 flags an invalid detection.
    pub across_track: Vec<f64>,
    /// Depth of each beam (m)
    pub depths: Vec<f64>,
}

impl Emission {
    /// Number of beams in this [Emission]
    pub fn beam_count(&self) -> usize {
        self.samples.len()
    }
}

/// Record decoded from a survey.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Position(PositionFix),
    Emission(Emission),
    /// Any other record kind, not used by the waterfall synthesis.
    Other(u8),
}

/// [RecordSource] yields survey [Record]s in file order.
pub trait RecordSource {
    /// Total number of records, for progress reporting.
    fn record_count(&self) -> usize;
    /// True while more records may be read.
    fn has_more(&self) -> bool;
    /// Reads next [Record]. Returns `Ok(None)` once exhausted.
    fn next_record(&mut self) -> Result<Option<Record>, Error>;
    /// Timestamp of the last record that was read.
    fn current_timestamp(&self) -> Option<Epoch>;
}
