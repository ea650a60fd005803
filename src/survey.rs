use log::debug;

use crate::{
    prelude::{Epoch, Error},
    progress::Progress,
    record::{Record, RecordSource},
};

/// [Survey] buffers a [RecordSource] once so it may be iterated
/// several times, without re-opening the underlying file.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    records: Vec<(Option<Epoch>, Record)>,
    cursor: usize,
}

impl Survey {
    /// Builds a [Survey] from records already in memory.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| {
                    let t = match &record {
                        Record::Position(fix) => Some(fix.timestamp),
                        Record::Emission(emission) => Some(emission.timestamp),
                        Record::Other(_) => None,
                    };
                    (t, record)
                })
                .collect(),
            cursor: 0,
        }
    }

    /// Drains a [RecordSource] into a new [Survey].
    /// Any read error is returned unchanged.
    pub fn from_source<S: RecordSource>(source: &mut S) -> Result<Self, Error> {
        let mut records = Vec::with_capacity(source.record_count());
        let mut progress = Progress::new("decoding survey", source.record_count());
        while source.has_more() {
            match source.next_record()? {
                Some(record) => {
                    progress.record(source.current_timestamp());
                    records.push((source.current_timestamp(), record));
                },
                None => break,
            }
        }
        progress.done();
        debug!("buffered {} records", records.len());
        Ok(Self { records, cursor: 0 })
    }

    /// Moves back to the first [Record].
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Number of buffered [Record]s
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no [Record] was buffered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for Survey {
    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn has_more(&self) -> bool {
        self.cursor < self.records.len()
    }

    fn next_record(&mut self) -> Result<Option<Record>, Error> {
        let record = self.records.get(self.cursor).map(|(_, r)| r.clone());
        if record.is_some() {
            self.cursor += 1;
        }
        Ok(record)
    }

    fn current_timestamp(&self) -> Option<Epoch> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
            .and_then(|(t, _)| *t)
    }
}
