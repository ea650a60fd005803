use log::info;

use crate::{constants::PROGRESS_PERIOD_S, prelude::Epoch};

/// [Progress] reports how much of a survey has been read.
/// It is purely informative.
pub(crate) struct Progress {
    title: &'static str,
    total: usize,
    read: usize,
    last_report: Option<u64>,
}

impl Progress {
    pub fn new(title: &'static str, total: usize) -> Self {
        Self {
            title,
            total,
            read: 0,
            last_report: None,
        }
    }

    /// Percentage read so far
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.read as f64 / self.total as f64 * 100.0).min(100.0)
        }
    }

    /// Accounts for one more record read at `t`. Reports whenever
    /// the second of day is a multiple of the reporting period.
    pub fn record(&mut self, t: Option<Epoch>) {
        self.read += 1;
        let Some(t) = t else {
            return;
        };
        let (_, _, _, h, m, s, _) = t.to_gregorian_utc();
        let second_of_day = h as u64 * 3600 + m as u64 * 60 + s as u64;
        if second_of_day % PROGRESS_PERIOD_S == 0 && self.last_report != Some(second_of_day) {
            self.last_report = Some(second_of_day);
            info!("{}: {:.2}%", self.title, self.percent());
        }
    }

    pub fn done(&self) {
        info!("{}: 100% DONE", self.title);
    }
}
