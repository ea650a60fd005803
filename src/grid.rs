//! Waterfall grid assembly
use itertools::Itertools;
use log::{debug, info, warn};
use nalgebra::DMatrix;

use std::collections::VecDeque;

use crate::{
    averager::Averager,
    cfg::Quantity,
    prelude::{Emission, Error, Record, RecordSource, SurveyGeometry},
    utils::{interp, linspace},
};

/// [WaterfallGrid] stacks one row per emission, newest first.
/// Cells without data hold 0.0 and are flagged invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallGrid {
    pub(crate) values: DMatrix<f64>,
    pub(crate) valid: DMatrix<bool>,
}

impl WaterfallGrid {
    /// Builds a [WaterfallGrid] from rows of equal length,
    /// `None` marking cells without data.
    pub fn from_rows<I: IntoIterator<Item = Vec<Option<f64>>>>(rows: I, ncols: usize) -> Self {
        let rows = rows.into_iter().collect::<Vec<_>>();
        let cell = |r: usize, c: usize| rows[r].get(c).copied().flatten();
        Self {
            values: DMatrix::from_fn(rows.len(), ncols, |r, c| cell(r, c).unwrap_or(0.0)),
            valid: DMatrix::from_fn(rows.len(), ncols, |r, c| cell(r, c).is_some()),
        }
    }

    /// Number of rows (emissions)
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (across track positions)
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Cell value, `None` when this cell has no data.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.valid[(row, col)].then(|| self.values[(row, col)])
    }

    /// Raw cell values, 0.0 where there is no data.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Returns one row
    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        (0..self.ncols()).map(|col| self.value(row, col)).collect()
    }

    /// Iterates all valid samples
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(self.valid.iter())
            .filter_map(|(v, ok)| ok.then_some(*v))
    }
}

/// Output of [assemble]
#[derive(Debug, Clone)]
pub struct Assembly {
    pub grid: WaterfallGrid,
    /// Smallest raw sample, lower mapping bound when not clipping
    pub sample_min: f64,
    /// Largest raw sample, upper mapping bound when not clipping
    pub sample_max: f64,
    /// Depth statistics over every beam
    pub depths: Averager,
}

fn beam_values(emission: &Emission, quantity: Quantity) -> &[f64] {
    match quantity {
        Quantity::Backscatter => &emission.samples,
        Quantity::Depth => &emission.depths,
    }
}

/// Resamples one emission onto the uniform across track `axis`.
fn resample(emission: &Emission, values: &[f64], axis: &[f64]) -> Vec<Option<f64>> {
    if values.len() != emission.across_track.len() {
        warn!(
            "{} - ping #{}: {} offsets for {} values",
            emission.timestamp,
            emission.sequence_index,
            emission.across_track.len(),
            values.len()
        );
    }
    let (xp, fp): (Vec<f64>, Vec<f64>) = emission
        .across_track
        .iter()
        .copied()
        .zip(values.iter().copied())
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .unzip();
    interp(axis, &xp, &fp, None)
}

/// Second pass over the survey: stacks each emission, resampled onto
/// `beam_count * zoom` positions evenly spread over the survey extents.
/// The most recent emission ends up on the first row.
pub fn assemble<S: RecordSource>(
    source: &mut S,
    geometry: &SurveyGeometry,
    zoom: f64,
    quantity: Quantity,
) -> Result<Assembly, Error> {
    let resolution = ((geometry.beam_count as f64 * zoom).round() as usize).max(1);
    let axis = linspace(geometry.left_extent, geometry.right_extent, resolution);
    info!(
        "assembling {} waterfall: {} columns over [{:.2}, {:.2}]m",
        quantity, resolution, geometry.left_extent, geometry.right_extent
    );

    let mut rows = VecDeque::<Vec<Option<f64>>>::new();
    let mut samples = Averager::new();
    let mut depths = Averager::new();

    while source.has_more() {
        let emission = match source.next_record()? {
            Some(Record::Emission(emission)) => emission,
            Some(_) => continue,
            None => break,
        };
        if emission.beam_count() == 0 {
            continue;
        }
        let values = beam_values(&emission, quantity);
        for v in values {
            samples.add(*v);
        }
        for z in &emission.depths {
            depths.add(*z);
        }
        rows.push_front(resample(&emission, values, &axis));
    }

    let (Some(sample_min), Some(sample_max)) = (samples.min, samples.max) else {
        return Err(Error::NoData);
    };
    debug!(
        "{} rows, samples within [{}, {}]",
        rows.len(),
        sample_min,
        sample_max
    );

    Ok(Assembly {
        grid: WaterfallGrid::from_rows(rows, resolution),
        sample_min,
        sample_max,
        depths,
    })
}
