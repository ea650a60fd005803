//! Sample to grey level mapping
use image::{GrayAlphaImage, LumaA};
use itertools::Itertools;
use log::debug;

use crate::{
    cfg::{IntensityMode, Mapping},
    constants::{LINEAR_GREY_MAX, LINEAR_GREY_MIN, LOG_GREY_MAX, LOG_GREY_MIN},
    grid::WaterfallGrid,
    utils::percentile,
};

/// Natural logarithm, 0 for non positive values.
fn safe_ln(value: f64) -> f64 {
    if value > 0.0 {
        value.ln()
    } else {
        0.0
    }
}

/// Sample range `[lower, upper]` over valid cells only.
/// With clipping, the range spans the `clip` and `100 - clip` percentiles.
pub fn sample_bounds(grid: &WaterfallGrid, clip: Option<f64>) -> Option<(f64, f64)> {
    match clip {
        Some(clip) => {
            let samples = grid.samples().collect::<Vec<_>>();
            let lower = percentile(&samples, clip)?;
            let upper = percentile(&samples, 100.0 - clip)?;
            Some((lower, upper))
        },
        None => grid.samples().minmax().into_option(),
    }
}

/// Sample range to map `grid` with: its clip percentiles when `mapping`
/// clips, the `observed` raw sample range otherwise.
pub fn mapping_bounds(
    grid: &WaterfallGrid,
    mapping: &Mapping,
    observed: (f64, f64),
) -> (f64, f64) {
    match mapping.clip() {
        Some(clip) => sample_bounds(grid, Some(clip)).unwrap_or(observed),
        None => observed,
    }
}

/// [IntensityScale] converts samples to grey levels.
/// The same scale shades the waterfall and its legend color bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityScale {
    mode: IntensityMode,
    invert: bool,
    lower: f64,
    factor: f64,
    grey_min: f64,
    grey_max: f64,
}

impl IntensityScale {
    /// Builds the [IntensityScale] mapping `[lower, upper]` onto the grey range
    /// of `mapping`. A degenerate range uses a unit factor.
    pub fn new(mapping: &Mapping, lower: f64, upper: f64) -> Self {
        debug!(
            "{} mapping over [{}, {}] (invert={})",
            mapping.mode, lower, upper, mapping.invert
        );
        let (lower, upper, grey_min, grey_max) = match mapping.mode {
            IntensityMode::Linear => (lower, upper, LINEAR_GREY_MIN, LINEAR_GREY_MAX),
            IntensityMode::Logarithmic => {
                (safe_ln(lower), safe_ln(upper), LOG_GREY_MIN, LOG_GREY_MAX)
            },
        };
        let span = upper - lower;
        let factor = if span != 0.0 {
            (grey_max - grey_min) / span
        } else {
            1.0
        };
        Self {
            mode: mapping.mode,
            invert: mapping.invert,
            lower,
            factor,
            grey_min,
            grey_max,
        }
    }

    /// Grey level of `sample`, saturated to the grey range.
    pub fn level(&self, sample: f64) -> u8 {
        let x = match self.mode {
            IntensityMode::Linear => sample,
            IntensityMode::Logarithmic => safe_ln(sample),
        };
        let scaled = (x - self.lower) * self.factor;
        let level = if self.invert {
            self.grey_max - scaled
        } else {
            self.grey_min + scaled
        };
        level.round().clamp(self.grey_min, self.grey_max) as u8
    }
}

/// Maps the valid cells of `grid` to grey levels, over the range of
/// its own valid samples (see [sample_bounds]).
pub fn map(grid: &WaterfallGrid, mapping: &Mapping) -> GrayAlphaImage {
    let (lower, upper) = sample_bounds(grid, mapping.clip()).unwrap_or((0.0, 0.0));
    map_scaled(grid, &IntensityScale::new(mapping, lower, upper))
}

/// Maps the valid cells of `grid` to grey levels with `scale`.
/// Cells without data are fully transparent.
/// Image rows follow grid rows, image columns grid columns.
pub fn map_scaled(grid: &WaterfallGrid, scale: &IntensityScale) -> GrayAlphaImage {
    GrayAlphaImage::from_fn(grid.ncols() as u32, grid.nrows() as u32, |x, y| {
        match grid.value(y as usize, x as usize) {
            Some(sample) => LumaA([scale.level(sample), 255]),
            None => LumaA([0, 0]),
        }
    })
}
