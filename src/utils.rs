/// Returns `num` evenly spaced samples over `[start, stop]` (both included).
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        },
    }
}

/// Piecewise linear interpolation of `(xp, fp)` at each `x`.
/// `xp` must be increasing. Points outside `[xp[0], xp[n-1]]` are not
/// extrapolated and return `None`, as does any point whose surrounding
/// samples are not both valid (when a validity mask is provided).
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64], valid: Option<&[bool]>) -> Vec<Option<f64>> {
    let n = xp.len().min(fp.len());
    let is_valid = |i: usize| valid.map_or(true, |mask| mask.get(i).copied().unwrap_or(false));

    x.iter()
        .map(|&x| {
            if n == 0 || x.is_nan() {
                return None;
            }
            let hi = xp[..n].partition_point(|&v| v <= x);
            if hi == 0 {
                return None;
            }
            let lo = hi - 1;
            if xp[lo] == x {
                return is_valid(lo).then_some(fp[lo]);
            }
            if hi == n {
                return None;
            }
            if !is_valid(lo) || !is_valid(hi) {
                return None;
            }
            let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
            Some(fp[lo] + t * (fp[hi] - fp[lo]))
        })
        .collect()
}

/// Linearly interpolated percentile (0..=100) of an unsorted sample set.
pub fn percentile(samples: &[f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let (lo, hi) = (rank.floor() as usize, rank.ceil() as usize);
    let t = rank - lo as f64;
    Some(sorted[lo] + t * (sorted[hi] - sorted[lo]))
}
