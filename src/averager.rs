/// Running statistics (mean, extrema) over a stream of samples.
#[derive(Debug, Clone, Default)]
pub struct Averager {
    pub mean: f64,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Averager {
    /// Builds new [Averager]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push new value into [Averager]
    pub fn add(&mut self, x: f64) {
        self.count += 1;
        let k = self.count as f64;
        self.mean = x / k + self.mean * (k - 1.0) / k;
        self.min = Some(self.min.map_or(x, |min| min.min(x)));
        self.max = Some(self.max.map_or(x, |max| max.max(x)));
    }

    /// Returns the mean value, if at least one sample was pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

#[cfg(test)]
mod test {
    use super::Averager;

    #[test]
    fn test_averager() {
        let mut avg = Averager::new();
        assert!(avg.mean().is_none());

        for (x_i, mean, min, max) in [
            (1.0, 1.0, 1.0, 1.0),
            (0.5, 0.75, 0.5, 1.0),
            (3.5, 5.0 / 3.0, 0.5, 3.5),
        ] {
            avg.add(x_i);
            assert!((avg.mean - mean).abs() < 1e-12);
            assert_eq!(avg.min, Some(min));
            assert_eq!(avg.max, Some(max));
        }
        assert_eq!(avg.count, 3);
    }
}
