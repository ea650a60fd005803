use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// How sample values are spread over the grey levels.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum IntensityMode {
    /// Samples are scaled linearly over grey levels [5, 250].
    #[default]
    Linear,
    /// Samples (and their bounds) are log transformed first,
    /// then scaled linearly over grey levels [0, 255].
    /// Non positive values are mapped to log value 0.
    Logarithmic,
}

impl std::fmt::Display for IntensityMode {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Linear => write!(fmt, "linear"),
            Self::Logarithmic => write!(fmt, "logarithmic"),
        }
    }
}

impl std::str::FromStr for IntensityMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "lin" | "gray" => Ok(Self::Linear),
            "logarithmic" | "log" | "graylog" => Ok(Self::Logarithmic),
            _ => Err(Error::UnknownIntensityMode(s.to_string())),
        }
    }
}

fn default_invert() -> bool {
    true
}

/// Intensity mapping policy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Mapping {
    /// [IntensityMode]
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: IntensityMode,
    /// Strongest samples are rendered darkest when set.
    #[cfg_attr(feature = "serde", serde(default = "default_invert"))]
    pub invert: bool,
    /// Percentage of samples excluded at both ends of the
    /// sample range, to reduce the influence of outliers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clip_percent: Option<f64>,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            mode: IntensityMode::default(),
            invert: default_invert(),
            clip_percent: None,
        }
    }
}

impl Mapping {
    /// Copies and returns [Mapping] with desired [IntensityMode]
    pub fn with_mode(&self, mode: IntensityMode) -> Self {
        let mut s = *self;
        s.mode = mode;
        s
    }
    /// Copies and returns [Mapping] with inversion preference
    pub fn with_invert(&self, invert: bool) -> Self {
        let mut s = *self;
        s.invert = invert;
        s
    }
    /// Copies and returns [Mapping] with clip percentile
    pub fn with_clip_percent(&self, percent: f64) -> Self {
        let mut s = *self;
        s.clip_percent = Some(percent);
        s
    }
    /// Clip percentile in use, `None` when clipping is disabled.
    pub(crate) fn clip(&self) -> Option<f64> {
        self.clip_percent.filter(|p| *p > 0.0)
    }
}

#[cfg(test)]
mod test {
    use super::{IntensityMode, Mapping};
    use std::str::FromStr;

    #[test]
    fn intensity_mode_parsing() {
        for (desc, expected) in [
            ("linear", IntensityMode::Linear),
            (" Gray ", IntensityMode::Linear),
            ("log", IntensityMode::Logarithmic),
            ("GRAYLOG", IntensityMode::Logarithmic),
        ] {
            assert_eq!(IntensityMode::from_str(desc).unwrap(), expected);
        }
        assert!(IntensityMode::from_str("sqrt").is_err());
        assert_eq!(IntensityMode::Logarithmic.to_string(), "logarithmic");
    }

    #[test]
    fn clip_disabled_when_null() {
        let mapping = Mapping::default();
        assert!(mapping.invert);
        assert_eq!(mapping.clip(), None);
        assert_eq!(mapping.with_clip_percent(0.0).clip(), None);
        assert_eq!(mapping.with_clip_percent(2.5).clip(), Some(2.5));
    }
}
