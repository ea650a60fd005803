#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{constants::MIN_AUTO_RESOLUTION, prelude::Error};

mod mapping;
mod palette;

pub use mapping::{IntensityMode, Mapping};
pub use palette::Palette;

/// Per beam measurement stacked into the waterfall.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Quantity {
    /// Seabed reflectivity (dB)
    #[default]
    Backscatter,
    /// Depth below the transducer (m)
    Depth,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Backscatter => write!(fmt, "backscatter"),
            Self::Depth => write!(fmt, "depth"),
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backscatter" | "bs" | "reflectivity" => Ok(Self::Backscatter),
            "depth" | "z" => Ok(Self::Depth),
            _ => Err(Error::UnknownQuantity(s.to_string())),
        }
    }
}

fn default_zoom() -> f64 {
    0.0
}

fn default_annotate() -> bool {
    false
}

fn default_rotate() -> bool {
    false
}

fn default_min_auto_resolution() -> usize {
    MIN_AUTO_RESOLUTION
}

/// Waterfall synthesis parametrization
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Across track scale factor. Larger values make larger images.
    /// 0 selects the smallest power of two that reaches
    /// [Config::min_auto_resolution] pixels across track.
    #[cfg_attr(feature = "serde", serde(default = "default_zoom"))]
    pub zoom: f64,
    /// Overlay timestamps and splice the metadata legend.
    #[cfg_attr(feature = "serde", serde(default = "default_annotate"))]
    pub annotate: bool,
    /// Rotate the final image clockwise, so it reads left to right.
    #[cfg_attr(feature = "serde", serde(default = "default_rotate"))]
    pub rotate: bool,
    /// [Palette]
    #[cfg_attr(feature = "serde", serde(default))]
    pub palette: Palette,
    /// [Quantity] to shade the waterfall with
    #[cfg_attr(feature = "serde", serde(default))]
    pub quantity: Quantity,
    /// Intensity [Mapping]
    #[cfg_attr(feature = "serde", serde(default))]
    pub mapping: Mapping,
    /// Across track pixels targeted by automatic zoom
    #[cfg_attr(feature = "serde", serde(default = "default_min_auto_resolution"))]
    pub min_auto_resolution: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            annotate: default_annotate(),
            rotate: default_rotate(),
            palette: Palette::default(),
            quantity: Quantity::default(),
            mapping: Mapping::default(),
            min_auto_resolution: default_min_auto_resolution(),
        }
    }
}

impl Config {
    /// Returns [Config] with desired zoom factor
    pub fn with_zoom(&self, zoom: f64) -> Self {
        let mut s = self.clone();
        s.zoom = zoom;
        s
    }
    /// Returns [Config] with annotation preference
    pub fn with_annotation(&self, annotate: bool) -> Self {
        let mut s = self.clone();
        s.annotate = annotate;
        s
    }
    /// Returns [Config] with rotation preference
    pub fn with_rotation(&self, rotate: bool) -> Self {
        let mut s = self.clone();
        s.rotate = rotate;
        s
    }
    /// Returns [Config] with desired [Palette]
    pub fn with_palette(&self, palette: Palette) -> Self {
        let mut s = self.clone();
        s.palette = palette;
        s
    }
    /// Returns [Config] with desired [Quantity]
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        let mut s = self.clone();
        s.quantity = quantity;
        s
    }
    /// Returns [Config] with desired [Mapping]
    pub fn with_mapping(&self, mapping: Mapping) -> Self {
        let mut s = self.clone();
        s.mapping = mapping;
        s
    }

    /// Verifies this [Config] is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.zoom.is_finite() || self.zoom < 0.0 {
            return Err(Error::InvalidZoom(self.zoom));
        }
        if let Some(clip) = self.mapping.clip_percent {
            if !(0.0..50.0).contains(&clip) {
                return Err(Error::InvalidClipPercent(clip));
            }
        }
        Ok(())
    }

    /// Zoom factor to use for a survey with `beam_count` beams.
    pub fn zoom_for(&self, beam_count: usize) -> f64 {
        if self.zoom > 0.0 {
            return self.zoom;
        }
        let mut zoom = 1.0;
        if beam_count == 0 {
            return zoom;
        }
        while (beam_count as f64 * zoom) < self.min_auto_resolution as f64 {
            zoom *= 2.0;
        }
        zoom
    }
}

#[cfg(test)]
mod test {
    use super::{Config, Mapping, Quantity};
    use std::str::FromStr;

    #[test]
    fn automatic_zoom() {
        let cfg = Config::default();
        for (beams, zoom) in [(400, 1.0), (300, 1.0), (256, 2.0), (100, 4.0), (1, 512.0)] {
            assert_eq!(cfg.zoom_for(beams), zoom, "beams={}", beams);
        }
        assert_eq!(cfg.with_zoom(0.5).zoom_for(100), 0.5);
    }

    #[test]
    fn validation() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::default().with_zoom(-1.0).validate().is_err());
        assert!(Config::default().with_zoom(f64::NAN).validate().is_err());

        let clipped = Config::default().with_mapping(Mapping::default().with_clip_percent(60.0));
        assert!(clipped.validate().is_err());

        let clipped = Config::default().with_mapping(Mapping::default().with_clip_percent(1.0));
        assert!(clipped.validate().is_ok());
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(Quantity::from_str("BS").unwrap(), Quantity::Backscatter);
        assert_eq!(Quantity::from_str("depth").unwrap(), Quantity::Depth);
        assert!(Quantity::from_str("speed").is_err());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialize_partial_config() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "zoom": 2.0,
                "annotate": true,
                "palette": "Color",
                "mapping": { "mode": "Logarithmic", "clip_percent": 1.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.zoom, 2.0);
        assert!(cfg.annotate);
        assert!(!cfg.rotate);
        assert_eq!(cfg.palette, super::Palette::Color);
        assert_eq!(cfg.mapping.mode, super::IntensityMode::Logarithmic);
        assert!(cfg.mapping.invert);
        assert_eq!(cfg.mapping.clip_percent, Some(1.0));
        assert_eq!(cfg.min_auto_resolution, 300);
    }
}
