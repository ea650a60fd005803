use crate::prelude::Error;

use image::Rgba;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Color stops of the [Palette::Color] ramp, from grey level 0 to 255.
const COLOR_STOPS: [[f64; 3]; 6] = [
    [0.0, 0.0, 131.0],
    [0.0, 60.0, 255.0],
    [0.0, 255.0, 255.0],
    [250.0, 255.0, 0.0],
    [255.0, 60.0, 0.0],
    [128.0, 0.0, 0.0],
];

/// Pixel palette applied to the mapped grey levels.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Palette {
    /// Grey levels are rendered as is.
    #[default]
    Gray,
    /// Grey levels index a blue to red color ramp.
    Color,
}

impl std::fmt::Display for Palette {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Gray => write!(fmt, "gray"),
            Self::Color => write!(fmt, "color"),
        }
    }
}

impl std::str::FromStr for Palette {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "color" | "colour" => Ok(Self::Color),
            _ => Err(Error::UnknownPalette(s.to_string())),
        }
    }
}

impl Palette {
    /// Returns the opaque color of this grey level.
    pub fn color(&self, level: u8) -> Rgba<u8> {
        match self {
            Self::Gray => Rgba([level, level, level, 255]),
            Self::Color => {
                let pos = level as f64 / 255.0 * (COLOR_STOPS.len() - 1) as f64;
                let i = (pos.floor() as usize).min(COLOR_STOPS.len() - 2);
                let t = pos - i as f64;
                let (lo, hi) = (COLOR_STOPS[i], COLOR_STOPS[i + 1]);
                let c = |k: usize| (lo[k] + t * (hi[k] - lo[k])).round() as u8;
                Rgba([c(0), c(1), c(2), 255])
            },
        }
    }
}
