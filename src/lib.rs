#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod annotate;
mod averager;
mod cfg;
mod constants;
mod error;
mod font;
mod geodetic;
mod grid;
mod intensity;
mod isometric;
mod legend;
mod progress;
mod reader;
mod record;
mod resolution;
mod survey;
mod utils;
mod waterfall;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::annotate::{annotate, hms, labels};
    pub use crate::averager::Averager;
    pub use crate::cfg::{Config, IntensityMode, Mapping, Palette, Quantity};
    pub use crate::error::Error;
    pub use crate::geodetic::{Geodesy, Vincenty};
    pub use crate::grid::{assemble, Assembly, WaterfallGrid};
    pub use crate::intensity::{
        map as map_intensity, map_scaled, mapping_bounds, sample_bounds, IntensityScale,
    };
    pub use crate::isometric::stretch;
    pub use crate::legend::{splice, ColorScale, Legend};
    pub use crate::reader::AllReader;
    pub use crate::record::{Emission, PositionFix, Record, RecordSource};
    pub use crate::resolution::{estimate, Estimate, NavigationPoint, SurveyGeometry};
    pub use crate::survey::Survey;
    pub use crate::waterfall::Waterfall;
    // re-export
    pub use hifitime::{Duration, Epoch};
    pub use image::RgbaImage;
}

// pub export
pub use error::Error;
