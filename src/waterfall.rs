//! Waterfall synthesis
use image::{imageops, GrayAlphaImage, RgbaImage};
use log::{info, warn};

use std::path::{Path, PathBuf};

use crate::{
    annotate::annotate,
    cfg::{Config, Palette, Quantity},
    geodetic::{Geodesy, Vincenty},
    grid::assemble,
    intensity::{map_scaled, mapping_bounds, IntensityScale},
    isometric::stretch,
    legend::{splice, ColorScale, Legend},
    prelude::{Error, RecordSource, Survey},
    reader::AllReader,
    resolution::estimate,
};

/// Colorizes mapped grey levels, keeping cells without data transparent.
fn colorize(grey: &GrayAlphaImage, palette: Palette) -> RgbaImage {
    RgbaImage::from_fn(grey.width(), grey.height(), |x, y| {
        let px = grey.get_pixel(x, y);
        let mut color = palette.color(px.0[0]);
        color.0[3] = px.0[1];
        color
    })
}

/// [Waterfall] turns surveys into isometric waterfall images.
pub struct Waterfall<G: Geodesy = Vincenty> {
    cfg: Config,
    geodesy: G,
}

impl Waterfall<Vincenty> {
    /// Builds a [Waterfall] that measures distances with [Vincenty].
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        Self::with_geodesy(cfg, Vincenty::default())
    }
}

impl<G: Geodesy> Waterfall<G> {
    /// Builds a [Waterfall] with a custom [Geodesy].
    pub fn with_geodesy(cfg: &Config, geodesy: G) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self {
            cfg: cfg.clone(),
            geodesy,
        })
    }

    /// [Config] in use
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Renders the waterfall of one buffered [Survey].
    /// `name` is printed in the legend.
    pub fn render(&self, name: &str, survey: &mut Survey) -> Result<RgbaImage, Error> {
        survey.rewind();
        let estimate = estimate(survey, &self.geodesy)?;
        let geometry = estimate.geometry;
        if geometry.is_empty() {
            return Err(Error::NoData);
        }

        let zoom = self.cfg.zoom_for(geometry.beam_count);
        let stretch_factor = geometry.iso_stretch_factor(zoom);
        info!(
            "{}: zoom={} isometric stretch={:.2}",
            name, zoom, stretch_factor
        );

        survey.rewind();
        let assembly = assemble(survey, &geometry, zoom, self.cfg.quantity)?;
        let grid = stretch(&assembly.grid, stretch_factor);

        let observed = (assembly.sample_min, assembly.sample_max);
        let (lower, upper) = mapping_bounds(&grid, &self.cfg.mapping, observed);
        let scale = IntensityScale::new(&self.cfg.mapping, lower, upper);

        let grey = map_scaled(&grid, &scale);
        let mut img = colorize(&grey, self.cfg.palette);

        if self.cfg.annotate {
            annotate(&mut img, &estimate.navigation, stretch_factor);

            let depths = &assembly.depths;
            let legend = Legend {
                file_name: name.to_string(),
                swath_width: geometry.swath_width(),
                length: geometry.distance_travelled,
                pixel_size: geometry.swath_width() / img.width() as f64,
                min_depth: depths.min.unwrap_or_default(),
                max_depth: depths.max.unwrap_or_default(),
                mean_depth: depths.mean().unwrap_or_default(),
            };

            let color_scale = match (self.cfg.palette, self.cfg.quantity) {
                (Palette::Color, Quantity::Depth) => {
                    Some(ColorScale::new(self.cfg.palette, scale))
                },
                _ => None,
            };
            let panel = legend.render(img.width(), color_scale.as_ref());
            img = splice(&img, &panel);
        }

        if self.cfg.rotate {
            img = imageops::rotate90(&img);
        }
        Ok(img)
    }

    /// Renders any [RecordSource], buffering it first.
    pub fn render_source<S: RecordSource>(
        &self,
        name: &str,
        source: &mut S,
    ) -> Result<RgbaImage, Error> {
        let mut survey = Survey::from_source(source)?;
        self.render(name, &mut survey)
    }

    /// Processes one `.all` survey file and saves its waterfall
    /// next to it, as `<stem>.png`. Returns the image path.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, Error> {
        let path = path.as_ref();
        info!("processing {}", path.display());

        let mut reader = AllReader::open(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let img = self.render_source(&name, &mut reader)?;

        let output = path.with_extension("png");
        img.save(&output)?;
        info!("saved to {}", output.display());
        Ok(output)
    }

    /// Processes several survey files, one after the other.
    /// A failure is reported and does not stop the batch.
    pub fn process_batch<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Result<PathBuf, Error>> {
        paths
            .iter()
            .map(|path| {
                let result = self.process_file(path);
                if let Err(e) = &result {
                    warn!("{}: {}, skipping", path.as_ref().display(), e);
                }
                result
            })
            .collect()
    }
}
