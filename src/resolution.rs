//! Survey resolution estimation
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    averager::Averager,
    geodetic::Geodesy,
    prelude::{Emission, Epoch, Error, PositionFix, Record, RecordSource},
};

/// [SurveyGeometry] describes the survey pixel pitch and extents.
/// A null `beam_count` means the survey has no usable emission.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SurveyGeometry {
    /// Mean across track beam spacing (m)
    pub x_resolution: f64,
    /// Mean along track emission spacing (m)
    pub y_resolution: f64,
    /// Largest beam count
    pub beam_count: usize,
    /// Port most across track offset (m)
    pub left_extent: f64,
    /// Starboard most across track offset (m)
    pub right_extent: f64,
    /// Cumulated distance between position fixes (m)
    pub distance_travelled: f64,
}

impl SurveyGeometry {
    /// True when no emission qualified: this survey should not be processed.
    pub fn is_empty(&self) -> bool {
        self.beam_count == 0
    }

    /// Across track swath width (m)
    pub fn swath_width(&self) -> f64 {
        self.right_extent - self.left_extent
    }

    /// Along track stretch that equalizes along and across track
    /// pixel pitch. Falls back to `zoom` when either resolution is degenerate.
    pub fn iso_stretch_factor(&self, zoom: f64) -> f64 {
        let factor = self.y_resolution / self.x_resolution * zoom;
        if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            warn!(
                "degenerate resolution (x={}, y={}): no isometric correction",
                self.x_resolution, self.y_resolution
            );
            zoom
        }
    }
}

/// Navigation point, tied to the emission row it was received at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationPoint {
    /// Number of qualifying emissions read prior this fix
    pub row: usize,
    pub timestamp: Epoch,
    pub latitude: f64,
    pub longitude: f64,
}

/// Output of [estimate]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimate {
    pub geometry: SurveyGeometry,
    /// Filtered navigation track
    pub navigation: Vec<NavigationPoint>,
}

/// Fold state of the streaming pass
#[derive(Debug, Default)]
struct Accumulator {
    /// First positioning system encountered
    system: Option<u8>,
    /// Previous (lon, lat)
    previous: Option<(f64, f64)>,
    last_sequence: Option<u16>,
    distance: f64,
    navigation: Vec<NavigationPoint>,
    /// Per emission mean beam spacing
    spacing: Averager,
    /// Per emission offset extrema
    extents: Averager,
    emissions: usize,
    beam_count: usize,
}

impl Accumulator {
    fn position<G: Geodesy>(&mut self, fix: &PositionFix, geodesy: &G) {
        let system = *self.system.get_or_insert(fix.system);
        if system != fix.system {
            return;
        }
        if let Some(last) = self.last_sequence {
            if fix.sequence_index < last {
                debug!(
                    "{} - position counter went backwards ({} < {})",
                    fix.timestamp, fix.sequence_index, last
                );
            }
        }
        self.last_sequence = Some(fix.sequence_index);

        let (lon, lat) = (fix.longitude, fix.latitude);
        let (prev_lon, prev_lat) = *self.previous.get_or_insert((lon, lat));
        let (range, _, _) = geodesy.range_bearing(prev_lon, prev_lat, lon, lat);
        self.distance += range;
        self.navigation.push(NavigationPoint {
            row: self.emissions,
            timestamp: fix.timestamp,
            latitude: lat,
            longitude: lon,
        });
        self.previous = Some((lon, lat));
    }

    fn emission(&mut self, emission: &Emission) {
        if emission.beam_count() < 2 {
            return;
        }
        let offsets = emission
            .across_track
            .iter()
            .copied()
            .filter(|x| *x != 0.0)
            .collect::<Vec<_>>();

        let Some((min, max)) = offsets.iter().copied().minmax().into_option() else {
            return;
        };

        if offsets.len() > 1 {
            let mut spacing = Averager::new();
            for (a, b) in offsets.iter().tuple_windows() {
                spacing.add((b - a).abs());
            }
            self.spacing.add(spacing.mean);
        }

        self.extents.add(min);
        self.extents.add(max);
        self.emissions += 1;
        self.beam_count = self.beam_count.max(emission.depths.len());
    }

    fn finish(self) -> Estimate {
        if self.emissions == 0 {
            return Estimate {
                geometry: SurveyGeometry::default(),
                navigation: self.navigation,
            };
        }
        let geometry = SurveyGeometry {
            x_resolution: self.spacing.mean().unwrap_or_default(),
            y_resolution: self.distance / self.emissions as f64,
            beam_count: self.beam_count,
            left_extent: self.extents.min.unwrap_or_default(),
            right_extent: self.extents.max.unwrap_or_default(),
            distance_travelled: self.distance,
        };
        info!(
            "x_res={:.2}m y_res={:.2}m extents=[{:.2}, {:.2}]m travelled={:.2}m",
            geometry.x_resolution,
            geometry.y_resolution,
            geometry.left_extent,
            geometry.right_extent,
            geometry.distance_travelled,
        );
        Estimate {
            geometry,
            navigation: self.navigation,
        }
    }
}

/// Streams a survey once to derive its [SurveyGeometry] and navigation track.
/// Only fixes from the first positioning system encountered contribute.
pub fn estimate<S: RecordSource, G: Geodesy>(
    source: &mut S,
    geodesy: &G,
) -> Result<Estimate, Error> {
    let mut acc = Accumulator::default();
    while source.has_more() {
        match source.next_record()? {
            Some(Record::Position(fix)) => acc.position(&fix, geodesy),
            Some(Record::Emission(emission)) => acc.emission(&emission),
            Some(Record::Other(_)) => {},
            None => break,
        }
    }
    Ok(acc.finish())
}

#[cfg(test)]
mod test {
    use super::{estimate, SurveyGeometry};
    use crate::{geodetic::Vincenty, tests::SurveyBuilder};

    #[test]
    fn zero_offsets_are_excluded() {
        let mut survey = SurveyBuilder::new()
            .emission(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0])
            .build();
        let estimate = estimate(&mut survey, &Vincenty::default()).unwrap();
        assert!(estimate.geometry.is_empty());
        assert_eq!(estimate.geometry, SurveyGeometry::default());
    }

    #[test]
    fn single_beam_emissions_do_not_qualify() {
        let mut survey = SurveyBuilder::new()
            .emission(&[5.0], &[1.0])
            .emission(&[], &[])
            .build();
        let estimate = estimate(&mut survey, &Vincenty::default()).unwrap();
        assert!(estimate.geometry.is_empty());
    }

    #[test]
    fn single_position_fix() {
        let mut survey = SurveyBuilder::new()
            .fix(0.0, 57.0, 10.0, 1)
            .emission(&[-10.0, -5.0, 5.0, 10.0], &[1.0, 2.0, 3.0, 4.0])
            .build();
        let estimate = estimate(&mut survey, &Vincenty::default()).unwrap();
        assert_eq!(estimate.geometry.distance_travelled, 0.0);
        assert_eq!(estimate.geometry.y_resolution, 0.0);
        assert_eq!(estimate.navigation.len(), 1);
        assert_eq!(estimate.navigation[0].row, 0);
    }

    #[test]
    fn spacing_and_extents() {
        let mut survey = SurveyBuilder::new()
            .emission(&[-10.0, -5.0, 0.0, 5.0, 10.0], &[1.0; 5])
            .emission(&[-12.0, -6.0, 6.0, 12.0], &[1.0; 4])
            .build();
        let geometry = estimate(&mut survey, &Vincenty::default())
            .unwrap()
            .geometry;

        // (10/2 + 24/3) / 2 : the zero offset is dropped
        assert!((geometry.x_resolution - 6.5).abs() < 1e-12);
        assert_eq!(geometry.beam_count, 5);
        assert_eq!(geometry.left_extent, -12.0);
        assert_eq!(geometry.right_extent, 12.0);
        assert_eq!(geometry.swath_width(), 24.0);
    }

    #[test]
    fn only_first_positioning_system_is_used() {
        let mut survey = SurveyBuilder::new()
            .fix(0.0, 0.0, 0.0, 1)
            .emission(&[-1.0, 1.0], &[1.0, 1.0])
            .fix(0.5, 45.0, 45.0, 2)
            .emission(&[-1.0, 1.0], &[1.0, 1.0])
            .fix(1.0, 0.0, 1.0, 1)
            .build();
        let estimate = estimate(&mut survey, &Vincenty::default()).unwrap();

        let rows = estimate.navigation.iter().map(|p| p.row).collect::<Vec<_>>();
        assert_eq!(rows, vec![0, 2]);

        let geometry = estimate.geometry;
        assert!((geometry.distance_travelled - 111_319.490_793).abs() < 1e-3);
        assert!((geometry.y_resolution - geometry.distance_travelled / 2.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_stretch_factor() {
        let geometry = SurveyGeometry {
            x_resolution: 5.0,
            y_resolution: 0.0,
            beam_count: 10,
            ..Default::default()
        };
        assert_eq!(geometry.iso_stretch_factor(2.0), 2.0);

        let geometry = SurveyGeometry {
            x_resolution: 2.0,
            y_resolution: 5.0,
            beam_count: 10,
            ..Default::default()
        };
        assert_eq!(geometry.iso_stretch_factor(2.0), 5.0);
    }
}
