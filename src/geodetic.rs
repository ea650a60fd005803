//! Geodetic range and bearing
use log::debug;
use map_3d::{deg2rad, rad2deg};

use crate::constants::{WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS_M};

/// Maximal number of Vincenty iterations
const MAX_ITERATIONS: usize = 200;

/// Vincenty convergence criteria (rad)
const CONVERGENCE: f64 = 1.0E-12;

/// [Geodesy] solves the inverse geodetic problem between two positions.
pub trait Geodesy {
    /// Returns (range [m], forward azimuth [°], reverse azimuth [°])
    /// from (lon1, lat1) to (lon2, lat2), all in decimal degrees.
    fn range_bearing(&self, lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> (f64, f64, f64);
}

/// Vincenty's inverse formula on the WGS84 ellipsoid.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vincenty {}

fn azimuth_deg(rad: f64) -> f64 {
    rad2deg(rad).rem_euclid(360.0)
}

impl Geodesy for Vincenty {
    fn range_bearing(&self, lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> (f64, f64, f64) {
        let a = WGS84_SEMI_MAJOR_AXIS_M;
        let f = WGS84_FLATTENING;
        let b = (1.0 - f) * a;

        let l = deg2rad(lon2 - lon1);
        let u1 = ((1.0 - f) * deg2rad(lat1).tan()).atan();
        let u2 = ((1.0 - f) * deg2rad(lat2).tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
        let (mut cos2_alpha, mut cos_2sigma_m) = (0.0, 0.0);
        let (mut sin_lambda, mut cos_lambda) = (0.0, 0.0);

        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            (sin_lambda, cos_lambda) = lambda.sin_cos();
            sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            if sin_sigma == 0.0 {
                // coincident points
                return (0.0, 0.0, 0.0);
            }
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos2_alpha = 1.0 - sin_alpha.powi(2);
            cos_2sigma_m = if cos2_alpha != 0.0 {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha
            } else {
                // equatorial line
                0.0
            };
            let c = f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));
            if (lambda - previous).abs() < CONVERGENCE {
                converged = true;
                break;
            }
        }
        if !converged {
            debug!(
                "vincenty did not converge ({:.6},{:.6}) -> ({:.6},{:.6})",
                lat1, lon1, lat2, lon2
            );
        }

        let u_sq = cos2_alpha * (a.powi(2) - b.powi(2)) / b.powi(2);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma.powi(2))
                            * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

        let range = b * big_a * (sigma - delta_sigma);

        let alpha1 = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
        let alpha2 = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

        (
            range,
            azimuth_deg(alpha1),
            azimuth_deg(alpha2 + std::f64::consts::PI),
        )
    }
}
