//! Timestamp annotations
use image::{Rgba, RgbaImage};
use log::debug;

use crate::{
    constants::LABEL_ROW_GAP,
    font::{draw_hline, draw_text},
    prelude::{Epoch, NavigationPoint},
};

const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TICK_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);
const TICK_LENGTH: u32 = 20;
const LABEL_SCALE: u32 = 2;

/// Formats `t` as HH:MM:SS (UTC)
pub fn hms(t: Epoch) -> String {
    let (_, _, _, h, m, s, _) = t.to_gregorian_utc();
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Selects the navigation points to label: the first one, then each
/// point at least [LABEL_ROW_GAP] rows past the previously labelled one.
/// Returns the image row and the label of each selected point.
pub fn labels(navigation: &[NavigationPoint], stretch: f64) -> Vec<(u32, String)> {
    let mut last = Option::<usize>::None;
    navigation
        .iter()
        .filter(|point| match last {
            Some(last_row) if point.row < last_row + LABEL_ROW_GAP => false,
            _ => {
                last = Some(point.row);
                true
            },
        })
        .map(|point| {
            let row = (point.row as f64 * stretch).round() as u32;
            (row, hms(point.timestamp))
        })
        .collect()
}

/// Draws timestamp labels on the left edge of the waterfall.
pub fn annotate(img: &mut RgbaImage, navigation: &[NavigationPoint], stretch: f64) {
    let labels = labels(navigation, stretch);
    debug!("{} timestamp labels", labels.len());
    for (row, label) in labels {
        if row >= img.height() {
            continue;
        }
        draw_hline(img, 0, row as i64, TICK_LENGTH, TICK_COLOR);
        draw_text(img, 0, row as i64 + 2, &label, LABEL_SCALE, LABEL_COLOR);
    }
}
