//! Metadata legend
use image::{imageops, Rgba, RgbaImage};

use crate::{
    cfg::Palette,
    constants::{LEGEND_HEIGHT, LEGEND_LINE_HEIGHT, LEGEND_TICKS},
    font::{draw_text, draw_text_vertical, text_width},
    intensity::IntensityScale,
    utils::linspace,
};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_SCALE: u32 = 2;

/// [ColorScale] colors the legend bar the way the waterfall is colored:
/// values go through the waterfall [IntensityScale], then its [Palette].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub palette: Palette,
    pub scale: IntensityScale,
}

impl ColorScale {
    pub fn new(palette: Palette, scale: IntensityScale) -> Self {
        Self { palette, scale }
    }

    /// Color of `value`
    pub fn color(&self, value: f64) -> Rgba<u8> {
        self.palette.color(self.scale.level(value))
    }
}

/// Largest text scale, up to [TEXT_SCALE], that fits every line in `width` pixels.
pub(crate) fn text_scale(lines: &[String], width: u32) -> u32 {
    let widest = lines.iter().map(|line| text_width(line, 1)).max().unwrap_or(0);
    if widest == 0 {
        return TEXT_SCALE;
    }
    (width / widest).clamp(1, TEXT_SCALE)
}

/// Survey metadata printed beneath the waterfall
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub file_name: String,
    /// Across track swath width (m)
    pub swath_width: f64,
    /// Along track length (m)
    pub length: f64,
    /// Across track pixel size (m)
    pub pixel_size: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    pub mean_depth: f64,
}

impl Legend {
    /// Text lines of this [Legend]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("file:{}", self.file_name),
            format!("Waterfall Width    : {:.2}m", self.swath_width),
            format!("Waterfall Length   : {:.2}m", self.length),
            format!("Pixel Size         : {:.2}m", self.pixel_size),
            format!("Minimum Depth      : {:.2}m", self.min_depth),
            format!("Maximum Depth      : {:.2}m", self.max_depth),
            format!("Mean Depth         : {:.2}m", self.mean_depth),
        ]
    }

    /// Renders this [Legend] as a `width` pixels wide panel. When a [ColorScale]
    /// is provided, a color bar spanning the depth range is added,
    /// along with its tick labels. Text shrinks when lines do not fit.
    pub fn render(&self, width: u32, scale: Option<&ColorScale>) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, LEGEND_HEIGHT, BACKGROUND);

        let lines = self.lines();
        let line_scale = text_scale(&lines, width);

        let mut y = 0;
        for line in &lines {
            draw_text(&mut img, 0, y as i64, line, line_scale, TEXT_COLOR);
            y += LEGEND_LINE_HEIGHT;
        }

        let Some(scale) = scale else {
            return img;
        };

        let bar_x = LEGEND_LINE_HEIGHT / 2;
        let bar_width = width.saturating_sub(LEGEND_LINE_HEIGHT);
        let bar_height = 2 * LEGEND_LINE_HEIGHT;

        let values = linspace(self.min_depth, self.max_depth, bar_width as usize);
        for (i, value) in values.iter().enumerate() {
            let color = scale.color(*value);
            for dy in 0..bar_height {
                let (px, py) = (bar_x + i as u32, y + dy);
                if py < LEGEND_HEIGHT {
                    img.put_pixel(px, py, color);
                }
            }
        }

        y += bar_height + 2;
        for (value, x) in tick_offsets(self.min_depth, self.max_depth, bar_width) {
            let label = format!("{:.2}", value);
            let y_bottom = (y + text_width(&label, TEXT_SCALE)) as i64;
            draw_text_vertical(
                &mut img,
                (bar_x + x) as i64,
                y_bottom,
                &label,
                TEXT_SCALE,
                TEXT_COLOR,
            );
        }
        img
    }
}

/// Tick values evenly spread over `[min, max]` and their offset
/// along a `bar_width` pixels color bar.
pub(crate) fn tick_offsets(min: f64, max: f64, bar_width: u32) -> Vec<(f64, u32)> {
    let span = max - min;
    if !(span > 0.0) {
        return vec![(min, 0)];
    }
    linspace(min, max, LEGEND_TICKS)
        .into_iter()
        .map(|value| {
            let x = (value - min) * (bar_width as f64 / span);
            (value, x.round() as u32)
        })
        .collect()
}

/// Stacks `bottom` beneath `top`. The result is as wide as the widest of both.
pub fn splice(top: &RgbaImage, bottom: &RgbaImage) -> RgbaImage {
    let width = top.width().max(bottom.width());
    let mut img = RgbaImage::new(width, top.height() + bottom.height());
    imageops::replace(&mut img, top, 0, 0);
    imageops::replace(&mut img, bottom, 0, top.height() as i64);
    img
}

#[cfg(test)]
mod test {
    use super::{splice, text_scale, tick_offsets, ColorScale, Legend};
    use crate::{
        cfg::{Mapping, Palette},
        constants::{LEGEND_HEIGHT, LEGEND_LINE_HEIGHT},
        intensity::IntensityScale,
    };
    use image::{Rgba, RgbaImage};
    use rstest::*;

    #[fixture]
    fn legend() -> Legend {
        Legend {
            file_name: "0001_20200625_120000.all".to_string(),
            swath_width: 240.0,
            length: 1234.567,
            pixel_size: 0.5,
            min_depth: 20.0,
            max_depth: 65.0,
            mean_depth: 42.126,
        }
    }

    #[rstest]
    fn text_lines(legend: Legend) {
        let lines = legend.lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "file:0001_20200625_120000.all");
        assert_eq!(lines[2], "Waterfall Length   : 1234.57m");
        assert_eq!(lines[6], "Mean Depth         : 42.13m");
    }

    #[rstest]
    fn without_color_scale(legend: Legend) {
        let img = legend.render(400, None);
        assert_eq!((img.width(), img.height()), (400, LEGEND_HEIGHT));
        // nothing past the text lines
        let text_bottom = 7 * LEGEND_LINE_HEIGHT;
        for (_, y, p) in img.enumerate_pixels() {
            if y >= text_bottom {
                assert_eq!(*p, Rgba([0, 0, 0, 255]));
            }
        }
    }

    #[rstest]
    fn with_color_scale(legend: Legend) {
        let mapping = Mapping::default().with_invert(false);
        let scale = IntensityScale::new(&mapping, legend.min_depth, legend.max_depth);
        let img = legend.render(400, Some(&ColorScale::new(Palette::Gray, scale)));
        let bar_y = 7 * LEGEND_LINE_HEIGHT + 1;
        let bar_x = LEGEND_LINE_HEIGHT / 2;
        assert_eq!(img.get_pixel(bar_x, bar_y), &Rgba([5, 5, 5, 255]));
        assert_eq!(img.get_pixel(bar_x + 381, bar_y), &Rgba([250, 250, 250, 255]));
        let middle = img.get_pixel(bar_x + 191, bar_y).0[0];
        assert!((120..=136).contains(&middle), "middle={}", middle);

        // inverted mapping, inverted bar
        let scale = IntensityScale::new(&Mapping::default(), legend.min_depth, legend.max_depth);
        let img = legend.render(400, Some(&ColorScale::new(Palette::Gray, scale)));
        assert_eq!(img.get_pixel(bar_x, bar_y), &Rgba([250, 250, 250, 255]));
        assert_eq!(img.get_pixel(bar_x + 381, bar_y), &Rgba([5, 5, 5, 255]));
    }

    #[rstest]
    fn text_fits_narrow_panels(legend: Legend) {
        // widest line: 29 characters, 174 pixels at scale 1
        let lines = legend.lines();
        assert_eq!(text_scale(&lines, 1000), 2);
        assert_eq!(text_scale(&lines, 348), 2);
        assert_eq!(text_scale(&lines, 300), 1);
        assert_eq!(text_scale(&lines, 100), 1);

        let img = legend.render(300, None);
        for (x, y, p) in img.enumerate_pixels() {
            if x >= 174 {
                assert_eq!(*p, Rgba([0, 0, 0, 255]), "lit pixel at ({}, {})", x, y);
            }
        }
        // file name still fully drawn: last glyph lit
        assert!((162..174).any(|x| (0..7).any(|y| img.get_pixel(x, y).0[0] == 255)));
    }

    #[test]
    fn ticks() {
        let ticks = tick_offsets(10.0, 19.0, 90);
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0], (10.0, 0));
        assert_eq!(ticks[1], (11.0, 10));
        assert_eq!(ticks[9], (19.0, 90));

        assert_eq!(tick_offsets(5.0, 5.0, 90), vec![(5.0, 0)]);
    }

    #[test]
    fn splicing() {
        let top = RgbaImage::from_pixel(10, 4, Rgba([1, 2, 3, 255]));
        let bottom = RgbaImage::from_pixel(6, 3, Rgba([9, 9, 9, 255]));
        let img = splice(&top, &bottom);
        assert_eq!((img.width(), img.height()), (10, 7));
        assert_eq!(img.get_pixel(9, 3), &Rgba([1, 2, 3, 255]));
        assert_eq!(img.get_pixel(5, 6), &Rgba([9, 9, 9, 255]));
        assert_eq!(img.get_pixel(8, 6).0[3], 0);
    }
}
