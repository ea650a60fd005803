/// WGS84 Ellipsoid semi-major axis (m)
pub const WGS84_SEMI_MAJOR_AXIS_M: f64 = 6378137.0_f64;

/// WGS84 Ellipsoid flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Lowest grey level of the linear intensity mapping
pub const LINEAR_GREY_MIN: f64 = 5.0;

/// Highest grey level of the linear intensity mapping
pub const LINEAR_GREY_MAX: f64 = 250.0;

/// Lowest grey level of the logarithmic intensity mapping
pub const LOG_GREY_MIN: f64 = 0.0;

/// Highest grey level of the logarithmic intensity mapping
pub const LOG_GREY_MAX: f64 = 255.0;

/// Minimal gap, in emission rows, between two timestamp labels
pub const LABEL_ROW_GAP: usize = 100;

/// Automatic zoom targets at least this many across-track pixels
pub const MIN_AUTO_RESOLUTION: usize = 300;

/// Legend panel height (pixels)
pub const LEGEND_HEIGHT: u32 = 256;

/// Legend text line height (pixels)
pub const LEGEND_LINE_HEIGHT: u32 = 18;

/// Number of tick labels along the legend color bar
pub const LEGEND_TICKS: usize = 10;

/// Progress is reported when the record second-of-day is a multiple of this
pub const PROGRESS_PERIOD_S: u64 = 30;
