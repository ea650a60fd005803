use thiserror::Error;

/// Errors that abort the processing of one survey file.
/// A batch carries on with the next file.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O failure while reading a survey or writing an image.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The selected file is not a Kongsberg `.all` survey.
    #[error("{0} is not a .all file")]
    UnsupportedFormat(String),

    /// Every datagram must start with STX (0x02).
    #[error("invalid datagram start identifier 0x{0:02x}")]
    BadStartIdentifier(u8),

    /// Datagram length exceeds what is left in the file, or what
    /// its own payload announces.
    #[error("truncated datagram")]
    TruncatedDatagram,

    /// Datagram header date is not a valid YYYYMMDD calendar date.
    #[error("invalid datagram date {0}")]
    InvalidDate(u32),

    /// The survey does not contain a single emission with more than one beam.
    #[error("no data to process")]
    NoData,

    /// Image encoding failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unknown intensity mode \"{0}\"")]
    UnknownIntensityMode(String),

    #[error("unknown palette \"{0}\"")]
    UnknownPalette(String),

    #[error("unknown quantity \"{0}\"")]
    UnknownQuantity(String),

    /// Clip percentile must lie within [0, 50).
    #[error("invalid clip percentile {0}")]
    InvalidClipPercent(f64),

    /// Zoom must be a finite, positive number (or zero for automatic).
    #[error("invalid zoom factor {0}")]
    InvalidZoom(f64),
}
