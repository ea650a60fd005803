//! Kongsberg EM datagram decoding
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::ErrorKind;

use crate::{
    prelude::{Duration, Epoch, Error},
    record::{Emission, PositionFix, Record},
};

/// Datagram start identifier
pub(crate) const STX: u8 = 0x02;

/// Position datagram
pub(crate) const POSITION: u8 = b'P';

/// XYZ 88 (depth, across/along track, reflectivity) datagram
pub(crate) const XYZ88: u8 = b'X';

/// Depth datagram of older EM systems, superseded by [XYZ88]
pub(crate) const DEPTH: u8 = b'D';

fn truncated(e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        Error::TruncatedDatagram
    } else {
        Error::Io(e)
    }
}

/// Header shared by all datagrams
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Header {
    /// Datagram type
    pub kind: u8,
    /// EM model number
    pub model: u16,
    /// year * 10000 + month * 100 + day
    pub date: u32,
    /// Time since midnight (ms)
    pub time_ms: u32,
    /// Ping or position counter
    pub counter: u16,
    /// System serial number
    pub serial: u16,
}

impl Header {
    pub(crate) fn decode(rd: &mut &[u8]) -> Result<Self, Error> {
        let stx = rd.read_u8().map_err(truncated)?;
        if stx != STX {
            return Err(Error::BadStartIdentifier(stx));
        }
        Ok(Self {
            kind: rd.read_u8().map_err(truncated)?,
            model: rd.read_u16::<LittleEndian>().map_err(truncated)?,
            date: rd.read_u32::<LittleEndian>().map_err(truncated)?,
            time_ms: rd.read_u32::<LittleEndian>().map_err(truncated)?,
            counter: rd.read_u16::<LittleEndian>().map_err(truncated)?,
            serial: rd.read_u16::<LittleEndian>().map_err(truncated)?,
        })
    }

    /// UTC [Epoch] of this datagram
    pub(crate) fn epoch(&self) -> Result<Epoch, Error> {
        let (year, month, day) = (
            (self.date / 10_000) as i32,
            ((self.date / 100) % 100) as u8,
            (self.date % 100) as u8,
        );
        let midnight = Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map_err(|_| Error::InvalidDate(self.date))?;
        Ok(midnight + Duration::from_milliseconds(self.time_ms as f64))
    }
}

fn decode_position(header: &Header, rd: &mut &[u8]) -> Result<PositionFix, Error> {
    let latitude = rd.read_i32::<LittleEndian>().map_err(truncated)? as f64 / 20_000_000.0;
    let longitude = rd.read_i32::<LittleEndian>().map_err(truncated)? as f64 / 10_000_000.0;
    // fix quality, speed, course, heading
    for _ in 0..4 {
        rd.read_u16::<LittleEndian>().map_err(truncated)?;
    }
    let system = rd.read_u8().map_err(truncated)?;
    Ok(PositionFix {
        sequence_index: header.counter,
        timestamp: header.epoch()?,
        latitude,
        longitude,
        system,
    })
}

fn decode_xyz88(header: &Header, rd: &mut &[u8]) -> Result<Emission, Error> {
    let _heading = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _sound_speed = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _tx_depth = rd.read_f32::<LittleEndian>().map_err(truncated)?;
    let nb_beams = rd.read_u16::<LittleEndian>().map_err(truncated)? as usize;
    let _nb_valid = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _sampling_freq = rd.read_f32::<LittleEndian>().map_err(truncated)?;
    // scanning info + spare
    for _ in 0..4 {
        rd.read_u8().map_err(truncated)?;
    }

    let mut emission = Emission {
        sequence_index: header.counter,
        timestamp: header.epoch()?,
        samples: Vec::with_capacity(nb_beams),
        across_track: Vec::with_capacity(nb_beams),
        depths: Vec::with_capacity(nb_beams),
    };

    for _ in 0..nb_beams {
        let depth = rd.read_f32::<LittleEndian>().map_err(truncated)?;
        let across = rd.read_f32::<LittleEndian>().map_err(truncated)?;
        let _along = rd.read_f32::<LittleEndian>().map_err(truncated)?;
        // window length, quality, incidence, detection, cleaning
        rd.read_u16::<LittleEndian>().map_err(truncated)?;
        rd.read_u32::<LittleEndian>().map_err(truncated)?;
        let reflectivity = rd.read_i16::<LittleEndian>().map_err(truncated)?;

        emission.depths.push(depth as f64);
        emission.across_track.push(across as f64);
        emission.samples.push(reflectivity as f64 * 0.1);
    }
    Ok(emission)
}

fn decode_depth(header: &Header, rd: &mut &[u8]) -> Result<Emission, Error> {
    let _heading = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _sound_speed = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _tx_depth_cm = rd.read_u16::<LittleEndian>().map_err(truncated)?;
    let _max_beams = rd.read_u8().map_err(truncated)?;
    let nb_beams = rd.read_u8().map_err(truncated)? as usize;
    // resolutions (cm)
    let z_res = rd.read_u8().map_err(truncated)? as f64 / 100.0;
    let xy_res = rd.read_u8().map_err(truncated)? as f64 / 100.0;
    let _sampling_rate = rd.read_u16::<LittleEndian>().map_err(truncated)?;

    let mut emission = Emission {
        sequence_index: header.counter,
        timestamp: header.epoch()?,
        samples: Vec::with_capacity(nb_beams),
        across_track: Vec::with_capacity(nb_beams),
        depths: Vec::with_capacity(nb_beams),
    };

    for _ in 0..nb_beams {
        let depth = rd.read_i16::<LittleEndian>().map_err(truncated)?;
        let across = rd.read_i16::<LittleEndian>().map_err(truncated)?;
        let _along = rd.read_i16::<LittleEndian>().map_err(truncated)?;
        // depression, azimuth, range
        rd.read_i16::<LittleEndian>().map_err(truncated)?;
        rd.read_u16::<LittleEndian>().map_err(truncated)?;
        rd.read_u16::<LittleEndian>().map_err(truncated)?;
        // quality, detection window
        rd.read_u16::<LittleEndian>().map_err(truncated)?;
        let reflectivity = rd.read_i8().map_err(truncated)?;
        let _beam = rd.read_u8().map_err(truncated)?;

        emission.depths.push(depth as f64 * z_res);
        emission.across_track.push(across as f64 * xy_res);
        emission.samples.push(reflectivity as f64 * 0.5);
    }
    Ok(emission)
}

/// Decodes one datagram payload (everything past the length field).
pub(crate) fn decode(payload: &[u8]) -> Result<(Option<Epoch>, Record), Error> {
    let mut rd = payload;
    let header = Header::decode(&mut rd)?;
    match header.kind {
        POSITION => {
            let fix = decode_position(&header, &mut rd)?;
            Ok((Some(fix.timestamp), Record::Position(fix)))
        },
        XYZ88 => {
            let emission = decode_xyz88(&header, &mut rd)?;
            Ok((Some(emission.timestamp), Record::Emission(emission)))
        },
        DEPTH => {
            let emission = decode_depth(&header, &mut rd)?;
            Ok((Some(emission.timestamp), Record::Emission(emission)))
        },
        kind => Ok((header.epoch().ok(), Record::Other(kind))),
    }
}
