use byteorder::{LittleEndian, WriteBytesExt};

const EM_MODEL: u16 = 2040;
const SERIAL: u16 = 201;

/// Serializes a `.all` datagram: length, header, `body`, ETX and checksum.
pub fn datagram(kind: u8, counter: u16, date: u32, time_ms: u32, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x02, kind];
    payload.write_u16::<LittleEndian>(EM_MODEL).unwrap();
    payload.write_u32::<LittleEndian>(date).unwrap();
    payload.write_u32::<LittleEndian>(time_ms).unwrap();
    payload.write_u16::<LittleEndian>(counter).unwrap();
    payload.write_u16::<LittleEndian>(SERIAL).unwrap();
    payload.extend_from_slice(body);
    payload.push(0x03);
    let checksum = payload[1..].iter().map(|b| *b as u16).fold(0u16, u16::wrapping_add);
    payload.write_u16::<LittleEndian>(checksum).unwrap();

    let mut bytes = vec![];
    bytes.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
    bytes.extend(payload);
    bytes
}

/// Datagram of a kind the pipeline does not use
pub fn raw_datagram(kind: u8, date: u32, time_ms: u32, body: &[u8]) -> Vec<u8> {
    datagram(kind, 0, date, time_ms, body)
}

/// Position ('P') datagram
pub fn position_datagram(
    counter: u16,
    date: u32,
    time_ms: u32,
    latitude: f64,
    longitude: f64,
    system: u8,
) -> Vec<u8> {
    let mut body = vec![];
    body.write_i32::<LittleEndian>((latitude * 20_000_000.0).round() as i32).unwrap();
    body.write_i32::<LittleEndian>((longitude * 10_000_000.0).round() as i32).unwrap();
    body.write_u16::<LittleEndian>(10).unwrap(); // fix quality
    body.write_u16::<LittleEndian>(250).unwrap(); // speed
    body.write_u16::<LittleEndian>(9000).unwrap(); // course
    body.write_u16::<LittleEndian>(9000).unwrap(); // heading
    body.push(system);
    body.push(0); // no input datagram
    datagram(b'P', counter, date, time_ms, &body)
}

/// XYZ88 ('X') datagram, beams given as (across track, depth, reflectivity dB)
pub fn xyz88_datagram(
    counter: u16,
    date: u32,
    time_ms: u32,
    beams: &[(f64, f64, f64)],
) -> Vec<u8> {
    let mut body = vec![];
    body.write_u16::<LittleEndian>(9000).unwrap(); // heading
    body.write_u16::<LittleEndian>(15000).unwrap(); // sound speed
    body.write_f32::<LittleEndian>(2.5).unwrap(); // tx depth
    body.write_u16::<LittleEndian>(beams.len() as u16).unwrap();
    body.write_u16::<LittleEndian>(beams.len() as u16).unwrap();
    body.write_f32::<LittleEndian>(15_000.0).unwrap();
    body.extend_from_slice(&[0, 0, 0, 0]);
    for (across, depth, reflectivity) in beams {
        body.write_f32::<LittleEndian>(*depth as f32).unwrap();
        body.write_f32::<LittleEndian>(*across as f32).unwrap();
        body.write_f32::<LittleEndian>(0.0).unwrap();
        body.write_u16::<LittleEndian>(12).unwrap();
        body.extend_from_slice(&[0xff, 0, 0, 0]);
        body.write_i16::<LittleEndian>((reflectivity * 10.0).round() as i16).unwrap();
    }
    datagram(b'X', counter, date, time_ms, &body)
}

/// Depth ('D') datagram, beams given as (across track, depth, reflectivity dB).
/// Depths and offsets are quantized to 1cm, reflectivity to 0.5dB.
pub fn depth_datagram(
    counter: u16,
    date: u32,
    time_ms: u32,
    beams: &[(f64, f64, f64)],
) -> Vec<u8> {
    let mut body = vec![];
    body.write_u16::<LittleEndian>(9000).unwrap(); // heading
    body.write_u16::<LittleEndian>(15000).unwrap(); // sound speed
    body.write_u16::<LittleEndian>(250).unwrap(); // tx depth (cm)
    body.push(beams.len() as u8);
    body.push(beams.len() as u8);
    body.push(1); // z resolution (cm)
    body.push(1); // xy resolution (cm)
    body.write_u16::<LittleEndian>(15_000).unwrap();
    for (i, (across, depth, reflectivity)) in beams.iter().enumerate() {
        body.write_i16::<LittleEndian>((depth * 100.0).round() as i16).unwrap();
        body.write_i16::<LittleEndian>((across * 100.0).round() as i16).unwrap();
        body.write_i16::<LittleEndian>(0).unwrap();
        body.write_i16::<LittleEndian>(-4500).unwrap(); // depression
        body.write_u16::<LittleEndian>(9000).unwrap(); // azimuth
        body.write_u16::<LittleEndian>(800).unwrap(); // range
        body.extend_from_slice(&[0, 20]);
        body.write_i8((reflectivity * 2.0).round() as i8).unwrap();
        body.push(i as u8 + 1);
    }
    body.push(0); // depth offset multiplier
    datagram(b'D', counter, date, time_ms, &body)
}
