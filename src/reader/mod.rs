//! Kongsberg `.all` survey reader
use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use crate::{
    prelude::{Epoch, Error},
    record::{Record, RecordSource},
};

mod datagram;

/// [AllReader] decodes position, XYZ88 and depth datagrams from a `.all` survey.
/// Every other datagram is reported as [Record::Other].
pub struct AllReader<R: Read + Seek> {
    inner: R,
    /// Total stream length (bytes)
    len: u64,
    /// Current offset (bytes)
    offset: u64,
    record_count: usize,
    timestamp: Option<Epoch>,
}

impl AllReader<BufReader<File>> {
    /// Opens a `.all` survey file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let is_all = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("all"));
        if !is_all {
            return Err(Error::UnsupportedFormat(path.display().to_string()));
        }
        let fd = File::open(path)?;
        Self::new(BufReader::new(fd))
    }
}

impl<R: Read + Seek> AllReader<R> {
    /// Builds an [AllReader] from any seekable stream.
    /// The stream is scanned once to count its datagrams.
    pub fn new(mut inner: R) -> Result<Self, Error> {
        let len = inner.seek(SeekFrom::End(0))?;
        let mut offset = 0;
        let mut record_count = 0;
        while offset + 4 <= len {
            inner.seek(SeekFrom::Start(offset))?;
            let size = inner.read_u32::<LittleEndian>()? as u64;
            offset += 4 + size;
            record_count += 1;
        }
        inner.seek(SeekFrom::Start(0))?;
        debug!("{} datagrams ({} bytes)", record_count, len);
        Ok(Self {
            inner,
            len,
            offset: 0,
            record_count,
            timestamp: None,
        })
    }
}

impl<R: Read + Seek> RecordSource for AllReader<R> {
    fn record_count(&self) -> usize {
        self.record_count
    }

    fn has_more(&self) -> bool {
        self.offset + 4 <= self.len
    }

    fn next_record(&mut self) -> Result<Option<Record>, Error> {
        if !self.has_more() {
            return Ok(None);
        }
        let size = self.inner.read_u32::<LittleEndian>()? as u64;
        if self.offset + 4 + size > self.len {
            return Err(Error::TruncatedDatagram);
        }
        let mut payload = vec![0; size as usize];
        self.inner.read_exact(&mut payload)?;
        self.offset += 4 + size;

        let (timestamp, record) = datagram::decode(&payload)?;
        if timestamp.is_some() {
            self.timestamp = timestamp;
        }
        Ok(Some(record))
    }

    fn current_timestamp(&self) -> Option<Epoch> {
        self.timestamp
    }
}
