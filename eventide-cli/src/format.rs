//! Minimal on-disk container for event recordings.
//!
//! Layout, all little-endian:
//! - header: magic `EVTR`, version `u8`, sensor width `u16`, sensor height `u16`
//! - body: packed 14-byte records `t: u64 | x: u16 | y: u16 | p: u16`
//!
//! Timestamps must be non-decreasing. The reader checks this while decoding
//! so a corrupt file surfaces as a decode error instead of tripping the
//! estimators' caller contract downstream.

use std::io::{self, Read, Write};

use eventide_core::Event;
use thiserror::Error;

pub const MAGIC: [u8; 4] = *b"EVTR";
pub const VERSION: u8 = 1;

const RECORD_SIZE: usize = 14;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("not an event recording (bad magic)")]
    BadMagic,
    #[error("unsupported recording version {0}")]
    UnsupportedVersion(u8),
    #[error("truncated record at event index {0}")]
    TruncatedRecord(u64),
    #[error("timestamp regression at event index {index}: {t} after {previous}")]
    TimestampRegression { index: u64, t: u64, previous: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Sensor geometry carried by the recording header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Sensor width in pixels
    pub width: u16,
    /// Sensor height in pixels
    pub height: u16,
}

/// Lazy decoder over a recording: parses the header on construction, then
/// yields events one at a time as a fallible iterator.
pub struct RecordingReader<R> {
    inner: R,
    header: Header,
    index: u64,
    previous_t: u64,
}

impl<R: Read> RecordingReader<R> {
    pub fn new(mut inner: R) -> Result<Self, FormatError> {
        let mut magic = [0u8; 4];
        inner.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic);
        }

        let mut meta = [0u8; 5];
        inner.read_exact(&mut meta)?;
        if meta[0] != VERSION {
            return Err(FormatError::UnsupportedVersion(meta[0]));
        }

        Ok(Self {
            inner,
            header: Header {
                width: u16::from_le_bytes([meta[1], meta[2]]),
                height: u16::from_le_bytes([meta[3], meta[4]]),
            },
            index: 0,
            previous_t: 0,
        })
    }

    #[inline]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Decodes the next record, distinguishing clean end of file (no bytes
    /// left) from a torn record.
    fn next_event(&mut self) -> Result<Option<Event>, FormatError> {
        let mut record = [0u8; RECORD_SIZE];
        let mut filled = 0usize;
        while filled < RECORD_SIZE {
            match self.inner.read(&mut record[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < RECORD_SIZE {
            return Err(FormatError::TruncatedRecord(self.index));
        }

        let t = u64::from_le_bytes(record[0..8].try_into().unwrap());
        let x = u16::from_le_bytes(record[8..10].try_into().unwrap());
        let y = u16::from_le_bytes(record[10..12].try_into().unwrap());
        let p = u16::from_le_bytes(record[12..14].try_into().unwrap());

        if self.index > 0 && t < self.previous_t {
            return Err(FormatError::TimestampRegression {
                index: self.index,
                t,
                previous: self.previous_t,
            });
        }
        self.previous_t = t;
        self.index += 1;

        Ok(Some(Event { t, x, y, p }))
    }
}

impl<R: Read> Iterator for RecordingReader<R> {
    type Item = Result<Event, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

/// Encoder counterpart, used by the tooling and tests.
pub struct RecordingWriter<W> {
    inner: W,
}

impl<W: Write> RecordingWriter<W> {
    pub fn new(mut inner: W, header: Header) -> Result<Self, FormatError> {
        inner.write_all(&MAGIC)?;
        inner.write_all(&[VERSION])?;
        inner.write_all(&header.width.to_le_bytes())?;
        inner.write_all(&header.height.to_le_bytes())?;
        Ok(Self { inner })
    }

    pub fn write_event(&mut self, event: &Event) -> Result<(), FormatError> {
        self.inner.write_all(&event.t.to_le_bytes())?;
        self.inner.write_all(&event.x.to_le_bytes())?;
        self.inner.write_all(&event.y.to_le_bytes())?;
        self.inner.write_all(&event.p.to_le_bytes())?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
