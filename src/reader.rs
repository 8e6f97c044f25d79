//! Sequential cursor over an MPS7 stream.
//!
//! The cursor owns its byte source, validates the header when opened and
//! decodes at most `record_count` records, one per [`Mps7Reader::advance`].
//! Records are never cached: every pass re-decodes from the raw bytes, and
//! [`Mps7Reader::reset`] rewinds the source so a new pass can begin.

use crate::error::{Mps7Error, Result};
use crate::header::validate_header;
use crate::record::{decode_one, Record};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Lifecycle state of a [`Mps7Reader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Holds a source whose header has not been read yet.
    Uninitialized,

    /// Header accepted; `consumed < record_count`.
    Positioned,

    /// Every declared record has been returned.
    Exhausted,

    /// A decode or rewind error aborted the current pass. Only `reset` or `close` are allowed.
    Failed,

    /// The source has been released.
    Closed,
}

/// Stateful reader yielding the records of one MPS7 stream in file order.
///
/// At most one logical reader exists per source; the type provides no
/// internal locking. The source is dropped on `close()`, when header
/// validation fails, or when the reader itself is dropped.
///
/// # Examples
///
/// ```no_run
/// use mps7_reader::Mps7Reader;
///
/// let mut reader = Mps7Reader::open_path("txnlog.dat")?;
/// while let Some(record) = reader.advance()? {
///     println!("{} {}", record.kind(), record.user_id);
/// }
/// reader.close()?;
/// # Ok::<(), mps7_reader::Mps7Error>(())
/// ```
#[derive(Debug)]
pub struct Mps7Reader<R> {
    source: Option<R>,
    state: CursorState,
    record_count: u32,
    consumed: u32,
}

impl Mps7Reader<BufReader<File>> {
    /// Opens the file at `path` and validates its header.
    ///
    /// The file handle is released before any error is returned.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Opened {}", path.as_ref().display());
        Self::from_source(BufReader::new(file))
    }
}

impl<R: Read + Seek> Mps7Reader<R> {
    /// Wraps `source` without reading from it.
    ///
    /// The source must be positioned at the start of the stream.
    pub fn new(source: R) -> Self {
        Mps7Reader {
            source: Some(source),
            state: CursorState::Uninitialized,
            record_count: 0,
            consumed: 0,
        }
    }

    /// Wraps `source` and validates its header in one step.
    pub fn from_source(source: R) -> Result<Self> {
        let mut reader = Self::new(source);
        reader.open()?;
        Ok(reader)
    }

    /// Validates the header and positions the cursor before the first record.
    ///
    /// Returns the declared record count. Calling `open` on a reader that is
    /// already open does no I/O and returns the count again. If validation
    /// fails the source is released and the reader is closed.
    pub fn open(&mut self) -> Result<u32> {
        match self.state {
            CursorState::Closed => Err(Mps7Error::Closed),
            CursorState::Uninitialized => self.read_header(),
            _ => Ok(self.record_count),
        }
    }

    /// Returns the next record, or `Ok(None)` once `record_count` records
    /// have been returned.
    ///
    /// End-of-sequence is sticky: every later call also returns `Ok(None)`.
    /// A decode error moves the reader to [`CursorState::Failed`]; the pass
    /// cannot continue and must be restarted with [`reset`](Self::reset).
    pub fn advance(&mut self) -> Result<Option<Record>> {
        match self.state {
            CursorState::Uninitialized => Err(Mps7Error::NotOpen),
            CursorState::Closed => Err(Mps7Error::Closed),
            CursorState::Failed => Err(Mps7Error::PassAborted),
            CursorState::Exhausted => Ok(None),
            CursorState::Positioned => {
                let source = self.source.as_mut().ok_or(Mps7Error::Closed)?;

                match decode_one(source) {
                    Ok(record) => {
                        self.consumed += 1;
                        if self.consumed == self.record_count {
                            debug!("All {} records consumed", self.record_count);
                            self.state = CursorState::Exhausted;
                        }
                        Ok(Some(record))
                    }
                    Err(e) => {
                        warn!("Record {}: {}", self.consumed, e);
                        self.state = CursorState::Failed;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Rewinds the source and re-reads the header, starting a new pass.
    ///
    /// Valid from every state except [`CursorState::Closed`]. If the source
    /// cannot be rewound the reader moves to [`CursorState::Failed`] and a
    /// later `reset` may be attempted.
    pub fn reset(&mut self) -> Result<u32> {
        let source = self.source.as_mut().ok_or(Mps7Error::Closed)?;
        if let Err(e) = source.seek(SeekFrom::Start(0)) {
            warn!("Reset failed: {}", e);
            self.state = CursorState::Failed;
            return Err(e.into());
        }
        debug!("Reset to start of stream");
        self.read_header()
    }

    /// Releases the underlying source.
    ///
    /// Every later operation, including a second `close`, fails with
    /// [`Mps7Error::Closed`].
    pub fn close(&mut self) -> Result<()> {
        if self.source.take().is_none() {
            return Err(Mps7Error::Closed);
        }
        self.state = CursorState::Closed;
        debug!("Closed reader");
        Ok(())
    }

    /// Returns an iterator over the remaining records of the current pass.
    ///
    /// The iterator ends at end-of-sequence and stops after yielding the
    /// first error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            reader: self,
            done: false,
        }
    }

    fn read_header(&mut self) -> Result<u32> {
        let source = self.source.as_mut().ok_or(Mps7Error::Closed)?;

        match validate_header(source) {
            Ok(record_count) => {
                debug!("Header accepted: {} records declared", record_count);
                self.record_count = record_count;
                self.consumed = 0;
                self.state = if record_count == 0 {
                    CursorState::Exhausted
                } else {
                    CursorState::Positioned
                };
                Ok(record_count)
            }
            Err(e) => {
                warn!("Header rejected: {}", e);
                self.source = None;
                self.state = CursorState::Closed;
                Err(e)
            }
        }
    }
}

impl<R> Mps7Reader<R> {
    /// Number of records declared by the header (0 before `open`).
    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    /// Number of records returned in the current pass.
    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    pub fn state(&self) -> CursorState {
        self.state
    }
}

/// Iterator returned by [`Mps7Reader::records`].
#[derive(Debug)]
pub struct Records<'a, R> {
    reader: &'a mut Mps7Reader<R>,
    done: bool,
}

impl<R: Read + Seek> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.reader.record_count.saturating_sub(self.reader.consumed) as usize;
        (0, Some(remaining))
    }
}
