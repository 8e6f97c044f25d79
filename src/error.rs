//! Error types for the MPS7 reader.

use thiserror::Error;

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, Mps7Error>;

/// Errors that can occur while decoding an MPS7 stream.
///
/// Every variant is fatal for the current pass. Reaching the end of the
/// declared records is not an error and is reported as `Ok(None)` by
/// [`Mps7Reader::advance`](crate::Mps7Reader::advance).
#[derive(Error, Debug)]
pub enum Mps7Error {
    /// Failed to open, read or seek the byte source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not start with the `MPS7` magic token
    #[error("The input data is malformed or has the wrong format")]
    UnrecognizedFormat,

    /// The header declares a format version this reader does not decode
    #[error(
        "Input data reports an unsupported version; expected version {expected}, got version {actual}"
    )]
    UnsupportedVersion { expected: u8, actual: u8 },

    /// The stream ended before a field was fully read
    #[error("Input data is truncated: stream ended while reading {field}")]
    Truncated { field: &'static str },

    /// A record tag outside the four known kinds
    #[error("Unrecognized record type {tag}")]
    UnknownRecordKind { tag: u8 },

    /// Epoch seconds that cannot be represented as a timestamp
    #[error("Timestamp {seconds} is out of range")]
    TimestampOutOfRange { seconds: u32 },

    /// The cursor was advanced before its header was read
    #[error("Reader has not been opened")]
    NotOpen,

    /// A decode error already ended the current pass
    #[error("Previous record failed to decode; reset the reader to start a new pass")]
    PassAborted,

    /// The cursor was used after `close()`
    #[error("Reader has been closed")]
    Closed,

    /// An amount too large to be formatted as currency
    #[error("Amount {0} is too large to format")]
    AmountOutOfRange(String),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: mps7-reader <txnlog.dat>")]
    MissingArgument,

    /// More than one positional argument was given
    #[error("Unexpected argument '{0}'. Usage: mps7-reader <txnlog.dat>")]
    UnexpectedArgument(String),
}
