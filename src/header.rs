//! MPS7 header validation.
//!
//! Every stream opens with a fixed 9-byte preamble:
//!
//! | Offset | Width | Field        |
//! |--------|-------|--------------|
//! | 0      | 4     | magic `MPS7` |
//! | 4      | 1     | version      |
//! | 5      | 4     | record count |
//!
//! All integers are big-endian.

use crate::error::{Mps7Error, Result};
use crate::wire::read_field;
use std::io::Read;

/// ASCII token every MPS7 stream starts with.
pub const MAGIC: &[u8; 4] = b"MPS7";

/// The only format version this reader decodes.
pub const SUPPORTED_VERSION: u8 = 1;

/// Size of the header in bytes.
pub const HEADER_LEN: u64 = 9;

/// Validates the header at the current position of `source` and returns the
/// declared record count.
///
/// Consumes exactly [`HEADER_LEN`] bytes on success. No upper bound is placed
/// on the record count; a count larger than the data present surfaces later
/// as a truncated record.
///
/// # Errors
///
/// - [`Mps7Error::UnrecognizedFormat`] if the first four bytes are not `MPS7`,
///   including when fewer than four bytes are available
/// - [`Mps7Error::UnsupportedVersion`] if the version byte is not `1`
/// - [`Mps7Error::Truncated`] if the version or record count is cut short
pub fn validate_header<R: Read>(source: &mut R) -> Result<u32> {
    let magic: [u8; 4] = match read_field(source, "magic") {
        Ok(bytes) => bytes,
        Err(Mps7Error::Truncated { .. }) => return Err(Mps7Error::UnrecognizedFormat),
        Err(e) => return Err(e),
    };
    if &magic != MAGIC {
        return Err(Mps7Error::UnrecognizedFormat);
    }

    let [version] = read_field::<1, _>(source, "version")?;
    if version != SUPPORTED_VERSION {
        return Err(Mps7Error::UnsupportedVersion {
            expected: SUPPORTED_VERSION,
            actual: version,
        });
    }

    let record_count = u32::from_be_bytes(read_field(source, "record count")?);
    Ok(record_count)
}
