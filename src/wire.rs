//! Fixed-width field reads shared by the header and record decoders.

use crate::error::{Mps7Error, Result};
use std::io::{self, Read};

/// Reads exactly `N` bytes for `field`, mapping a short read to [`Mps7Error::Truncated`].
pub(crate) fn read_field<const N: usize, R: Read>(
    source: &mut R,
    field: &'static str,
) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    source.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Mps7Error::Truncated { field },
        _ => Mps7Error::Io(e),
    })?;
    Ok(buf)
}
