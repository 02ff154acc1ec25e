//! Low-level byte primitives shared by all codecs.
//!
//! Readers consume exactly the bytes they promise or return
//! [`Error::UnexpectedEof`]; writers append to a `Vec<u8>` and cannot fail.
//! Everything is little-endian, the only byte order DS files use in practice.

use std::io::{self, Read};

use crate::{Error, Result};

/// Fill `buf` completely, mapping a short read to [`Error::UnexpectedEof`].
#[inline]
fn fill<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        _ => Error::Io(e),
    })
}

/// Read a little-endian `u16`.
#[inline]
pub(crate) fn le_u16<R: Read>(r: &mut R) -> Result<u16> {
    let mut b = [0u8; 2];
    fill(r, &mut b)?;
    Ok(u16::from_le_bytes(b))
}

/// Read a little-endian `u32`.
#[inline]
pub(crate) fn le_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    fill(r, &mut b)?;
    Ok(u32::from_le_bytes(b))
}

/// Read exactly `N` bytes into a fixed-size array.
#[inline]
pub(crate) fn bytesa<const N: usize>(r: &mut impl Read) -> Result<[u8; N]> {
    let mut b = [0u8; N];
    fill(r, &mut b)?;
    Ok(b)
}

/// Read a 4-byte magic tag and check that it is ASCII.
///
/// Returns [`Error::InvalidEncoding`] otherwise. The tag is kept as raw
/// bytes; callers compare it against byte-string literals.
#[inline]
pub(crate) fn ascii_magic<R: Read>(r: &mut R) -> Result<[u8; 4]> {
    let tag = bytesa::<4>(r)?;
    if !tag.is_ascii() {
        return Err(Error::InvalidEncoding(tag));
    }
    Ok(tag)
}

/// Render a magic tag for messages and logs.
pub(crate) fn magic_str(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

/// Append a little-endian `u16`.
#[inline]
pub(crate) fn put_le_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Append a little-endian `u32`.
#[inline]
pub(crate) fn put_le_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
