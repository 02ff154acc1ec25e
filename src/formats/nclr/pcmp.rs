//! `PMCP` (PCMP) - palette count map.
//!
//! Assigns the external palette id to each palette of the `TTLP` block, in
//! order. Files that omit the section use ids `0..N`.
//!
//! ## Layout
//! ```text
//! [0x00] PaletteCount               (u16 LE)
//! [0x02] Unknown (0xBEEF)           (u16 LE)
//! [0x04] TableOffset (normally 8)   (u32 LE) - relative to the section content
//! [TableOffset] Ids                 (PaletteCount × u16 LE)
//! ```

use super::PaletteId;
use crate::utils::{le_u16, le_u32, magic_str, put_le_u16, put_le_u32};
use crate::{Error, Result};

pub(super) const MAGIC: [u8; 4] = *b"PMCP";
const HEADER_SIZE: usize = 8;
const UNKNOWN: u16 = 0xBEEF;

fn truncated(declared: usize, available: usize) -> Error {
    Error::TruncatedSection {
        magic: magic_str(&MAGIC),
        declared,
        available,
    }
}

/// Decode the id table. Empty content yields `None`.
pub(super) fn decode(content: &[u8]) -> Result<Option<Vec<PaletteId>>> {
    if content.is_empty() {
        return Ok(None);
    }
    if content.len() < HEADER_SIZE {
        return Err(truncated(HEADER_SIZE, content.len()));
    }

    let mut r = content;
    let count = le_u16(&mut r)? as usize;
    let _unknown = le_u16(&mut r)?;
    let table_offset = le_u32(&mut r)? as usize;

    let table_end = table_offset
        .checked_add(count * 2)
        .ok_or(Error::Parse("PMCP table offset overflows"))?;
    let mut table = content
        .get(table_offset..table_end)
        .ok_or_else(|| truncated(table_end, content.len()))?;

    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        ids.push(le_u16(&mut table)?);
    }
    Ok(Some(ids))
}

pub(super) fn encode(ids: impl ExactSizeIterator<Item = PaletteId>) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + ids.len() * 2);
    put_le_u16(&mut out, ids.len() as u16);
    put_le_u16(&mut out, UNKNOWN);
    put_le_u32(&mut out, HEADER_SIZE as u32);
    for id in ids {
        put_le_u16(&mut out, id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_ids_at_table_offset() {
        let raw = [
            0x02, 0x00, 0xEF, 0xBE, 0x0A, 0x00, 0x00, 0x00, 0xAA, 0xAA, 0x05, 0x00, 0x09, 0x00,
        ];
        assert_eq!(decode(&raw).unwrap(), Some(vec![5, 9]));
    }

    #[test]
    fn empty_is_unusable() {
        assert_eq!(decode(&[]).unwrap(), None);
    }

    #[test]
    fn short_table() {
        let raw = [0x03, 0x00, 0xEF, 0xBE, 0x08, 0x00, 0x00, 0x00, 0x01, 0x00];
        assert!(matches!(
            decode(&raw),
            Err(Error::TruncatedSection {
                declared: 14,
                available: 10,
                ..
            })
        ));
        assert!(matches!(
            decode(&[0x01, 0x00]),
            Err(Error::TruncatedSection { .. })
        ));
    }

    #[test]
    fn encode_layout() {
        let out = encode([0u16, 3].into_iter());
        assert_eq!(
            out,
            [0x02, 0x00, 0xEF, 0xBE, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00]
        );
        assert_eq!(decode(&out).unwrap(), Some(vec![0, 3]));
    }
}
