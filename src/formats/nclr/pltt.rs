//! `TTLP` (PLTT) - palette data block.
//!
//! ## Layout
//! ```text
//! [0x00] DepthTag (3 = 4 bpp, 4 = 8 bpp)   (u32 LE)
//! [0x04] Padding                           (u32)
//! [0x08] DataSize in bytes                 (u32 LE)
//! [0x0C] ColorCount per palette            (u32 LE)
//! [0x10] BGR555 words                      (DataSize bytes)
//! ```
//!
//! The color array is cut into palettes of `ColorCount` entries each.

use super::{BitDepth, Palette};
use crate::color::Color;
use crate::utils::{le_u16, le_u32, put_le_u16, put_le_u32};
use crate::{Error, Result};

pub(super) const MAGIC: [u8; 4] = *b"TTLP";
const HEADER_SIZE: usize = 0x10;

/// Decoded contents of one `TTLP` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PaletteData {
    pub bit_depth: BitDepth,
    pub color_count: u32,
    pub palettes: Vec<Palette>,
}

pub(super) fn decode(content: &[u8]) -> Result<PaletteData> {
    if content.len() < HEADER_SIZE {
        return Err(Error::TruncatedPaletteData {
            declared: HEADER_SIZE,
            available: content.len(),
        });
    }

    let mut r = content;
    let depth_tag = le_u32(&mut r)?;
    let bit_depth = BitDepth::from_tag(depth_tag).ok_or(Error::UnknownBitDepth(depth_tag))?;
    let _padding = le_u32(&mut r)?;
    let data_size = le_u32(&mut r)?;
    let color_count = le_u32(&mut r)?;

    if r.len() < data_size as usize {
        return Err(Error::TruncatedPaletteData {
            declared: data_size as usize,
            available: r.len(),
        });
    }

    let uneven = Error::UnevenPaletteSplit {
        data_size,
        color_count,
    };
    if data_size % 2 != 0 {
        return Err(uneven);
    }
    let total = data_size / 2;
    if total > 0 && (color_count == 0 || total % color_count != 0) {
        return Err(uneven);
    }

    let mut colors = Vec::with_capacity(total as usize);
    for _ in 0..total {
        colors.push(Color::from_bgr555(le_u16(&mut r)?));
    }
    let palettes = if total == 0 {
        Vec::new()
    } else {
        colors
            .chunks_exact(color_count as usize)
            .map(|c| Palette::new(c.to_vec()))
            .collect()
    };

    Ok(PaletteData {
        bit_depth,
        color_count,
        palettes,
    })
}

/// Build `TTLP` content for `palettes`, all of which hold `color_count`
/// entries.
pub(super) fn encode<'a>(
    bit_depth: BitDepth,
    color_count: u32,
    palettes: impl ExactSizeIterator<Item = &'a Palette>,
) -> Vec<u8> {
    let data_size = palettes.len() as u32 * color_count * 2;
    let mut out = Vec::with_capacity(HEADER_SIZE + data_size as usize);
    put_le_u32(&mut out, bit_depth.tag());
    put_le_u32(&mut out, 0);
    put_le_u32(&mut out, data_size);
    put_le_u32(&mut out, color_count);
    for palette in palettes {
        for c in palette.colors() {
            put_le_u16(&mut out, c.to_bgr555());
        }
    }
    out
}
