//! NCLR (Nintendo CoLoR resource) - DS palette file.
//!
//! Stored under the file magic `RLCN` with two sections:
//!
//! | Section | Contents |
//! |---------|----------|
//! | `TTLP`  | Bit depth and a flat BGR555 color array, cut into palettes ([`pltt`]) |
//! | `PMCP`  | Optional palette id table ([`pcmp`]) |
//!
//! Palettes are exposed as a map from [`PaletteId`] to [`Palette`]. When the
//! file has no `PMCP` section, or the section is empty, palettes receive
//! sequential ids `0..N` in the order they appear in the color data.
//!
//! ```
//! use nitrokit::formats::nclr::{BitDepth, Palette, PaletteFile};
//! use nitrokit::{Color, decode_palette_file, encode_palette_file};
//!
//! let grey = Palette::new(vec![Color::new(16, 16, 16, false); 16]);
//! let file = PaletteFile::from_palettes(BitDepth::Bpp4, vec![grey]).unwrap();
//!
//! let bytes = encode_palette_file(&file);
//! let decoded = decode_palette_file(&bytes).unwrap();
//! assert_eq!(decoded, file);
//! assert_eq!(decoded.palettes()[&0].colors()[0].to_rgb888(), [128, 128, 128]);
//! ```

mod pcmp;
mod pltt;

use std::collections::BTreeMap;

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::Serialize;

use super::NitroFormat;
use super::nitro::{Section, SectionedFile};
use crate::color::Color;
use crate::config::{DecodeOptions, UnknownSectionPolicy};
use crate::{Error, Result};

/// External palette index, as referenced by tile and cell resources.
pub type PaletteId = u16;

/// How many bits a pixel uses to index its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BitDepth {
    /// 16-color palettes.
    #[default]
    Bpp4,
    /// 256-color palettes.
    Bpp8,
}

impl BitDepth {
    /// Map a `TTLP` depth tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            3 => Some(Self::Bpp4),
            4 => Some(Self::Bpp8),
            _ => None,
        }
    }

    pub fn tag(self) -> u32 {
        match self {
            Self::Bpp4 => 3,
            Self::Bpp8 => 4,
        }
    }

    /// Conventional palette length at this depth.
    pub fn palette_len(self) -> usize {
        match self {
            Self::Bpp4 => 16,
            Self::Bpp8 => 256,
        }
    }
}

/// An ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries expanded to 8-bit RGB.
    pub fn to_rgb888(&self) -> Vec<[u8; 3]> {
        self.colors.iter().map(|c| c.to_rgb888()).collect()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A decoded NCLR file.
///
/// Every palette holds exactly [`PaletteFile::colors_per_palette`] colors;
/// the constructors enforce it so that encoding cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PaletteFile {
    bit_depth: BitDepth,
    colors_per_palette: u32,
    palettes: BTreeMap<PaletteId, Palette>,
}

impl PaletteFile {
    /// Build a palette file from explicit ids.
    pub fn new(
        bit_depth: BitDepth,
        colors_per_palette: u32,
        palettes: BTreeMap<PaletteId, Palette>,
    ) -> Result<Self> {
        if palettes.len() > u16::MAX as usize {
            return Err(Error::Parse("palette count exceeds the u16 PMCP count field"));
        }
        if !palettes.is_empty() && colors_per_palette == 0 {
            return Err(Error::Parse("palettes must hold at least one color"));
        }
        if palettes
            .values()
            .any(|p| p.len() != colors_per_palette as usize)
        {
            return Err(Error::Parse("palette length differs from colors_per_palette"));
        }
        Ok(Self {
            bit_depth,
            colors_per_palette,
            palettes,
        })
    }

    /// Build a palette file with sequential ids `0..N`.
    ///
    /// The palette length is taken from the first palette.
    pub fn from_palettes(bit_depth: BitDepth, palettes: Vec<Palette>) -> Result<Self> {
        let colors_per_palette = palettes.first().map_or(0, |p| p.len() as u32);
        let map = sequential_ids(palettes.len())?
            .into_iter()
            .zip(palettes)
            .collect();
        Self::new(bit_depth, colors_per_palette, map)
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Length shared by every palette.
    pub fn colors_per_palette(&self) -> u32 {
        self.colors_per_palette
    }

    /// Palettes keyed by id, in ascending id order.
    pub fn palettes(&self) -> &BTreeMap<PaletteId, Palette> {
        &self.palettes
    }

    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Ids `0..n`. `n` is capped at `u16::MAX` because the `PMCP` count field
/// written on encode is a `u16`.
fn sequential_ids(n: usize) -> Result<Vec<PaletteId>> {
    if n > u16::MAX as usize {
        return Err(Error::Parse("palette count exceeds the u16 PMCP count field"));
    }
    Ok((0..n as PaletteId).collect())
}

/// Accumulates section results before the [`PaletteFile`] is frozen.
#[derive(Default)]
struct Builder {
    format: Option<(BitDepth, u32)>,
    palettes: Vec<Palette>,
    ids: Option<Vec<PaletteId>>,
}

impl Builder {
    fn add_data(&mut self, data: pltt::PaletteData) -> Result<()> {
        let format = (data.bit_depth, data.color_count);
        match self.format {
            Some(seen) if seen != format => {
                return Err(Error::Parse("TTLP sections disagree on depth or color count"));
            }
            _ => self.format = Some(format),
        }
        self.palettes.extend(data.palettes);
        Ok(())
    }

    fn set_ids(&mut self, ids: Vec<PaletteId>) -> Result<()> {
        if self.ids.is_some() {
            return Err(Error::Parse("more than one PMCP section"));
        }
        self.ids = Some(ids);
        Ok(())
    }

    fn finish(self) -> Result<PaletteFile> {
        let (bit_depth, colors_per_palette) = self.format.unwrap_or_default();
        let ids = match self.ids {
            Some(ids) => ids,
            None => {
                debug!("no palette map, numbering {} palettes", self.palettes.len());
                sequential_ids(self.palettes.len())?
            }
        };
        if ids.len() != self.palettes.len() {
            return Err(Error::PaletteMapMismatch("id count differs from palette count"));
        }

        let mut palettes = BTreeMap::new();
        for (id, palette) in ids.into_iter().zip(self.palettes) {
            if palettes.insert(id, palette).is_some() {
                return Err(Error::PaletteMapMismatch("duplicate palette id"));
            }
        }

        Ok(PaletteFile {
            bit_depth,
            colors_per_palette,
            palettes,
        })
    }
}

impl NitroFormat for PaletteFile {
    const MAGIC: [u8; 4] = *b"RLCN";
    const NAME: &'static str = "NCLR";

    fn from_sectioned(file: &SectionedFile, opts: &DecodeOptions) -> Result<Self> {
        super::expect_magic::<Self>(file)?;

        let mut builder = Builder::default();
        for section in &file.sections {
            match section.magic {
                pltt::MAGIC => builder.add_data(pltt::decode(&section.content)?)?,
                pcmp::MAGIC => match pcmp::decode(&section.content)? {
                    Some(ids) => builder.set_ids(ids)?,
                    None => warn!("empty PMCP section, falling back to sequential ids"),
                },
                _ => match opts.unknown_section_policy() {
                    UnknownSectionPolicy::Reject => {
                        return Err(Error::UnknownSection(section.magic_str()));
                    }
                    UnknownSectionPolicy::Skip => {
                        warn!("skipping unknown NCLR section {}", section.magic_str());
                    }
                },
            }
        }
        builder.finish()
    }

    fn to_sectioned(&self) -> SectionedFile {
        let data = pltt::encode(
            self.bit_depth,
            self.colors_per_palette,
            self.palettes.values(),
        );
        let map = pcmp::encode(self.palettes.keys().copied());
        SectionedFile {
            magic: Self::MAGIC,
            sections: vec![Section::new(pltt::MAGIC, data), Section::new(pcmp::MAGIC, map)],
        }
    }
}

/// Decode an NCLR file with default (strict) options.
pub fn decode_palette_file(data: &[u8]) -> Result<PaletteFile> {
    PaletteFile::decode(data)
}

/// Decode an NCLR file.
pub fn decode_palette_file_with(data: &[u8], opts: &DecodeOptions) -> Result<PaletteFile> {
    PaletteFile::decode_with(data, opts)
}

/// Encode a palette file. Output is stable: encoding a decoded copy of the
/// result reproduces it byte for byte.
pub fn encode_palette_file(file: &PaletteFile) -> Vec<u8> {
    file.encode()
}
