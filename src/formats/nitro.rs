//! Nitro sectioned file - the generic envelope shared by DS graphics formats.
//!
//! NCLR, NCGR, NSCR, NCER and friends all start with the same 16-byte
//! header followed by a flat list of tagged, length-prefixed sections. This
//! module splits a buffer into that list without interpreting any section;
//! format modules such as [`super::nclr`] then dispatch on section magics.
//!
//! ## Layout
//! ```text
//! [0x00] Magic (file type, byte-reversed: "RLCN" for NCLR)  (4 bytes)
//! [0x04] BOM                 (bytes FF FE)
//! [0x06] Version             (bytes 00 01)
//! [0x08] FileSize            (u32 LE)
//! [0x0C] HeaderSize (0x10)   (u16 LE)
//! [0x0E] SectionCount        (u16 LE)
//! [0x10] Sections, back to back
//! ```
//!
//! ## Section
//! ```text
//! [0x00] Magic               (4 bytes)
//! [0x04] Size incl. header   (u32 LE)
//! [0x08] Content             (Size - 8 bytes)
//! ```
//!
//! ## Endianness
//! Only little-endian files are supported. The big-endian BOM (`FE FF`) is
//! rejected as a malformed header in strict mode.

use std::io::Read;

use log::debug;

use crate::config::DecodeOptions;
use crate::utils::{ascii_magic, bytesa, le_u16, le_u32, magic_str, put_le_u16, put_le_u32};
use crate::{Error, Result};

/// Size of the fixed file header.
pub const HEADER_SIZE: usize = 0x10;
/// Size of the magic + size prefix in front of every section.
pub const SECTION_HEADER_SIZE: usize = 8;
/// Byte-order mark of a little-endian file, as stored.
pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];
/// Format version, as stored.
pub const VERSION: [u8; 2] = [0x00, 0x01];

/// A file split into its header magic and raw sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionedFile {
    /// File-type magic, e.g. `*b"RLCN"`.
    pub magic: [u8; 4],
    /// Sections in file order.
    pub sections: Vec<Section>,
}

/// One tagged chunk of a [`SectionedFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section magic, e.g. `*b"TTLP"`.
    pub magic: [u8; 4],
    /// Payload without the 8-byte magic/size prefix.
    pub content: Vec<u8>,
}

impl Section {
    pub fn new(magic: [u8; 4], content: Vec<u8>) -> Self {
        Self { magic, content }
    }

    /// Size as written to disk, header included.
    pub fn size(&self) -> usize {
        SECTION_HEADER_SIZE + self.content.len()
    }

    /// Magic rendered as a string for messages.
    pub fn magic_str(&self) -> String {
        magic_str(&self.magic)
    }
}

impl SectionedFile {
    /// Split `data` into sections using the default (strict) options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &DecodeOptions::default())
    }

    /// Split `data` into sections.
    ///
    /// Section contents are copied out of `data`; the buffer is only read.
    pub fn parse_with(data: &[u8], opts: &DecodeOptions) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::UnexpectedEof);
        }

        let mut r = data;
        let magic = ascii_magic(&mut r)?;
        let bom = bytesa::<2>(&mut r)?;
        let version = bytesa::<2>(&mut r)?;
        let file_size = le_u32(&mut r)? as usize;
        let header_size = le_u16(&mut r)?;
        let section_count = le_u16(&mut r)?;

        if opts.is_strict_header() {
            if bom != BOM_LE {
                return Err(Error::MalformedHeader("byte-order mark is not FF FE"));
            }
            if version != VERSION {
                return Err(Error::MalformedHeader("unsupported version"));
            }
            if header_size as usize != HEADER_SIZE {
                return Err(Error::MalformedHeader("header size is not 0x10"));
            }
            if file_size > data.len() {
                return Err(Error::MalformedHeader("file size exceeds buffer"));
            }
        } else {
            debug!(
                "{}: lax header bom={bom:02X?} version={version:02X?} size={file_size:#x} header={header_size:#x}",
                magic_str(&magic)
            );
        }

        let mut offset = HEADER_SIZE;
        let mut sections = Vec::with_capacity(section_count as usize);
        for _ in 0..section_count {
            let remaining = &data[offset..];
            if remaining.len() < SECTION_HEADER_SIZE {
                return Err(Error::SectionCountMismatch(
                    "buffer ends before the declared section count",
                ));
            }

            let mut r = remaining;
            let s_magic = ascii_magic(&mut r)?;
            let size = le_u32(&mut r)? as usize;
            if size < SECTION_HEADER_SIZE || size > remaining.len() {
                return Err(Error::TruncatedSection {
                    magic: magic_str(&s_magic),
                    declared: size,
                    available: remaining.len(),
                });
            }

            debug!("section {} at {offset:#x}, {size:#x} bytes", magic_str(&s_magic));
            sections.push(Section::new(
                s_magic,
                remaining[SECTION_HEADER_SIZE..size].to_vec(),
            ));
            offset += size;
        }

        if opts.is_strict_header() && offset != file_size {
            return Err(Error::SectionCountMismatch(
                "sections do not cover the declared file size",
            ));
        }
        if offset < data.len() {
            debug!("ignoring {} trailing bytes", data.len() - offset);
        }

        Ok(Self { magic, sections })
    }

    /// Read the whole stream and split it.
    pub fn read_from<R: Read>(r: &mut R, opts: &DecodeOptions) -> Result<Self> {
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;
        Self::parse_with(&data, opts)
    }

    /// Total encoded size, header included.
    pub fn size(&self) -> usize {
        HEADER_SIZE + self.sections.iter().map(Section::size).sum::<usize>()
    }

    /// Find the first section with the given magic.
    pub fn section(&self, magic: &[u8; 4]) -> Option<&Section> {
        self.sections.iter().find(|s| &s.magic == magic)
    }

    /// Serialize with a freshly computed header.
    ///
    /// # Panics
    /// Panics if there are more than `u16::MAX` sections or the file would
    /// exceed 4 GiB; neither fits the on-disk format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.size();
        let count = u16::try_from(self.sections.len()).expect("too many sections");
        let mut out = Vec::with_capacity(total);

        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&BOM_LE);
        out.extend_from_slice(&VERSION);
        put_le_u32(&mut out, u32::try_from(total).expect("file too large"));
        put_le_u16(&mut out, HEADER_SIZE as u16);
        put_le_u16(&mut out, count);

        for s in &self.sections {
            out.extend_from_slice(&s.magic);
            put_le_u32(&mut out, s.size() as u32);
            out.extend_from_slice(&s.content);
        }
        out
    }
}
