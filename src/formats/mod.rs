//! Codecs for Nintendo DS graphics resources.
//!
//! Every DS graphics format shares the [`nitro`] envelope: a 16-byte header
//! and a list of tagged sections. Decoding is therefore two steps:
//!
//! 1. [`nitro::SectionedFile::parse`] splits the buffer into raw sections.
//! 2. A format type implementing [`NitroFormat`] walks those sections,
//!    dispatching on their magic.
//!
//! Conventions shared by all format modules:
//!
//! * **Byte buffers in, owned values out** - decoders read `&[u8]`, never
//!   perform I/O, and keep no state between calls.
//! * **Immutable results** - decoded values are built once and re-encoded
//!   to fresh bytes rather than edited in place.
//! * **Little-endian only** - big-endian DS files are not supported.
//!
//! ## Format overview
//!
//! | Module    | Magic  | Description |
//! |-----------|--------|-------------|
//! | [`nitro`] | any    | Generic sectioned envelope |
//! | [`nclr`]  | `RLCN` | Palette resource: one or more BGR555 palettes |

pub mod nclr;
pub mod nitro;

use crate::config::DecodeOptions;
use crate::utils::magic_str;
use crate::{Error, Result};
use nitro::SectionedFile;

/// A resource format carried in the Nitro sectioned envelope.
pub trait NitroFormat: Sized {
    /// File-type magic as stored on disk (byte-reversed name).
    const MAGIC: [u8; 4];
    /// Conventional format name, e.g. `"NCLR"`.
    const NAME: &'static str;

    /// Interpret already-split sections.
    fn from_sectioned(file: &SectionedFile, opts: &DecodeOptions) -> Result<Self>;

    /// Rebuild the section list.
    fn to_sectioned(&self) -> SectionedFile;

    /// Decode a complete file with default options.
    fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, &DecodeOptions::default())
    }

    /// Decode a complete file.
    ///
    /// The file-type magic is checked before the envelope is split so that a
    /// foreign file reports [`Error::WrongFileType`] rather than a header
    /// error.
    fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Self> {
        if let Some(found) = data.get(..4) {
            if found != Self::MAGIC {
                return Err(Error::WrongFileType {
                    expected: Self::NAME,
                    found: String::from_utf8_lossy(found).into_owned(),
                });
            }
        }
        let file = SectionedFile::parse_with(data, opts)?;
        Self::from_sectioned(&file, opts)
    }

    /// Encode to a complete file.
    fn encode(&self) -> Vec<u8> {
        self.to_sectioned().to_bytes()
    }
}

/// Fail with [`Error::WrongFileType`] unless `file` carries `F::MAGIC`.
pub(crate) fn expect_magic<F: NitroFormat>(file: &SectionedFile) -> Result<()> {
    if file.magic != F::MAGIC {
        return Err(Error::WrongFileType {
            expected: F::NAME,
            found: magic_str(&file.magic),
        });
    }
    Ok(())
}
