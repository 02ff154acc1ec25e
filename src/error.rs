//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout nitrokit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Every error is terminal for the decode call that produced it; no partial
/// value is returned alongside one.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer ended before a fixed-size structure could be read.
    #[error("unexpected end of data")]
    UnexpectedEof,
    /// A magic tag contained non-ASCII bytes.
    #[error("magic {0:02X?} is not ASCII")]
    InvalidEncoding([u8; 4]),
    /// One of the fixed Nitro header fields did not hold its expected value.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),
    /// A section declared more bytes than the buffer holds, or fewer than
    /// its own header.
    #[error("section {magic} declares {declared} bytes, {available} available")]
    TruncatedSection {
        magic: String,
        declared: usize,
        available: usize,
    },
    /// A `TTLP` block declared more color data than it carries.
    #[error("palette data declares {declared} bytes, {available} available")]
    TruncatedPaletteData { declared: usize, available: usize },
    /// The section stream disagrees with the header's count or file size.
    #[error("section count mismatch: {0}")]
    SectionCountMismatch(&'static str),
    /// The file-type magic is not the one the decoder handles.
    #[error("expected {expected} file, found magic {found}")]
    WrongFileType {
        expected: &'static str,
        found: String,
    },
    /// A section magic the decoder does not recognize.
    #[error("unknown section {0}")]
    UnknownSection(String),
    /// A `TTLP` depth tag other than 3 (4 bpp) or 4 (8 bpp).
    #[error("unknown bit depth tag {0}")]
    UnknownBitDepth(u32),
    /// The color array cannot be cut into whole palettes.
    #[error("{data_size} bytes of color data do not split into palettes of {color_count}")]
    UnevenPaletteSplit { data_size: u32, color_count: u32 },
    /// The `PMCP` id table does not line up with the decoded palettes.
    #[error("palette map mismatch: {0}")]
    PaletteMapMismatch(&'static str),
    /// A structural constraint was violated (message describes which one).
    #[error("parse error: {0}")]
    Parse(&'static str),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
