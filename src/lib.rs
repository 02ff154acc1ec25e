//! **nitrokit** - decode and re-encode Nintendo DS graphics resources.
//!
//! # Supported formats
//! | Module | Format |
//! |--------|--------|
//! | [`formats::nitro`] | Generic sectioned envelope shared by DS graphics files |
//! | [`formats::nclr`]  | NCLR - BGR555 palette resource |
//!
//! # Features
//! | Feature | Effect |
//! |---------|--------|
//! | `serde` | `Serialize` for the palette model (colors, palettes, files) |
//!
//! The library logs through the [`log`] facade and installs no logger.

pub mod color;
pub mod config;
pub mod error;
pub mod formats;
pub(crate) mod utils;

pub use color::Color;
pub use config::{DecodeOptions, UnknownSectionPolicy};
pub use error::{Error, Result};
pub use formats::NitroFormat;
pub use formats::nclr::{
    BitDepth, Palette, PaletteFile, PaletteId, decode_palette_file, decode_palette_file_with,
    encode_palette_file,
};
pub use formats::nitro::{Section, SectionedFile};
