//! BGR555 color codec.
//!
//! DS palettes store each color as one little-endian `u16`:
//!
//! ```text
//! bit  15  14..10  9..5  4..0
//!      X   B       G     R
//! ```
//!
//! `X` is not a real alpha channel; some tools use it to flag transparent
//! entries. Every 16-bit pattern is a valid color, so the word codec is a
//! bijection. The 8-bit conversions scale by 8 and are therefore lossy in the
//! low three bits of each channel.

#[cfg(feature = "serde")]
use serde::Serialize;

const CHANNEL_MASK: u16 = 0x1F;
const EXTRA_BIT: u16 = 0x8000;

/// One BGR555 palette entry.
///
/// Channels are always in `0..=31`; [`Color::new`] masks out higher bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    #[cfg_attr(feature = "serde", serde(rename = "x"))]
    extra: bool,
}

impl Color {
    /// Build a color from five-bit channels. Bits above the fifth are dropped.
    pub const fn new(r: u8, g: u8, b: u8, extra: bool) -> Self {
        Self {
            r: r & 0x1F,
            g: g & 0x1F,
            b: b & 0x1F,
            extra,
        }
    }

    /// Unpack a stored color word.
    pub const fn from_bgr555(word: u16) -> Self {
        Self {
            r: (word & CHANNEL_MASK) as u8,
            g: ((word >> 5) & CHANNEL_MASK) as u8,
            b: ((word >> 10) & CHANNEL_MASK) as u8,
            extra: word & EXTRA_BIT != 0,
        }
    }

    /// Pack into a color word.
    pub const fn to_bgr555(self) -> u16 {
        let word = (self.b as u16) << 10 | (self.g as u16) << 5 | self.r as u16;
        if self.extra { word | EXTRA_BIT } else { word }
    }

    /// Quantize 8-bit channels (floor division by 8).
    pub const fn from_rgb888(r: u8, g: u8, b: u8, extra: bool) -> Self {
        Self::new(r / 8, g / 8, b / 8, extra)
    }

    /// Expand to 8-bit channels (multiply by 8, low bits left at zero).
    pub const fn to_rgb888(self) -> [u8; 3] {
        [self.r * 8, self.g * 8, self.b * 8]
    }

    /// [`Color::to_rgb888`] plus the extra bit.
    pub const fn to_rgb888_extra(self) -> ([u8; 3], bool) {
        (self.to_rgb888(), self.extra)
    }

    pub const fn r(self) -> u8 {
        self.r
    }

    pub const fn g(self) -> u8 {
        self.g
    }

    pub const fn b(self) -> u8 {
        self.b
    }

    /// The bit-15 flag.
    pub const fn extra(self) -> bool {
        self.extra
    }
}

impl From<u16> for Color {
    fn from(word: u16) -> Self {
        Self::from_bgr555(word)
    }
}

impl From<Color> for u16 {
    fn from(c: Color) -> Self {
        c.to_bgr555()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        let c = Color::from_bgr555(0b1_10101_01010_11111);
        assert_eq!((c.r(), c.g(), c.b(), c.extra()), (0x1F, 0x0A, 0x15, true));

        let white = Color::from_bgr555(0x7FFF);
        assert_eq!(white.to_rgb888(), [248, 248, 248]);
        assert!(!white.extra());
    }

    #[test]
    fn word_codec_is_bijective() {
        for word in 0..=u16::MAX {
            assert_eq!(Color::from_bgr555(word).to_bgr555(), word);
        }
    }

    #[test]
    fn color_round_trips_through_word() {
        for r in 0..32 {
            for g in [0, 7, 31] {
                for b in [0, 16, 31] {
                    for extra in [false, true] {
                        let c = Color::new(r, g, b, extra);
                        assert_eq!(Color::from(u16::from(c)), c);
                    }
                }
            }
        }
    }

    #[test]
    fn new_masks_to_five_bits() {
        let c = Color::new(0xFF, 0x20, 0x21, false);
        assert_eq!((c.r(), c.g(), c.b()), (0x1F, 0x00, 0x01));
    }

    #[test]
    fn rgb888_round_trip_keeps_top_five_bits() {
        for v in 0..=255u8 {
            let c = Color::from_rgb888(v, 255 - v, v / 2, false);
            assert_eq!(
                c.to_rgb888(),
                [(v / 8) * 8, ((255 - v) / 8) * 8, (v / 2 / 8) * 8]
            );
        }
        // each run of 8 input values shares one 5-bit value
        assert_eq!(Color::from_rgb888(248, 0, 0, false), Color::from_rgb888(255, 0, 0, false));
        assert_eq!(Color::from_rgb888(240, 0, 0, false), Color::from_rgb888(247, 0, 0, false));
        assert_ne!(Color::from_rgb888(247, 0, 0, false), Color::from_rgb888(248, 0, 0, false));
    }

    #[test]
    fn extra_bit_survives_rgb_conversion() {
        let c = Color::from_rgb888(8, 16, 24, true);
        assert_eq!(c.to_rgb888_extra(), ([8, 16, 24], true));
        assert_eq!(c.to_bgr555(), 0x8000 | 3 << 10 | 2 << 5 | 1);
    }
}
