use nitrokit::{
    BitDepth, Color, DecodeOptions, Error, NitroFormat, PaletteFile, SectionedFile,
    decode_palette_file, decode_palette_file_with, encode_palette_file,
};

/// Build a little-endian Nitro file by hand.
fn nitro(magic: &[u8; 4], sections: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let body: usize = sections.iter().map(|(_, c)| c.len() + 8).sum();
    let mut out = Vec::new();
    out.extend_from_slice(magic);
    out.extend_from_slice(&[0xFF, 0xFE, 0x00, 0x01]);
    out.extend_from_slice(&((0x10 + body) as u32).to_le_bytes());
    out.extend_from_slice(&0x10u16.to_le_bytes());
    out.extend_from_slice(&(sections.len() as u16).to_le_bytes());
    for (m, content) in sections {
        out.extend_from_slice(*m);
        out.extend_from_slice(&((content.len() + 8) as u32).to_le_bytes());
        out.extend_from_slice(content);
    }
    out
}

fn ttlp(tag: u32, data_size: u32, color_count: u32, words: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    for v in [tag, 0, data_size, color_count] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

const WORDS: [u16; 16] = [
    0x0000, 0x7FFF, 0x001F, 0x03E0, 0x7C00, 0x8000, 0x4210, 0x1234, 0x5678, 0x9ABC, 0xDEF0,
    0x0421, 0x7BDE, 0x2D6B, 0xFFFF, 0x3C0F,
];

#[test]
fn minimal_four_bit_file() {
    let data = nitro(b"RLCN", &[(b"TTLP", ttlp(3, 32, 16, &WORDS))]);
    let nclr = decode_palette_file(&data).unwrap();

    assert_eq!(nclr.bit_depth(), BitDepth::Bpp4);
    assert_eq!(nclr.len(), 1);
    let expected: Vec<Color> = WORDS.iter().map(|&w| Color::from_bgr555(w)).collect();
    assert_eq!(nclr.palette(0).unwrap().colors(), expected.as_slice());
}

#[test]
fn three_palettes_get_sequential_ids() {
    let words: Vec<u16> = (0..48).map(|i| i * 3).collect();
    let data = nitro(b"RLCN", &[(b"TTLP", ttlp(3, 96, 16, &words))]);
    let nclr = decode_palette_file(&data).unwrap();
    assert_eq!(nclr.palettes().keys().copied().collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(nclr.palette(1).unwrap().colors()[0], Color::from_bgr555(48));
}

#[test]
fn foreign_magic_is_wrong_file_type() {
    let data = nitro(b"ABCD", &[(b"TTLP", ttlp(3, 32, 16, &WORDS))]);
    assert!(matches!(
        decode_palette_file(&data),
        Err(Error::WrongFileType { found, .. }) if found == "ABCD"
    ));
}

#[test]
fn uneven_split_is_rejected() {
    let data = nitro(b"RLCN", &[(b"TTLP", ttlp(3, 10, 3, &[1, 2, 3, 4, 5]))]);
    assert!(matches!(
        decode_palette_file(&data),
        Err(Error::UnevenPaletteSplit {
            data_size: 10,
            color_count: 3
        })
    ));
}

#[test]
fn round_trip_is_stable() {
    let words: Vec<u16> = (0..64).map(|i| i * 0x1FF).collect();
    let map = {
        let mut m = vec![0x04, 0x00, 0xEF, 0xBE, 0x08, 0x00, 0x00, 0x00];
        for id in [3u16, 0, 12, 5] {
            m.extend_from_slice(&id.to_le_bytes());
        }
        m
    };
    let data = nitro(
        b"RLCN",
        &[(b"TTLP", ttlp(3, 128, 16, &words)), (b"PMCP", map)],
    );

    let first = decode_palette_file(&data).unwrap();
    assert_eq!(first.palette(12).unwrap().colors()[0], Color::from_bgr555(32 * 0x1FF));

    let encoded = encode_palette_file(&first);
    let second = decode_palette_file(&encoded).unwrap();
    assert_eq!(second, first);
    assert_eq!(encode_palette_file(&second), encoded);
}

#[test]
fn encoded_file_splits_back() {
    let nclr = decode_palette_file(&nitro(b"RLCN", &[(b"TTLP", ttlp(4, 32, 16, &WORDS))])).unwrap();
    let split = SectionedFile::parse(&nclr.encode()).unwrap();
    assert_eq!(split.magic, *b"RLCN");
    let magics: Vec<_> = split.sections.iter().map(|s| s.magic).collect();
    assert_eq!(magics, [*b"TTLP", *b"PMCP"]);
}

#[test]
fn truncated_file() {
    let mut data = nitro(b"RLCN", &[(b"TTLP", ttlp(3, 32, 16, &WORDS))]);
    data.truncate(data.len() - 4);
    let lax = DecodeOptions::default().strict_header(false);
    assert!(matches!(
        decode_palette_file_with(&data, &lax),
        Err(Error::TruncatedSection { .. })
    ));
    assert!(matches!(
        decode_palette_file(&data),
        Err(Error::MalformedHeader(_))
    ));
}

#[test]
fn empty_file_round_trips() {
    let empty = PaletteFile::from_palettes(BitDepth::Bpp8, vec![]).unwrap();
    let decoded = PaletteFile::decode(&empty.encode()).unwrap();
    assert_eq!(decoded, empty);
    assert_eq!(decoded.bit_depth(), BitDepth::Bpp8);
}

#[cfg(feature = "serde")]
#[test]
fn serializes_to_json() {
    let data = nitro(b"RLCN", &[(b"TTLP", ttlp(3, 32, 16, &WORDS))]);
    let nclr = decode_palette_file(&data).unwrap();
    let json = serde_json::to_value(&nclr).unwrap();
    assert_eq!(json["bit_depth"], "Bpp4");
    assert_eq!(json["palettes"]["0"][1]["r"], 31);
    assert_eq!(json["palettes"]["0"][5]["x"], true);
}
