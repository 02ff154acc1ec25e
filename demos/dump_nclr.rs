use std::env;
use std::fs;

use nitrokit::{DecodeOptions, Result, UnknownSectionPolicy, decode_palette_file_with};

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "palette.nclr".into());
    let data = fs::read(&path)?;

    let opts = DecodeOptions::default().unknown_sections(UnknownSectionPolicy::Skip);
    let nclr = decode_palette_file_with(&data, &opts)?;

    println!("{path}: {:?}, {} palettes", nclr.bit_depth(), nclr.len());
    for (id, palette) in nclr.palettes() {
        let rgb: Vec<String> = palette
            .to_rgb888()
            .iter()
            .map(|[r, g, b]| format!("{r:02X}{g:02X}{b:02X}"))
            .collect();
        println!("{id:3}: {}", rgb.join(" "));
    }

    Ok(())
}
