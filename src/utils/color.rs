use anyhow::{Result, bail};
use image::Rgb;

/// Parse a color name or `#rrggbb` into an RGB pixel.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid hex color: #{}", hex);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
    }

    let rgb = match value.as_str() {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "navy" => [0, 0, 128],
        "gray" | "grey" => [128, 128, 128],
        other => bail!("unknown color: {}", other),
    };

    Ok(Rgb(rgb))
}
