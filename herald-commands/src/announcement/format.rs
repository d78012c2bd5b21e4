use rand::Rng;

use herald_utils::embed::{BLUE, GOLD, GREEN, ORANGE, PURPLE, RED};

/// Text posted ahead of an announcement embed for a `mention` option value.
///
/// Unrecognized modes ping everyone.
pub fn mention_line(mode: &str) -> &'static str {
    match mode.trim().to_lowercase().as_str() {
        "here" => "@here",
        "none" | "なし" => "",
        _ => "@everyone",
    }
}

fn parse_hex_color(raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

/// Embed color for a `color` option value.
///
/// Accepts the named palette, `random`, or `#RRGGBB`; anything else is blue.
pub fn resolve_color(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Some(color) = parse_hex_color(raw) {
        return color;
    }

    match raw.to_lowercase().as_str() {
        "red" => RED,
        "green" => GREEN,
        "blue" => BLUE,
        "yellow" => GOLD,
        "orange" => ORANGE,
        "purple" => PURPLE,
        "random" => rand::rng().random_range(0..=0xFF_FF_FF),
        _ => BLUE,
    }
}
